//! Store location configuration.
//!
//! The only configurable value in this crate is where the password store
//! lives. [`Options`] is an immutable per-call value; concurrent callers
//! may freely share or clone it.

use std::path::PathBuf;

/// Name of the default store directory under the user's home.
const DEFAULT_STORE_DIR_NAME: &str = ".password-store";

/// Environment variable pass itself uses to locate the store.
pub(crate) const STORE_DIR_ENV: &str = "PASSWORD_STORE_DIR";

/// Per-call configuration for store operations.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Root directory of the password store. When `None`, the root is
    /// resolved from the environment (see [`Options::resolved_store_dir`]).
    pub store_dir: Option<PathBuf>,
}

impl Options {
    /// Options with no store-dir override.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options pointing at an explicit store root.
    pub fn with_store_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: Some(dir.into()),
        }
    }

    /// Resolve the effective store root.
    ///
    /// Priority: explicit `store_dir` > `PASSWORD_STORE_DIR` environment
    /// variable > `~/.password-store`. This matches how pass itself
    /// resolves the store, so the directory walked by listing is always
    /// the one the external tool operates on.
    pub fn resolved_store_dir(&self) -> PathBuf {
        if let Some(dir) = &self.store_dir {
            return dir.clone();
        }

        if let Ok(env_dir) = std::env::var(STORE_DIR_ENV) {
            if !env_dir.is_empty() {
                return PathBuf::from(env_dir);
            }
        }

        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_STORE_DIR_NAME)
    }
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_store_dir_wins() {
        let opts = Options::with_store_dir("/srv/secrets");
        assert_eq!(opts.resolved_store_dir(), PathBuf::from("/srv/secrets"));
    }

    #[test]
    fn default_resolution_uses_env_or_home() {
        let opts = Options::new();
        let dir = opts.resolved_store_dir();
        // The test environment may or may not carry PASSWORD_STORE_DIR;
        // accept either branch of the chain rather than mutating the
        // process environment from a test.
        match std::env::var(STORE_DIR_ENV) {
            Ok(env_dir) if !env_dir.is_empty() => {
                assert_eq!(dir, PathBuf::from(env_dir));
            }
            _ => assert!(
                dir.ends_with(DEFAULT_STORE_DIR_NAME),
                "unexpected store dir: {}",
                dir.display()
            ),
        }
    }

    #[test]
    fn options_are_cheaply_cloneable() {
        let opts = Options::with_store_dir("/srv/secrets");
        let clone = opts.clone();
        assert_eq!(opts.store_dir, clone.store_dir);
    }
}
