//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds everything a command handler needs:
//! resolved store options, output flags, and the cancellation flag shared
//! with the ctrl-c handler.

use std::path::PathBuf;
use std::time::Duration;

use passel_store::{CancelFlag, Options, PassRunner, PassStore};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Store options derived from `--store-dir`.
    pub options: Options,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,

    /// Deadline for external commands.
    pub timeout: Option<Duration>,

    /// Cancellation flag, tripped by the ctrl-c handler.
    pub cancel: CancelFlag,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        let store_dir = global.store_dir.as_ref().map(PathBuf::from);

        Self {
            options: Options { store_dir },
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
            timeout: global.timeout.map(Duration::from_secs),
            cancel: CancelFlag::new(),
        }
    }

    /// Build the store handle, wiring the deadline and ctrl-c cancellation
    /// into its runner.
    pub fn store(&self) -> PassStore<PassRunner> {
        let mut runner = PassRunner::new().cancel_flag(self.cancel.clone());
        if let Some(timeout) = self.timeout {
            runner = runner.timeout(timeout);
        }
        PassStore::with_runner(runner, self.options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn global_args() -> GlobalArgs {
        GlobalArgs {
            store_dir: None,
            json: false,
            timeout: None,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn store_dir_flag_lands_in_options() {
        let mut global = global_args();
        global.store_dir = Some("/srv/secrets".into());
        let ctx = RuntimeContext::from_global_args(&global);
        assert_eq!(
            ctx.options.store_dir.as_deref(),
            Some(std::path::Path::new("/srv/secrets"))
        );
    }

    #[test]
    fn timeout_flag_is_seconds() {
        let mut global = global_args();
        global.timeout = Some(30);
        let ctx = RuntimeContext::from_global_args(&global);
        assert_eq!(ctx.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn context_starts_uncancelled() {
        let ctx = RuntimeContext::from_global_args(&global_args());
        assert!(!ctx.cancel.is_cancelled());
    }
}
