//! Error types for password store operations.

use std::path::PathBuf;
use std::time::Duration;

/// Errors that can occur when driving the external `pass` binary or
/// walking the store directory.
///
/// There are two families: execution errors ([`Spawn`], [`CommandFailed`],
/// [`Cancelled`]) for anything involving the subprocess, and [`Io`] for
/// local filesystem traversal. All of them propagate to the caller
/// unchanged; the crate performs no retries.
///
/// [`Spawn`]: StoreError::Spawn
/// [`CommandFailed`]: StoreError::CommandFailed
/// [`Cancelled`]: StoreError::Cancelled
/// [`Io`]: StoreError::Io
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The external binary could not be found or spawned.
    #[error("failed to execute {program}: {source}")]
    Spawn {
        /// The program that was invoked.
        program: String,
        /// The underlying spawn error.
        source: std::io::Error,
    },

    /// The external command ran and exited with a non-zero status.
    #[error("pass {subcommand} failed (exit code {code:?}): {output}")]
    CommandFailed {
        /// The pass subcommand that failed.
        subcommand: String,
        /// The exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// Captured combined output (stderr, then stdout), trimmed.
        output: String,
    },

    /// The subprocess was aborted by a cancellation flag or deadline.
    #[error("pass {subcommand} cancelled after {elapsed:?}")]
    Cancelled {
        /// The pass subcommand that was aborted.
        subcommand: String,
        /// How long the subprocess had been running when it was killed.
        elapsed: Duration,
    },

    /// A local filesystem read failed during store traversal.
    #[error("failed to read store path {}: {source}", path.display())]
    Io {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    // -- Constructors --------------------------------------------------------

    /// Creates a [`StoreError::Io`] for the given path.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    // -- Predicates ----------------------------------------------------------

    /// Returns `true` if the subprocess was aborted by cancellation or a
    /// deadline rather than failing on its own.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Returns `true` for errors originating from the external process
    /// (as opposed to local filesystem traversal).
    pub fn is_execution(&self) -> bool {
        matches!(
            self,
            Self::Spawn { .. } | Self::CommandFailed { .. } | Self::Cancelled { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_partition_the_variants() {
        let spawn = StoreError::Spawn {
            program: "pass".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let failed = StoreError::CommandFailed {
            subcommand: "show".into(),
            code: Some(1),
            output: String::new(),
        };
        let cancelled = StoreError::Cancelled {
            subcommand: "git".into(),
            elapsed: Duration::from_secs(1),
        };
        let io = StoreError::io("/tmp/store", std::io::Error::from(std::io::ErrorKind::NotFound));

        assert!(spawn.is_execution());
        assert!(failed.is_execution());
        assert!(cancelled.is_execution());
        assert!(!io.is_execution());

        assert!(cancelled.is_cancelled());
        assert!(!failed.is_cancelled());
    }

    #[test]
    fn command_failed_display_includes_diagnostics() {
        let err = StoreError::CommandFailed {
            subcommand: "show".into(),
            code: Some(2),
            output: "gpg: decryption failed: Bad passphrase".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("show"), "unexpected message: {msg}");
        assert!(msg.contains("Bad passphrase"), "unexpected message: {msg}");
    }
}
