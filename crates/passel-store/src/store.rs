//! High-level password store operations.
//!
//! [`PassStore`] translates each public operation into one [`Invocation`]
//! of the external binary, in the argument order pass expects: subcommand
//! first, then flags, then positional names. All persistent state
//! (encrypted files, git history) is owned by the external tool; this
//! type only issues requests to it.

use crate::error::Result;
use crate::list::walk_store;
use crate::options::{Options, STORE_DIR_ENV};
use crate::runner::{Invocation, PassRunner, Runner};

/// Environment variable overriding pass's GPG invocation options.
const GPG_OPTS_ENV: &str = "PASSWORD_STORE_GPG_OPTS";

/// GPG options forcing non-interactive, passphrase-on-stdin decryption.
const GPG_BATCH_OPTS: &str = "--passphrase-fd=0 --pinentry-mode=loopback --batch";

/// A handle to a password store driven through the external `pass` binary.
///
/// The handle is cheap to construct, holds no open resources, and keeps no
/// state of its own: every method is an independent fire-once request.
/// Entry names are forwarded to the external tool unvalidated; it owns the
/// store and its own name rules.
#[derive(Debug, Clone)]
pub struct PassStore<R = PassRunner> {
    runner: R,
    options: Options,
}

impl PassStore<PassRunner> {
    /// A store handle using the system `pass` binary.
    pub fn new(options: Options) -> Self {
        Self {
            runner: PassRunner::new(),
            options,
        }
    }
}

impl<R: Runner> PassStore<R> {
    /// A store handle with a custom runner.
    ///
    /// Used by tests to substitute a fake executor, and by callers that
    /// need a deadline or cancellation wired into [`PassRunner`].
    pub fn with_runner(runner: R, options: Options) -> Self {
        Self { runner, options }
    }

    /// The options this handle was built with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Initialize the store, or a subfolder of it, for a GPG id.
    ///
    /// Equivalent to `pass init [--path=<subfolder>] <gpg_id>`. On success
    /// the external tool writes the `.gpg-id` marker file under the
    /// affected directory.
    pub fn init(&self, gpg_id: &str, subfolder: Option<&str>) -> Result<()> {
        let mut inv = Invocation::new("init");
        if let Some(sub) = subfolder {
            inv = inv.arg(format!("--path={sub}"));
        }
        self.run(inv.arg(gpg_id))?;
        Ok(())
    }

    /// List entry names under the store root, or under `subfolder`.
    ///
    /// Implemented as a local filesystem walk rather than `pass ls`, so no
    /// subprocess is spawned. Names are relative to the store root and
    /// sorted lexicographically; an empty store yields an empty vec.
    pub fn list(&self, subfolder: Option<&str>) -> Result<Vec<String>> {
        walk_store(&self.options.resolved_store_dir(), subfolder)
    }

    /// Decrypt an entry and return its contents.
    ///
    /// The passphrase is written to the subprocess's standard input, and
    /// GPG is forced into non-interactive loopback mode for this
    /// invocation only. A wrong passphrase surfaces as
    /// [`StoreError::CommandFailed`] carrying GPG's diagnostics.
    ///
    /// [`StoreError::CommandFailed`]: crate::error::StoreError::CommandFailed
    pub fn show(&self, name: &str, passphrase: &str) -> Result<Vec<u8>> {
        self.run(
            Invocation::new("show")
                .arg(name)
                .stdin(passphrase.as_bytes().to_vec())
                .env(GPG_OPTS_ENV, GPG_BATCH_OPTS),
        )
    }

    /// Create (or with `force`, overwrite) an entry with the given content.
    ///
    /// Multiline mode is always requested so the content is taken verbatim
    /// from standard input instead of per-line prompts. Without `force`,
    /// the external tool refuses to overwrite an existing entry.
    pub fn insert(&self, name: &str, content: &[u8], force: bool) -> Result<()> {
        let mut inv = Invocation::new("insert");
        if force {
            inv = inv.arg("--force");
        }
        self.run(inv.arg("--multiline").arg(name).stdin(content.to_vec()))?;
        Ok(())
    }

    /// Remove an entry, or with `recursive` a whole directory of entries.
    pub fn remove(&self, name: &str, recursive: bool, force: bool) -> Result<()> {
        let mut inv = Invocation::new("rm");
        if recursive {
            inv = inv.arg("--recursive");
        }
        if force {
            inv = inv.arg("--force");
        }
        self.run(inv.arg(name))?;
        Ok(())
    }

    /// Rename an entry, overwriting an existing destination with `force`.
    pub fn rename(&self, old: &str, new: &str, force: bool) -> Result<()> {
        let mut inv = Invocation::new("mv");
        if force {
            inv = inv.arg("--force");
        }
        self.run(inv.arg(old).arg(new))?;
        Ok(())
    }

    /// Duplicate an entry, overwriting an existing destination with `force`.
    pub fn copy(&self, old: &str, new: &str, force: bool) -> Result<()> {
        let mut inv = Invocation::new("cp");
        if force {
            inv = inv.arg("--force");
        }
        self.run(inv.arg(old).arg(new))?;
        Ok(())
    }

    /// Forward arbitrary arguments to the store's git integration.
    ///
    /// Returns git's stdout, e.g. for `psl git log --oneline`.
    pub fn git<I, S>(&self, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run(Invocation::new("git").args(args))
    }

    /// Attach the store-dir override and hand the invocation to the runner.
    fn run(&self, mut invocation: Invocation) -> Result<Vec<u8>> {
        if let Some(dir) = &self.options.store_dir {
            invocation = invocation.env(STORE_DIR_ENV, dir.display().to_string());
        }
        self.runner.run(invocation)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
