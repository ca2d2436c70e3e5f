//! Clap CLI definitions for the `psl` command.

use clap::{Args, Parser, Subcommand};

/// psl -- command-line front end for pass-backed password stores.
#[derive(Parser, Debug)]
#[command(
    name = "psl",
    about = "Manage a pass password store",
    long_about = "Manage a pass(1) password store. Every command except `ls` delegates to the \
                  external pass binary; `ls` reads the store directory directly.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Store directory (default: $PASSWORD_STORE_DIR, then ~/.password-store).
    #[arg(long, global = true)]
    pub store_dir: Option<String>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Abort the external command after this many seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the store (or a subfolder) for a GPG id.
    Init(InitArgs),

    /// List entry names.
    #[command(alias = "list")]
    Ls(LsArgs),

    /// Decrypt an entry and print it (passphrase read from stdin).
    Show(ShowArgs),

    /// Create an entry from stdin.
    #[command(alias = "add")]
    Insert(InsertArgs),

    /// Remove an entry.
    #[command(alias = "remove")]
    Rm(RmArgs),

    /// Rename an entry.
    #[command(alias = "rename")]
    Mv(MvArgs),

    /// Duplicate an entry.
    #[command(alias = "copy")]
    Cp(CpArgs),

    /// Forward arguments to the store's git integration.
    Git(GitArgs),
}

/// Arguments for `psl init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// GPG key id (fingerprint or email) to encrypt entries for.
    pub gpg_id: String,

    /// Restrict the id to a subfolder of the store.
    #[arg(short = 'p', long)]
    pub path: Option<String>,
}

/// Arguments for `psl ls`.
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Subfolder to list instead of the whole store.
    pub subfolder: Option<String>,
}

/// Arguments for `psl show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Entry name, e.g. `web/mail`.
    pub name: String,
}

/// Arguments for `psl insert`.
#[derive(Args, Debug)]
pub struct InsertArgs {
    /// Entry name, e.g. `web/mail`.
    pub name: String,

    /// Overwrite an existing entry without confirmation.
    #[arg(short = 'f', long)]
    pub force: bool,
}

/// Arguments for `psl rm`.
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Entry (or with --recursive, folder) name.
    pub name: String,

    /// Remove a whole folder of entries.
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'f', long)]
    pub force: bool,
}

/// Arguments for `psl mv`.
#[derive(Args, Debug)]
pub struct MvArgs {
    /// Current entry name.
    pub old: String,

    /// New entry name.
    pub new: String,

    /// Overwrite an existing destination.
    #[arg(short = 'f', long)]
    pub force: bool,
}

/// Arguments for `psl cp`.
#[derive(Args, Debug)]
pub struct CpArgs {
    /// Source entry name.
    pub old: String,

    /// Destination entry name.
    pub new: String,

    /// Overwrite an existing destination.
    #[arg(short = 'f', long)]
    pub force: bool,
}

/// Arguments for `psl git`.
#[derive(Args, Debug)]
pub struct GitArgs {
    /// Arguments passed through to git, e.g. `push origin main`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
