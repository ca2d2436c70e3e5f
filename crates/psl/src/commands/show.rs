//! `psl show` -- decrypt an entry and print it.

use std::io::Read;

use anyhow::{Context, Result};

use crate::cli::ShowArgs;
use crate::context::RuntimeContext;
use crate::output::write_raw;

/// Execute the `psl show` command.
///
/// The GPG passphrase is read from standard input so it never appears in
/// a process argument list. The decrypted entry is written to stdout as
/// raw bytes.
pub fn run(ctx: &RuntimeContext, args: &ShowArgs) -> Result<()> {
    let mut passphrase = String::new();
    std::io::stdin()
        .read_to_string(&mut passphrase)
        .context("failed to read passphrase from stdin")?;
    let passphrase = passphrase.trim_end_matches(['\r', '\n']);

    let content = ctx.store().show(&args.name, passphrase)?;
    write_raw(&content).context("failed to write entry to stdout")?;
    Ok(())
}
