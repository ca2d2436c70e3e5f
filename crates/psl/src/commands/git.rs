//! `psl git` -- forward arguments to the store's git integration.

use anyhow::{Context, Result};

use crate::cli::GitArgs;
use crate::context::RuntimeContext;
use crate::output::write_raw;

/// Execute the `psl git` command.
///
/// Whatever git prints on stdout (log output, push summaries) is
/// forwarded unmodified.
pub fn run(ctx: &RuntimeContext, args: &GitArgs) -> Result<()> {
    let stdout = ctx.store().git(args.args.iter().cloned())?;
    write_raw(&stdout).context("failed to write git output")?;
    Ok(())
}
