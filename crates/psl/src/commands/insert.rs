//! `psl insert` -- create an entry from stdin.

use std::io::Read;

use anyhow::{Context, Result};

use crate::cli::InsertArgs;
use crate::context::RuntimeContext;

/// Execute the `psl insert` command.
///
/// The entry content is read verbatim from standard input; trailing
/// newlines are part of the secret and are preserved.
pub fn run(ctx: &RuntimeContext, args: &InsertArgs) -> Result<()> {
    let mut content = Vec::new();
    std::io::stdin()
        .read_to_end(&mut content)
        .context("failed to read entry content from stdin")?;

    ctx.store().insert(&args.name, &content, args.force)?;

    if !ctx.quiet {
        println!("Inserted {}", args.name);
    }
    Ok(())
}
