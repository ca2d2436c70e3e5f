//! `psl cp` -- duplicate an entry.

use anyhow::Result;

use crate::cli::CpArgs;
use crate::context::RuntimeContext;

/// Execute the `psl cp` command.
pub fn run(ctx: &RuntimeContext, args: &CpArgs) -> Result<()> {
    ctx.store().copy(&args.old, &args.new, args.force)?;

    if !ctx.quiet {
        println!("Copied {} to {}", args.old, args.new);
    }
    Ok(())
}
