//! `psl rm` -- remove an entry.

use anyhow::Result;

use crate::cli::RmArgs;
use crate::context::RuntimeContext;

/// Execute the `psl rm` command.
pub fn run(ctx: &RuntimeContext, args: &RmArgs) -> Result<()> {
    ctx.store().remove(&args.name, args.recursive, args.force)?;

    if !ctx.quiet {
        println!("Removed {}", args.name);
    }
    Ok(())
}
