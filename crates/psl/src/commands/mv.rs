//! `psl mv` -- rename an entry.

use anyhow::Result;

use crate::cli::MvArgs;
use crate::context::RuntimeContext;

/// Execute the `psl mv` command.
pub fn run(ctx: &RuntimeContext, args: &MvArgs) -> Result<()> {
    ctx.store().rename(&args.old, &args.new, args.force)?;

    if !ctx.quiet {
        println!("Moved {} to {}", args.old, args.new);
    }
    Ok(())
}
