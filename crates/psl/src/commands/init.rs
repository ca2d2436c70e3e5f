//! `psl init` -- initialize the store for a GPG id.

use anyhow::Result;

use crate::cli::InitArgs;
use crate::context::RuntimeContext;

/// Execute the `psl init` command.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    ctx.store().init(&args.gpg_id, args.path.as_deref())?;

    if !ctx.quiet {
        match &args.path {
            Some(sub) => println!("Initialized subfolder {} for {}", sub, args.gpg_id),
            None => println!("Initialized store for {}", args.gpg_id),
        }
    }
    Ok(())
}
