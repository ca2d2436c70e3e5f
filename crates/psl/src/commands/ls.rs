//! `psl ls` -- list entry names.

use anyhow::Result;

use crate::cli::LsArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `psl ls` command.
pub fn run(ctx: &RuntimeContext, args: &LsArgs) -> Result<()> {
    let entries = ctx.store().list(args.subfolder.as_deref())?;

    if ctx.json {
        output_json(&entries);
    } else {
        for entry in &entries {
            println!("{entry}");
        }
    }
    Ok(())
}
