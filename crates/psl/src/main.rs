//! `psl` -- command-line front end for pass-backed password stores.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers. Every subcommand except `ls` drives
//! the external `pass` binary through the passel-store crate.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    let ctx = RuntimeContext::from_global_args(&cli.global);

    // First Ctrl+C asks the in-flight subprocess to stop; a second one
    // force-exits.
    let cancel = ctx.cancel.clone();
    let _ = ctrlc::set_handler(move || {
        if cancel.is_cancelled() {
            std::process::exit(1);
        }
        cancel.cancel();
    });

    // Set up logging based on verbosity
    if ctx.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("psl=debug,passel_store=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    // Dispatch to command handler
    let result = match cli.command {
        Commands::Init(args) => commands::init::run(&ctx, &args),
        Commands::Ls(args) => commands::ls::run(&ctx, &args),
        Commands::Show(args) => commands::show::run(&ctx, &args),
        Commands::Insert(args) => commands::insert::run(&ctx, &args),
        Commands::Rm(args) => commands::rm::run(&ctx, &args),
        Commands::Mv(args) => commands::mv::run(&ctx, &args),
        Commands::Cp(args) => commands::cp::run(&ctx, &args),
        Commands::Git(args) => commands::git::run(&ctx, &args),
    };

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
