//! MySQL schema export tool.
//!
//! Connects to one MySQL database, reads its catalog, and writes a JSON
//! snapshot of every base table.
//!
//! # Security Guarantees
//! - Read-only database operations only
//! - Passwords are never logged or written to the snapshot

use clap::Parser;
use schema_export::{Cli, USAGE_HINT, run};
use schema_export_core::{EnvSource, logging::init_logging};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.global.verbose, cli.global.quiet) {
        println!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli, &EnvSource::from_env()).await {
        Ok(summary) => {
            println!("Export complete: {}", summary.path.display());
            println!(
                "Exported {} tables, {:.1} KB",
                summary.tables,
                summary.kilobytes()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Error: {}", e);
            if e.is_configuration() {
                println!("{}", USAGE_HINT);
            }
            ExitCode::FAILURE
        }
    }
}
