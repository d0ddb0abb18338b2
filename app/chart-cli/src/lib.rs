//! FILENAME: app/chart-cli/src/lib.rs
// PURPOSE: Library side of the chart shell so integration tests can drive it.

pub mod logging;
pub mod cli;
pub mod commands;

pub use cli::Args;
pub use commands::{execute, export_target, open_session, resolve_spec, RunReport};

use anyhow::Result;
use clap::Parser;

/// Parses the process arguments, runs the command and prints the report.
pub fn run() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level.into(), args.log_file.as_deref())
        .map_err(anyhow::Error::msg)?;
    log_info!("CMD", "chart-cli {}", env!("CARGO_PKG_VERSION"));

    let report = match execute(&args) {
        Ok(report) => report,
        Err(e) => {
            log_error!("CMD", "{:#}", e);
            return Err(e);
        }
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
