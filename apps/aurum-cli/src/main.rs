//! # Aurum
//!
//! Jewelry billing from the shop counter.
//!
//! ```text
//! $ aurum rates set --gold 7125.50
//! $ aurum sale invoice --item JWL12345678 --customer "Priya Sharma" --phone 9876543210
//! ```

use std::process::ExitCode;

use aurum_cli::cli::Cli;
use aurum_cli::output::render_json;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    aurum_cli::init_tracing(cli.verbose);
    let json = cli.json;

    match aurum_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match render_json(&err) {
                Ok(body) if json => eprintln!("{body}"),
                _ => eprintln!("{err}"),
            }
            ExitCode::FAILURE
        }
    }
}
