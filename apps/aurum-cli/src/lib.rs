//! # Aurum CLI Library
//!
//! Command-line front end for Aurum POS.
//!
//! ## Module Organization
//! ```text
//! aurum_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap command definitions
//! ├── config.rs       ◄─── AURUM_* configuration
//! ├── error.rs        ◄─── AppError with machine-readable codes
//! ├── output.rs       ◄─── Table / JSON rendering
//! └── commands/       ◄─── One module per subcommand
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

use aurum_db::{Database, DbConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands::Context;
use crate::config::AppConfig;
use crate::error::AppResult;

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  0. password-strength ─── answered without touching the database        │
/// │  1. Load configuration ── AURUM_* over defaults, --db over both         │
/// │  2. Connect to database ─ SQLite WAL, pending migrations applied        │
/// │  3. Dispatch command ──── rates / product / stock / sale / ...          │
/// │  4. Close pool ────────── flush WAL before exit                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    if let Command::PasswordStrength { password } = &cli.command {
        return commands::password::execute(cli.json, password);
    }

    let mut config = AppConfig::from_env()?;
    if let Some(path) = cli.db {
        config.database_path = path;
    }
    debug!(?config, "Configuration loaded");

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!(path = %config.database_path.display(), "Database ready");

    let ctx = Context {
        db,
        config,
        json: cli.json,
    };

    let result = commands::dispatch(&ctx, cli.command).await;
    ctx.db.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=aurum=trace` - Show trace for aurum crates only
/// - Default: `warn`, raised by `-v` / `-vv`
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
pub fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info,aurum=debug,sqlx=warn",
        _ => "debug,aurum=trace,sqlx=info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_password_strength_leaves_database_untouched() {
        let dir = std::env::temp_dir().join(format!("aurum-pw-{}", std::process::id()));
        let db_path = dir.join("aurum.db");
        let cli = Cli::try_parse_from([
            "aurum",
            "--db",
            db_path.to_str().unwrap(),
            "password-strength",
            "Gold&Silver2026",
        ])
        .unwrap();

        run(cli).await.unwrap();
        assert!(!db_path.exists());
        assert!(!dir.exists());
    }
}
