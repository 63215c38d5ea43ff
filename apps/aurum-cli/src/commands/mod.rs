//! # Commands Module
//!
//! One module per top-level subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (Context + dispatch)
//! ├── rates.rs     ◄─── Gold/silver rate display and update
//! ├── product.rs   ◄─── Registration and lookup
//! ├── stock.rs     ◄─── Stock browse, reorder alerts, restock
//! ├── sale.rs      ◄─── Quote and invoice (one sale session per run)
//! ├── history.rs   ◄─── Invoice history and search
//! ├── overview.rs  ◄─── Sales by category
//! ├── db.rs        ◄─── Database status
//! └── password.rs  ◄─── Password strength meter
//! ```
//!
//! ## How Commands Work
//! Each module exposes functions that return plain data (easy to test
//! against an in-memory database) and an `execute` entry point that
//! prints that data as a table or as JSON.

pub mod db;
pub mod history;
pub mod overview;
pub mod password;
pub mod product;
pub mod rates;
pub mod sale;
pub mod stock;

use aurum_db::Database;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::error::AppResult;

/// Everything a command needs: the open database and the loaded config.
#[derive(Debug, Clone)]
pub struct Context {
    pub db: Database,
    pub config: AppConfig,
    pub json: bool,
}

/// Runs one parsed command.
pub async fn dispatch(ctx: &Context, command: Command) -> AppResult<()> {
    match command {
        Command::Rates(cmd) => rates::execute(ctx, cmd).await,
        Command::Product(cmd) => product::execute(ctx, cmd).await,
        Command::Stock(cmd) => stock::execute(ctx, cmd).await,
        Command::Sale(cmd) => sale::execute(ctx, cmd).await,
        Command::History(args) => history::execute(ctx, args).await,
        Command::Overview => overview::execute(ctx).await,
        Command::Db(cmd) => db::execute(ctx, cmd).await,
        Command::PasswordStrength { password } => password::execute(ctx.json, &password),
    }
}
