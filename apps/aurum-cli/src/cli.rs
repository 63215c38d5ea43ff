//! # Command Line Definition
//!
//! ```text
//! aurum [--db PATH] [--json] [-v]
//!   ├── rates     show | set --gold 7125.50 --silver 92
//!   ├── product   register | list | show | deactivate
//!   ├── stock     list | alerts | restock
//!   ├── sale      quote | invoice   (--item BARCODE[:QTY] ...)
//!   ├── history   [--search TERM] [--number INV-2026-0001]
//!   ├── overview
//!   ├── db        status
//!   └── password-strength PASSWORD
//! ```

use aurum_core::{Category, MakingChargeMode, MAX_ITEM_QUANTITY};
use clap::{ArgAction, Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Parser)]
#[command(name = "aurum", version, about = "Jewelry billing and stock from the shop counter")]
pub struct Cli {
    /// SQLite database file (overrides AURUM_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or change today's gold and silver rates
    #[command(subcommand)]
    Rates(RatesCommand),

    /// Register and look up products
    #[command(subcommand)]
    Product(ProductCommand),

    /// Stock levels, reorder alerts and restocking
    #[command(subcommand)]
    Stock(StockCommand),

    /// Price a cart or turn it into an invoice
    #[command(subcommand)]
    Sale(SaleCommand),

    /// Past invoices, newest first
    History(HistoryArgs),

    /// Sales by category
    Overview,

    /// Database file, schema and row counts
    #[command(subcommand)]
    Db(DbCommand),

    /// Rate a staff password
    PasswordStrength {
        password: String,
    },
}

// =============================================================================
// Rates
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum RatesCommand {
    Show,
    Set {
        /// Gold rate in rupees per gram
        #[arg(long)]
        gold: Option<Decimal>,

        /// Silver rate in rupees per gram
        #[arg(long)]
        silver: Option<Decimal>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DbCommand {
    Status,
}

// =============================================================================
// Product
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    Register(RegisterArgs),
    List(ProductListArgs),
    Show { barcode: String },
    /// Hide a product from sale and listings; invoices keep referencing it
    Deactivate { barcode: String },
}

#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub barcode: String,

    #[arg(long)]
    pub name: String,

    /// gold, silver or imitation
    #[arg(long)]
    pub category: Category,

    /// Weight in grams (required for gold and silver)
    #[arg(long)]
    pub weight: Option<Decimal>,

    /// e.g. 22K, 925
    #[arg(long)]
    pub purity: Option<String>,

    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Required for imitation items
    #[arg(long)]
    pub selling_price: Option<Decimal>,

    #[arg(long, default_value_t = 1)]
    pub quantity: i64,

    /// Defaults to AURUM_REORDER_LEVEL
    #[arg(long)]
    pub reorder_level: Option<i64>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ProductListArgs {
    #[arg(long)]
    pub category: Option<Category>,

    /// Name or barcode contains
    #[arg(long)]
    pub search: Option<String>,

    /// Include deactivated products
    #[arg(long)]
    pub all: bool,

    #[arg(long)]
    pub limit: Option<u32>,
}

// =============================================================================
// Stock
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum StockCommand {
    List(StockFilterArgs),
    Alerts(StockFilterArgs),
    Restock {
        barcode: String,

        /// Units received
        #[arg(long, short)]
        quantity: i64,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct StockFilterArgs {
    #[arg(long)]
    pub category: Option<Category>,

    /// Name or barcode contains
    #[arg(long)]
    pub search: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum SaleCommand {
    /// Price the items without touching stock
    Quote(SaleArgs),
    /// Price the items, store the invoice and take them out of stock
    Invoice {
        #[command(flatten)]
        sale: SaleArgs,

        #[command(flatten)]
        customer: CustomerArgs,
    },
}

#[derive(Debug, Clone, Args)]
pub struct SaleArgs {
    /// BARCODE or BARCODE:QTY, repeat for each scan
    #[arg(long = "item", required = true, value_name = "BARCODE[:QTY]")]
    pub items: Vec<ItemSpec>,

    /// percentage or fixed (defaults to AURUM_MAKING_MODE)
    #[arg(long)]
    pub making_mode: Option<MakingChargeMode>,

    /// Defaults to AURUM_MAKING_VALUE
    #[arg(long)]
    pub making_value: Option<Decimal>,
}

#[derive(Debug, Clone, Args)]
pub struct CustomerArgs {
    #[arg(long = "customer")]
    pub name: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub email: Option<String>,
}

/// One scan: a barcode and how many units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub barcode: String,
    pub quantity: i64,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (barcode, quantity) = match s.rsplit_once(':') {
            Some((barcode, qty)) => {
                let quantity = qty
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| format!("invalid quantity '{qty}'"))?;
                (barcode, quantity)
            }
            None => (s, 1),
        };

        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err("barcode is empty".to_string());
        }
        if !(1..=MAX_ITEM_QUANTITY).contains(&quantity) {
            return Err(format!("quantity must be between 1 and {MAX_ITEM_QUANTITY}"));
        }

        Ok(ItemSpec {
            barcode: barcode.to_string(),
            quantity,
        })
    }
}

// =============================================================================
// History
// =============================================================================

#[derive(Debug, Clone, Default, Args)]
pub struct HistoryArgs {
    /// Customer name, phone or invoice number contains
    #[arg(long)]
    pub search: Option<String>,

    /// Show one invoice in full
    #[arg(long, conflicts_with = "search")]
    pub number: Option<String>,

    #[arg(long)]
    pub limit: Option<usize>,
}
