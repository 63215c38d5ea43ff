//! # Application Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line (`--db`)
//! 2. Environment variables (`AURUM_*`)
//! 3. Defaults (this file)
//!
//! ## Environment Variables
//! - `AURUM_DB_PATH`: database file (default: platform data dir + `aurum.db`)
//! - `AURUM_STORE_NAME`: name printed on invoices
//! - `AURUM_MAKING_MODE`: `percentage` or `fixed`
//! - `AURUM_MAKING_VALUE`: making charge value, e.g. `10` or `500`
//! - `AURUM_REORDER_LEVEL`: reorder level for newly registered products

use aurum_core::validation::validate_making_charge;
use aurum_core::{MakingCharge, MakingChargeMode};
use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_STORE_NAME: &str = "Aurum Jewellers";
const DEFAULT_REORDER_LEVEL: i64 = 5;
const DATABASE_FILE: &str = "aurum.db";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Store name (shown on invoices)
    pub store_name: String,

    /// Making charge a new sale starts with
    pub making_charge: MakingCharge,

    /// Reorder level used when registration doesn't give one
    pub default_reorder_level: i64,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Database: platform data directory
    /// - Store: "Aurum Jewellers"
    /// - Making charge: 10%
    /// - Reorder level: 5
    fn default() -> Self {
        AppConfig {
            database_path: default_database_path(),
            store_name: DEFAULT_STORE_NAME.to_string(),
            making_charge: MakingCharge::default(),
            default_reorder_level: DEFAULT_REORDER_LEVEL,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `AURUM_*` environment variables over defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(path) = var("AURUM_DB_PATH") {
            config.database_path = PathBuf::from(path);
        }

        if let Some(store_name) = var("AURUM_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(mode) = var("AURUM_MAKING_MODE") {
            config.making_charge.mode = MakingChargeMode::from_str(&mode)
                .map_err(|_| ConfigError::InvalidValue("AURUM_MAKING_MODE".to_string()))?;
        }

        if let Some(value) = var("AURUM_MAKING_VALUE") {
            config.making_charge.value = Decimal::from_str(&value)
                .map_err(|_| ConfigError::InvalidValue("AURUM_MAKING_VALUE".to_string()))?;
        }
        validate_making_charge(&config.making_charge)
            .map_err(|_| ConfigError::InvalidValue("AURUM_MAKING_VALUE".to_string()))?;

        if let Some(level) = var("AURUM_REORDER_LEVEL") {
            config.default_reorder_level = level
                .parse::<i64>()
                .ok()
                .filter(|l| *l >= 0)
                .ok_or_else(|| ConfigError::InvalidValue("AURUM_REORDER_LEVEL".to_string()))?;
        }

        Ok(config)
    }
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.aurum.pos/aurum.db`
/// - **Windows**: `%APPDATA%\aurum\pos\data\aurum.db`
/// - **Linux**: `~/.local/share/pos/aurum.db`
///
/// Falls back to `./aurum.db` when no home directory is known.
pub fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "aurum", "pos")
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
