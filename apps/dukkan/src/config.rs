//! # Application Configuration
//!
//! Loaded once at startup from defaults overridden by environment variables.
//!
//! ## Sources (Priority Order)
//! 1. Environment variables (`DUKKAN_*`)
//! 2. Defaults (platform data directory, Strict stock, `ر.س`)
//!
//! | Variable                 | Default                         |
//! |--------------------------|---------------------------------|
//! | `DUKKAN_DB_PATH`         | `<data dir>/dukkan.db`          |
//! | `DUKKAN_EXPORT_DIR`      | `<data dir>/exports`            |
//! | `DUKKAN_ALLOW_OVERSELL`  | `false`                         |
//! | `DUKKAN_CURRENCY_SYMBOL` | `ر.س`                           |
//! | `DUKKAN_PDF_FONT`        | first Arabic system font found  |
//!
//! ## Platform Data Directory
//! - **Linux**: `~/.local/share/dukkan`
//! - **macOS**: `~/Library/Application Support/com.dukkan.dukkan`
//! - **Windows**: `%APPDATA%\dukkan\dukkan\data`

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use dukkan_core::inventory::StockPolicy;
use dukkan_core::Money;
use serde::Serialize;

pub const ENV_DB_PATH: &str = "DUKKAN_DB_PATH";
pub const ENV_EXPORT_DIR: &str = "DUKKAN_EXPORT_DIR";
pub const ENV_ALLOW_OVERSELL: &str = "DUKKAN_ALLOW_OVERSELL";
pub const ENV_CURRENCY_SYMBOL: &str = "DUKKAN_CURRENCY_SYMBOL";
pub const ENV_PDF_FONT: &str = "DUKKAN_PDF_FONT";

pub const DEFAULT_CURRENCY_SYMBOL: &str = "ر.س";

/// Read-only after startup, so no lock.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub export_dir: PathBuf,
    /// Sell past zero stock instead of rejecting the line.
    pub allow_oversell: bool,
    pub currency_symbol: String,
    /// TrueType font embedded in exported PDFs.
    pub pdf_font: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine the platform data directory; set {0}")]
    NoDataDir(String),
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue(name.to_string())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Loads from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Loads from `lookup`, which maps a variable name to its value.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = non_empty(lookup(ENV_DB_PATH)).map(PathBuf::from);
        let export_dir = non_empty(lookup(ENV_EXPORT_DIR)).map(PathBuf::from);

        let (db_path, export_dir) = match (db_path, export_dir) {
            (Some(db), Some(export)) => (db, export),
            (db, export) => {
                let data_dir = ProjectDirs::from("com", "dukkan", "dukkan")
                    .map(|dirs| dirs.data_dir().to_path_buf())
                    .ok_or_else(|| ConfigError::NoDataDir(ENV_DB_PATH.to_string()))?;
                (
                    db.unwrap_or_else(|| data_dir.join("dukkan.db")),
                    export.unwrap_or_else(|| data_dir.join("exports")),
                )
            }
        };

        let allow_oversell = match lookup(ENV_ALLOW_OVERSELL) {
            Some(raw) => parse_bool(ENV_ALLOW_OVERSELL, &raw)?,
            None => false,
        };

        let currency_symbol = lookup(ENV_CURRENCY_SYMBOL)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string());

        let pdf_font = non_empty(lookup(ENV_PDF_FONT)).map(PathBuf::from);

        Ok(AppConfig {
            db_path,
            export_dir,
            allow_oversell,
            currency_symbol,
            pdf_font,
        })
    }

    /// Explicit paths, everything else default. Used by tests and tools.
    pub fn with_paths(db_path: impl Into<PathBuf>, export_dir: impl Into<PathBuf>) -> Self {
        AppConfig {
            db_path: db_path.into(),
            export_dir: export_dir.into(),
            allow_oversell: false,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            pdf_font: None,
        }
    }

    pub fn stock_policy(&self) -> StockPolicy {
        StockPolicy::from_allow_oversell(self.allow_oversell)
    }

    /// e.g. `2400.00 ر.س`
    pub fn format_currency(&self, amount: Money) -> String {
        amount.with_symbol(&self.currency_symbol)
    }
}
