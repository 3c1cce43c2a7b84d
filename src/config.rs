//! Configuration management for the Biblion client core

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct PagingConfig {
    /// Page size for the division-tier candidate lists
    pub page_size: usize,
    /// Upper bound used when loading the non-paginated tiers in full
    pub full_list_take: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Quiet period before a keystroke becomes a search request
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BorrowingConfig {
    /// Fallback cap when the caller supplies no remaining-borrowable count
    pub default_cap: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub borrowing: BorrowingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix BIBLION_)
            .add_source(
                Environment::with_prefix("BIBLION")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            full_list_take: 500,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

impl Default for BorrowingConfig {
    fn default() -> Self {
        Self { default_cap: 3 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            paging: PagingConfig::default(),
            search: SearchConfig::default(),
            borrowing: BorrowingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
