//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::dto::PriceRange;
use crate::store::DocumentExpenseStore;
use rust_decimal::Decimal;
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Storage configuration
    pub storage: StorageConfig,
    /// Input validation configuration
    pub validation: ValidationConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Which expense store backend to run with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// SQLite-backed document collection
    Document,
    /// Process memory, lost on shutdown
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "document" | "sqlite" => Some(StoreBackend::Document),
            "memory" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Selected backend
    pub backend: StoreBackend,
    /// Base directory for the database file
    pub data_dir: String,
    /// Explicit database URL, overrides `data_dir`
    pub database_url: Option<String>,
}

impl StorageConfig {
    /// URL the document store connects to
    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!(
                "sqlite:{}",
                DocumentExpenseStore::database_path(&self.data_dir).display()
            ),
        }
    }
}

/// Input validation configuration
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    /// Accepted price range for create and update requests
    pub price_range: PriceRange,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            storage: StorageConfig {
                backend: env::var("EXPENSES_STORE")
                    .ok()
                    .and_then(|b| StoreBackend::parse(&b))
                    .unwrap_or(StoreBackend::Document),
                data_dir: env::var("DATA_DIR").unwrap_or_else(|_| {
                    // Default to ~/.expenses-api or current directory
                    if let Some(home) = env::var_os("HOME") {
                        format!("{}/.expenses-api", home.to_string_lossy())
                    } else {
                        ".expenses-api".to_string()
                    }
                }),
                database_url: env::var("DATABASE_URL").ok(),
            },
            validation: ValidationConfig {
                price_range: price_range_from_env(),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn price_range_from_env() -> PriceRange {
    let defaults = PriceRange::default();
    let bound = |key: &str, default: Decimal| {
        env::var(key)
            .ok()
            .and_then(|v| v.trim().parse::<Decimal>().ok())
            .unwrap_or(default)
    };

    let min = bound("PRICE_MIN", defaults.min);
    let max = bound("PRICE_MAX", defaults.max);
    PriceRange::new(min, max).unwrap_or_else(|| {
        tracing::warn!(%min, %max, "Inverted price range, using defaults");
        defaults
    })
}
