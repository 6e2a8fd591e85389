//! Engine configuration loaded from environment variables.

use std::str::FromStr;

use pokedex_domain::{DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE};

use crate::infrastructure::pokeapi::{DEFAULT_CATALOG_BASE_URL, DEFAULT_CATALOG_TIMEOUT_SECS};

/// Number of catalog entries loaded at startup and by a bare reload.
pub const DEFAULT_SEED_COUNT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// PokeAPI base URL (`CATALOG_BASE_URL`)
    pub catalog_base_url: String,
    pub catalog_seed_count: usize,
    pub catalog_timeout_secs: u64,
    pub page_size: usize,
    /// Navigable page cap for browse views; 0 disables the cap.
    pub max_visible_pages: usize,
    pub server_host: String,
    pub server_port: u16,
    /// CORS allowed origins (comma-separated, or "*" for any); `None` disables CORS.
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            catalog_seed_count: DEFAULT_SEED_COUNT,
            catalog_timeout_secs: DEFAULT_CATALOG_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Unparseable values fall back to
    /// their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            catalog_base_url: value("CATALOG_BASE_URL").unwrap_or(defaults.catalog_base_url),
            catalog_seed_count: parsed_or(
                "CATALOG_SEED_COUNT",
                value("CATALOG_SEED_COUNT"),
                defaults.catalog_seed_count,
            ),
            catalog_timeout_secs: parsed_or(
                "CATALOG_TIMEOUT_SECS",
                value("CATALOG_TIMEOUT_SECS"),
                defaults.catalog_timeout_secs,
            ),
            page_size: match parsed_or("PAGE_SIZE", value("PAGE_SIZE"), defaults.page_size) {
                0 => {
                    tracing::warn!("PAGE_SIZE must be positive, using {}", defaults.page_size);
                    defaults.page_size
                }
                n => n,
            },
            max_visible_pages: parsed_or(
                "MAX_VISIBLE_PAGES",
                value("MAX_VISIBLE_PAGES"),
                defaults.max_visible_pages,
            ),
            server_host: value("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parsed_or(
                "SERVER_PORT",
                value("SERVER_PORT").or_else(|| value("PORT")),
                defaults.server_port,
            ),
            cors_allowed_origins: value("CORS_ALLOWED_ORIGINS"),
        }
    }
}

fn parsed_or<T: FromStr + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid configuration value, using {}", default);
            default
        }),
    }
}
