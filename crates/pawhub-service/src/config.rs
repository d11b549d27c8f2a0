//! Service configuration.

use std::fmt;
use std::str::FromStr;

use pawhub_core::{CLASSIFIEDS_PAGE_SIZE, MAX_PAGE_SIZE};

/// Which storage backend the service runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-memory store; contents are lost on restart.
    #[default]
    Memory,
    /// `RocksDB` store under `data_dir`.
    Rocksdb,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "rocksdb" => Ok(Self::Rocksdb),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::Rocksdb => "rocksdb",
        })
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Storage backend (default: memory).
    pub store_backend: StoreBackend,

    /// Path to `RocksDB` data directory (default: "/data/pawhub").
    pub data_dir: String,

    /// JSON file of listings loaded into the store at startup (optional).
    pub seed_path: Option<String>,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Page size used when a request does not specify one.
    pub default_page_size: usize,

    /// Largest page size a request may ask for.
    pub max_page_size: usize,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let store_backend = match std::env::var("STORE_BACKEND") {
            Ok(value) => value.parse().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Invalid STORE_BACKEND, using memory");
                StoreBackend::Memory
            }),
            Err(_) => defaults.store_backend,
        };

        let max_page_size = env_parse("MAX_PAGE_SIZE")
            .unwrap_or(defaults.max_page_size)
            .max(1);
        let default_page_size = env_parse("DEFAULT_PAGE_SIZE")
            .unwrap_or(defaults.default_page_size)
            .clamp(1, max_page_size);

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            store_backend,
            data_dir: std::env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            seed_path: std::env::var("SEED_PATH").ok().filter(|s| !s.is_empty()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: env_parse("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
            default_page_size,
            max_page_size,
        }
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            store_backend: StoreBackend::Memory,
            data_dir: "/data/pawhub".into(),
            seed_path: None,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024, // 1MB
            request_timeout_seconds: 30,
            default_page_size: CLASSIFIEDS_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parsing() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!(" RocksDB ".parse::<StoreBackend>().unwrap(), StoreBackend::Rocksdb);
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn defaults_match_classifieds_page_size() {
        let config = ServiceConfig::default();
        assert_eq!(config.default_page_size, 12);
        assert!(config.default_page_size <= config.max_page_size);
    }
}
