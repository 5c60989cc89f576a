/// Configuration management for the PawFund services
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `PAWFUND_DATA_DIR`: store directory (default: ./data)
/// - `PAWFUND_STARTING_FUND`: fund seeded at registration (default: 4.00)
/// - `PAWFUND_INGEST_TIMEOUT_SECS`: bound on a save's file-read barrier
///   (default: 30, clamped to 1..=600)
/// - `PAWFUND_MAX_FILE_BYTES`: per-file ingestion cap (default: 10 MiB)
/// - `RUST_LOG`: log level (default: info)
///
/// # Example
///
/// ```no_run
/// use pawfund_service::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("store lives in {}", config.store.data_dir.display());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default sponsorship fund seeded at registration, in euros
///
/// Of the 6 € subscription, 4 € goes to the dog's fund.
pub const DEFAULT_STARTING_FUND: f64 = 4.0;

/// Default bound on the file-read barrier of one profile save
pub const DEFAULT_INGEST_TIMEOUT_SECS: u64 = 30;

/// Minimum allowed ingestion timeout
pub const MIN_INGEST_TIMEOUT_SECS: u64 = 1;

/// Maximum allowed ingestion timeout
pub const MAX_INGEST_TIMEOUT_SECS: u64 = 600;

/// Default per-file size cap (10 MiB)
///
/// Embedded files are base64-encoded into the JSON documents, so
/// unbounded uploads would bloat every subsequent collection write.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Local store configuration
    pub store: StoreConfig,

    /// Account service configuration
    pub account: AccountConfig,

    /// File ingestion configuration
    pub ingest: IngestConfig,
}

/// Local store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the JSON collection documents
    pub data_dir: PathBuf,
}

/// Account service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Fund balance seeded into every new account; must be non-negative
    pub starting_fund: f64,
}

/// File ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Per-file read timeout in seconds
    pub read_timeout_secs: u64,

    /// Per-file size cap in bytes
    pub max_file_bytes: u64,
}

impl IngestConfig {
    /// Returns the read timeout as a `Duration`
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                data_dir: PathBuf::from("./data"),
            },
            account: AccountConfig {
                starting_fund: DEFAULT_STARTING_FUND,
            },
            ingest: IngestConfig {
                read_timeout_secs: DEFAULT_INGEST_TIMEOUT_SECS,
                max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            },
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A numeric variable has an unparseable value
    /// - `PAWFUND_STARTING_FUND` is negative
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let data_dir = env::var("PAWFUND_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let starting_fund = env::var("PAWFUND_STARTING_FUND")
            .unwrap_or_else(|_| DEFAULT_STARTING_FUND.to_string())
            .parse::<f64>()?;
        if starting_fund < 0.0 {
            anyhow::bail!("PAWFUND_STARTING_FUND must be non-negative");
        }

        let read_timeout_secs = env::var("PAWFUND_INGEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_INGEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()?
            .clamp(MIN_INGEST_TIMEOUT_SECS, MAX_INGEST_TIMEOUT_SECS);

        let max_file_bytes = env::var("PAWFUND_MAX_FILE_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_FILE_BYTES.to_string())
            .parse::<u64>()?;

        Ok(Self {
            store: StoreConfig { data_dir },
            account: AccountConfig { starting_fund },
            ingest: IngestConfig {
                read_timeout_secs,
                max_file_bytes,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.account.starting_fund, DEFAULT_STARTING_FUND);
        assert_eq!(config.ingest.read_timeout_secs, DEFAULT_INGEST_TIMEOUT_SECS);
        assert_eq!(config.ingest.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
        assert_eq!(config.store.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_read_timeout_duration() {
        let ingest = IngestConfig {
            read_timeout_secs: 5,
            max_file_bytes: 1024,
        };
        assert_eq!(ingest.read_timeout(), Duration::from_secs(5));
    }
}
