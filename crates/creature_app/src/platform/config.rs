//! Application configuration, read from a RON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use creature_core::StoreConfig;
use creature_engine::FetchSettings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "creatures.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub page_size: u32,
    pub lookahead: usize,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Rows shown per screen of the list.
    pub visible_rows: usize,
    /// Also write logs to `./creatures.log`.
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        let store = StoreConfig::default();
        Self {
            base_url: fetch.base_url,
            page_size: store.page_size,
            lookahead: store.lookahead,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            visible_rows: 10,
            log_to_file: false,
        }
    }
}

impl AppConfig {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.page_size, self.lookahead)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchSettings::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Loads the config at `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_size, 20);
        assert_eq!(config.lookahead, 5);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("creatures.ron");
        fs::write(&path, "(page_size: 50, base_url: \"http://localhost:9000\")").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.lookahead, 5);
        assert_eq!(config.fetch_settings().base_url, "http://localhost:9000");
        assert_eq!(config.store_config().page_size, 50);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("creatures.ron");
        fs::write(&path, "(page_size: \"many\")").unwrap();

        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn zero_page_size_is_clamped_for_the_store() {
        let config = AppConfig {
            page_size: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.store_config().page_size, 1);
    }
}
