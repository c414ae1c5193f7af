//! Client configuration
//!
//! Loaded from `config.toml` under the platform config directory, with the
//! `MONETA_API_URL` environment variable taking precedence over the file.
//! Missing file or fields fall back to defaults.
//!
//! ```toml
//! api_url = "http://localhost:8000/api"
//! timeout_secs = 10
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the backend API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Default config file location: `<config dir>/moneta/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("moneta").join("config.toml"))
    }

    /// Load from the default location, honoring `MONETA_API_URL`
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var("MONETA_API_URL") {
            config.api_url = url;
        }
        Ok(config)
    }

    /// Load from a specific TOML file, applying defaults per missing field
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), "Loaded client config");
        Ok(Self {
            api_url: file.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "api_url = \"https://money.example.com/api\"").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.api_url, "https://money.example.com/api");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = [not toml").unwrap();

        let err = ClientConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
