use crate::generator::gemini::{DEFAULT_MODEL, GEMINI_API_URL};
use crate::storage::local::DEFAULT_KEY;
use crate::storage::remote::DEFAULT_COLLECTION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variables checked, in order, for the generator key
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
/// Environment variable holding the remote store token
pub const TOKEN_VAR: &str = "LISTING_BOARD_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Which store the board saves to
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: Backend,
    /// Directory of the local key-value store
    pub data_dir: PathBuf,
    /// Key the local blob is saved under
    pub key: String,
    pub remote_url: Option<String>,
    pub collection: String,
    pub token: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Local,
            data_dir: PathBuf::from(".listing-board"),
            key: DEFAULT_KEY.to_string(),
            remote_url: None,
            collection: DEFAULT_COLLECTION.to_string(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub generator: GeneratorConfig,
}

impl AppConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Fill credentials from the environment where the file left them unset
    pub fn with_env(self) -> Self {
        self.with_vars(|name| std::env::var(name).ok())
    }

    fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if self.generator.api_key.is_none() {
            self.generator.api_key = API_KEY_VARS
                .iter()
                .filter_map(|name| var(name))
                .find(|v| !v.trim().is_empty());
        }
        if self.storage.token.is_none() {
            self.storage.token = var(TOKEN_VAR).filter(|v| !v.trim().is_empty());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let text = r#"
            [storage]
            backend = "remote"
            remote_url = "https://store.example.com/v1"

            [generator]
            timeout_secs = 5
        "#;
        let config = AppConfig::from_toml(text, Path::new("board.toml")).unwrap();

        assert_eq!(config.storage.backend, Backend::Remote);
        assert_eq!(config.storage.collection, DEFAULT_COLLECTION);
        assert_eq!(config.storage.key, DEFAULT_KEY);
        assert_eq!(config.generator.timeout_secs, 5);
        assert_eq!(config.generator.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_bad_file_reports_path() {
        let err = AppConfig::from_toml("storage = 3", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_env_fills_unset_credentials() {
        let config = AppConfig::default().with_vars(|name| match name {
            "API_KEY" => Some("fallback".to_string()),
            "GEMINI_API_KEY" => Some("".to_string()),
            TOKEN_VAR => Some("tok".to_string()),
            _ => None,
        });
        assert_eq!(config.generator.api_key.as_deref(), Some("fallback"));
        assert_eq!(config.storage.token.as_deref(), Some("tok"));

        let mut preset = AppConfig::default();
        preset.generator.api_key = Some("file".to_string());
        let config = preset.with_vars(|_| Some("env".to_string()));
        assert_eq!(config.generator.api_key.as_deref(), Some("file"));
    }
}
