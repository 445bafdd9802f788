use std::{fs, path::PathBuf, time::Duration};

use common::prelude::SecretKey;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "u00";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const KEY_FILE_NAME: &str = "key.pem";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default log filter when neither `--log-level` nor `RUST_LOG` is set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Timeout for reads in seconds. Writes always use a fixed 1s.
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            read_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the u00 directory (~/.u00)
    pub u00_dir: PathBuf,
    /// Path to the signing key PEM file
    pub key_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the u00 directory path (custom or default ~/.u00)
    pub fn u00_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new state directory, generating a key unless one is given
    pub fn init(
        custom_path: Option<PathBuf>,
        key: Option<SecretKey>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let u00_dir = Self::u00_dir(custom_path)?;

        if u00_dir.join(KEY_FILE_NAME).exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&u00_dir)?;

        let key = key.unwrap_or_else(SecretKey::generate);
        let key_path = u00_dir.join(KEY_FILE_NAME);
        fs::write(&key_path, key.to_pem())?;

        let config = config.unwrap_or_default();
        let config_path = u00_dir.join(CONFIG_FILE_NAME);
        fs::write(&config_path, toml::to_string_pretty(&config)?)?;

        Ok(Self {
            u00_dir,
            key_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the u00 directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let u00_dir = Self::u00_dir(custom_path)?;

        if !u00_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let key_path = u00_dir.join(KEY_FILE_NAME);
        let config_path = u00_dir.join(CONFIG_FILE_NAME);

        if !key_path.exists() {
            return Err(StateError::MissingFile(KEY_FILE_NAME.to_string()));
        }

        // A missing config file just means defaults
        let config = if config_path.exists() {
            toml::from_str(&fs::read_to_string(&config_path)?)?
        } else {
            AppConfig::default()
        };

        Ok(Self {
            u00_dir,
            key_path,
            config_path,
            config,
        })
    }

    /// Load the signing key from the key file
    pub fn load_key(&self) -> Result<SecretKey, StateError> {
        let pem = fs::read_to_string(&self.key_path)?;
        let key = SecretKey::from_pem(&pem).map_err(|e| StateError::InvalidKey(e.to_string()))?;
        Ok(key)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("u00 directory not initialized. Run 'u00 init' first")]
    NotInitialized,

    #[error("u00 directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("state");

        let state = AppState::init(Some(dir.clone()), None, None).unwrap();
        let loaded = AppState::load(Some(dir)).unwrap();

        assert_eq!(loaded.config, AppConfig::default());
        assert_eq!(
            state.load_key().unwrap().to_bytes(),
            loaded.load_key().unwrap().to_bytes()
        );
    }

    #[test]
    fn test_init_keeps_supplied_key() {
        let temp = tempfile::TempDir::new().unwrap();
        let key = SecretKey::from([8u8; 32]);

        let state = AppState::init(Some(temp.path().to_path_buf()), Some(key.clone()), None).unwrap();
        assert_eq!(state.load_key().unwrap().to_bytes(), key.to_bytes());
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = Some(temp.path().to_path_buf());

        AppState::init(dir.clone(), None, None).unwrap();
        assert!(matches!(
            AppState::init(dir, None, None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_missing_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = AppState::load(Some(temp.path().join("absent")));
        assert!(matches!(result, Err(StateError::NotInitialized)));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("read_timeout_secs = 5").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.read_timeout(), Some(Duration::from_secs(5)));
    }
}
