use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

pub const APP_NAME: &str = "wichtel";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOGS_DIR_NAME: &str = "logs";

/// On-disk configuration
///
/// The passphrase is deliberately not part of this file; it is handed to the
/// daemon through `--passphrase` or `WICHTEL_PASSWORD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the App server (UI + API combined)
    #[serde(default = "default_app_port")]
    pub app_port: u16,
    /// Public base URL used to build share links (e.g. https://wichtel.example.com)
    #[serde(default)]
    pub public_url: Option<Url>,
    /// Write daily-rolling log files into the state directory
    #[serde(default)]
    pub file_logging: bool,
}

fn default_app_port() -> u16 {
    8080
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_port: default_app_port(),
            public_url: None,
            file_logging: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the wichtel directory (~/.wichtel)
    pub wichtel_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Path to the log directory
    pub logs_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the wichtel directory path (custom or default ~/.wichtel)
    pub fn wichtel_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new wichtel state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let wichtel_dir = Self::wichtel_dir(custom_path)?;
        let config_path = wichtel_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        let logs_path = wichtel_dir.join(LOGS_DIR_NAME);
        fs::create_dir_all(&logs_path)?;

        let config = config.unwrap_or_default();
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            wichtel_dir,
            config_path,
            logs_path,
            config,
        })
    }

    /// Load existing state from the wichtel directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let wichtel_dir = Self::wichtel_dir(custom_path)?;

        if !wichtel_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = wichtel_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            logs_path: wichtel_dir.join(LOGS_DIR_NAME),
            wichtel_dir,
            config_path,
            config,
        })
    }

    /// Directory for log files, if file logging is enabled
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.config.file_logging.then(|| self.logs_path.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("wichtel directory not initialized. Run 'wichtel init' first")]
    NotInitialized,

    #[error("wichtel directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
