//! TOML configuration file parsing and loading
//!
//! Handles default config file discovery and deserialisation. Keys are
//! kebab-case and unknown keys are rejected:
//!
//! ```toml
//! producers = 2
//! consumers = 4
//! items = 30
//! shutdown-at = 20
//! drain = true
//! process-delay-ms = 5
//! log-level = "debug"
//! ```

use crate::app::error::{AppError, AppResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Values read from the configuration file
///
/// Counts and delays are kept as raw integers here and validated when the
/// final settings are resolved, so error messages can name the key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    pub producers: Option<i64>,
    pub consumers: Option<i64>,
    pub items: Option<i64>,
    pub shutdown_at: Option<i64>,
    pub drain: Option<bool>,
    pub readd_every: Option<i64>,
    pub producer_delay_ms: Option<i64>,
    pub consumer_delay_ms: Option<i64>,
    pub process_delay_ms: Option<i64>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub color: Option<bool>,
}

impl ConfigFile {
    pub fn parse(contents: &str, path: &Path) -> AppResult<Self> {
        toml::from_str(contents).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Default config location: `<config_dir>/Workqueue/workqueue.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Workqueue").join("workqueue.toml"))
}

/// Load the configuration file, if any
///
/// An explicitly requested file must exist. Without one, the default
/// location is used when a file is present there.
pub fn load_config(config_file: Option<&Path>) -> AppResult<Option<ConfigFile>> {
    let config_path = match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            Some(path.to_path_buf())
        }
        None => default_config_path().filter(|path| path.exists()),
    };

    let Some(path) = config_path else {
        return Ok(None);
    };

    log::debug!("Loading configuration from {}", path.display());
    let contents = std::fs::read_to_string(&path).map_err(|source| AppError::ConfigRead {
        path: path.clone(),
        source,
    })?;
    ConfigFile::parse(&contents, &path).map(Some)
}
