//! Application error types

use crate::core::logging::LoggingError;
use crate::core::validation::ValidationError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("The specified configuration file does not exist: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("Failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Task '{task}' failed: {message}")]
    Task { task: String, message: String },
}

impl AppError {
    /// Errors the user can fix by changing arguments or the config file
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            AppError::ConfigNotFound { .. }
                | AppError::ConfigParse { .. }
                | AppError::Validation(_)
                | AppError::Logging(LoggingError::UnknownFormat { .. })
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
