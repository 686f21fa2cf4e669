//! Validation utilities for CLI arguments and configuration values

/// Validation failure with a user-facing message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validate positive integer value (clap value parser)
pub fn validate_positive_int(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}

/// Validate a named count taken from a configuration file
pub fn validate_positive_count(field: &str, value: i64) -> Result<usize, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new(format!(
            "'{}' must be greater than 0 (got {})",
            field, value
        )));
    }
    usize::try_from(value)
        .map_err(|_| ValidationError::new(format!("'{}' is too large ({})", field, value)))
}

/// Validate a named delay or index taken from a configuration file
pub fn validate_non_negative(field: &str, value: i64) -> Result<u64, ValidationError> {
    u64::try_from(value).map_err(|_| {
        ValidationError::new(format!(
            "'{}' must not be negative (got {})",
            field, value
        ))
    })
}
