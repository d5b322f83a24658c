//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The engine rejected a request.
    #[error("Engine error: {0}")]
    Engine(String),
}

impl AppError {
    /// Returns a stable error code for hosts.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Engine(_) => "ENGINE_ERROR",
        }
    }
}
