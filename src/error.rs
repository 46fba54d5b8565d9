//! Centralized error types for datatable.
//!
//! The table widget itself never fails; errors only arise around it, when
//! reading configuration, loading data or driving the terminal. All error
//! types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::config::ConfigError;
use crate::data::DataError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Data loading errors.
    #[error("{0}")]
    Data(#[from] DataError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Data(e) => match e {
                DataError::ReadError(_) => {
                    "Could not read the data file. Please check the path.".to_string()
                }
                DataError::ParseError(_) => {
                    "The data file is not valid JSON. Expected an array of records.".to_string()
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Check if this error prevents the table from being shown at all.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Data(_) | AppError::Terminal(_)
        )
    }

    /// Text printed when the application exits on this error.
    ///
    /// Critical errors get the friendly message and a hint; anything else
    /// happened mid-session and is shown with its underlying cause.
    pub fn report(&self) -> String {
        if !self.is_critical() {
            return format!("Error: {}", self);
        }
        match self.suggested_action() {
            Some(hint) => format!("Error: {}\n{}", self.user_message(), hint),
            None => format!("Error: {}", self.user_message()),
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix or remove the configuration file, or pass --config with another file.")
            }
            AppError::Data(DataError::ParseError(_)) => {
                Some("The file must contain a JSON array of objects, each with an \"id\".")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
