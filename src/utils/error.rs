use std::io::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Source file not found: {path}")]
    NotFound { path: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Access denied to {path}: {source}")]
    AccessDenied {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unexpected error: {message}")]
    Unexpected { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Storage,
    Data,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FilterError {
    /// Classifies an I/O failure on `path` into the not-found, access-denied
    /// or generic I/O kind.
    pub fn from_io(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            ErrorKind::NotFound => FilterError::NotFound { path },
            ErrorKind::PermissionDenied => FilterError::AccessDenied { path, source },
            _ => FilterError::Io { path, source },
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FilterError::NotFound { .. } => ErrorCategory::Source,
            FilterError::Io { .. } | FilterError::AccessDenied { .. } => ErrorCategory::Storage,
            FilterError::Csv(_) => ErrorCategory::Data,
            FilterError::Unexpected { .. } => ErrorCategory::Internal,
            FilterError::ConfigError { .. }
            | FilterError::MissingConfigError { .. }
            | FilterError::InvalidConfigValueError { .. }
            | FilterError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FilterError::Io { .. } => ErrorSeverity::Medium,
            FilterError::NotFound { .. }
            | FilterError::AccessDenied { .. }
            | FilterError::Csv(_)
            | FilterError::ConfigError { .. }
            | FilterError::MissingConfigError { .. }
            | FilterError::InvalidConfigValueError { .. }
            | FilterError::ConfigValidationError { .. } => ErrorSeverity::High,
            FilterError::Unexpected { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FilterError::NotFound { path } => {
                format!("Check that '{}' exists and the path is spelled correctly", path)
            }
            FilterError::AccessDenied { path, .. } => {
                format!("Check file permissions for '{}' or choose another location", path)
            }
            FilterError::Io { .. } => "Retry the operation; check free disk space".to_string(),
            FilterError::Csv(_) => {
                "Make sure the source is a UTF-8 text file with comma-separated fields".to_string()
            }
            FilterError::MissingConfigError { field } => {
                format!("Provide a value for '{}' on the command line or in the config file", field)
            }
            FilterError::InvalidConfigValueError { field, .. }
            | FilterError::ConfigValidationError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            FilterError::ConfigError { .. } => "Review the configuration file".to_string(),
            FilterError::Unexpected { .. } => "Inspect the log file for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FilterError::NotFound { path } => format!("Data file not found: {}", path),
            FilterError::AccessDenied { path, .. } => {
                format!("Access denied while writing {}", path)
            }
            FilterError::Io { path, .. } => format!("Could not read or write {}", path),
            FilterError::Csv(_) => "The data file could not be read".to_string(),
            FilterError::Unexpected { .. } => "An unexpected error occurred".to_string(),
            other => format!("Invalid configuration: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
