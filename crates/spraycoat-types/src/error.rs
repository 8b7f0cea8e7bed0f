//! Error types for spraycoat-dashboard

use thiserror::Error;

/// Which level of the option/section structure an index addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Option,
    Section,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Option => write!(f, "option"),
            IndexKind::Section => write!(f, "section"),
        }
    }
}

/// Quote option/section errors.
///
/// Both kinds are caller errors: a correctly wired form never produces them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        len: usize,
    },

    #[error("{kind} id {id} not found")]
    UnknownId { kind: IndexKind, id: String },

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),
}

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Store IO error: {0}")]
    Io(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Session errors
#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("Not signed in")]
    NotSignedIn,

    #[error("Session expired after {0} minutes of inactivity")]
    Expired(i64),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid operation: {0}")]
    Quote(#[from] QuoteError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Auth(#[from] AuthError),

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
}

impl Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True when the error means the addressed record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Store(StoreError::NotFound(_)))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
