//! Error types for toctoc.

pub mod unified;

pub use unified::ErrorCategory;

use thiserror::Error;

use crate::agent::envelope::EnvelopeError;

/// Primary error type for all toctoc operations.
#[derive(Error, Debug)]
pub enum ToctocError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Malformed turn envelope: {reason}")]
    MalformedEnvelope {
        #[source]
        reason: EnvelopeError,
        raw: String,
    },

    #[error("Malformed collected result: {message}")]
    MalformedResult { message: String, raw: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ToctocError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) => ErrorCategory::Network,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Configuration(_) | Self::ConfigFile(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::MalformedEnvelope { .. } | Self::MalformedResult { .. } => {
                ErrorCategory::ModelContract
            }
            Self::InvalidArgument(_) | Self::InvalidState(_) => ErrorCategory::Usage,
            Self::Io(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether the failure came from the model or valuation transport.
    pub fn is_backend(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Authentication
                | ErrorCategory::RateLimit
                | ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::Server
                | ErrorCategory::Api
        )
    }

    /// Whether re-invoking the same turn may succeed.
    ///
    /// Nothing in this crate retries on its own; the caller decides.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit
                | ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::Server
                | ErrorCategory::ModelContract
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ToctocError>;
