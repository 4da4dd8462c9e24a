//! Unified error handling for the tweetlens crate
//!
//! Domain errors (`AnalysisError`, `DatasetError`, `TrendError`) stay
//! usable on their own; [`Error`] wraps them so callers crossing module
//! boundaries deal with one type.

use std::io;
use thiserror::Error;

pub use crate::analytics::{AnalysisError, TrendError};
pub use crate::dataset::DatasetError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Caller passed an unusable parameter
    InvalidInput,
    /// Dataset could not be read or parsed
    Dataset,
    /// Serialization failures
    Serialization,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid input",
            Self::Dataset => "dataset",
            Self::Serialization => "serialization",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

/// Unified error type for the tweetlens crate
#[derive(Error, Debug)]
pub enum Error {
    /// Keyword engine errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Trend computation errors
    #[error("Trend error: {0}")]
    Trend(#[from] TrendError),

    /// Dataset loading errors
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Analysis(_) | Self::Trend(_) => ErrorCategory::InvalidInput,
            Self::Dataset(DatasetError::InvalidDateRange(..)) => ErrorCategory::InvalidInput,
            Self::Dataset(_) | Self::Io(_) => ErrorCategory::Dataset,
            Self::Json(_) => ErrorCategory::Serialization,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
