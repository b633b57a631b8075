//! Error types for histoury

use thiserror::Error;

/// Main error type for histoury operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid language: {0}")]
    InvalidLanguage(String),

    /// Every resolution strategy was tried and none produced a landmark
    #[error("No landmark could be identified in the image")]
    NoCandidateFound,

    /// An external provider failed, returned garbage, or timed out
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Summary error: {0}")]
    Summary(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl Error {
    /// Whether a resolution strategy failing with this error should let the
    /// next strategy run
    ///
    /// Bad input and configuration mismatches stop the chain; everything
    /// else is a provider hiccup.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Error::InvalidImage(_) | Error::Config(_) | Error::NoCandidateFound
        )
    }
}

/// Result type alias for histoury operations
pub type Result<T> = std::result::Result<T, Error>;
