//! Error types for the BinSmart client.
//!
//! This module defines the crate-wide error type [`BinSmartError`], the
//! [`ClassificationFailure`] carried inside a failed classification outcome,
//! and a [`Result`] alias. Both enums use `thiserror` for their `Error`
//! implementations.
//!
//! A `BinSmartError` is returned to the caller of an operation, while a
//! `ClassificationFailure` is committed to application state and shown to
//! the user verbatim.

use thiserror::Error;

/// The main error type for BinSmart operations.
///
/// Classification failures never surface here; they are converted into
/// [`Outcome::Failed`](crate::domain::Outcome::Failed) at the client boundary.
#[derive(Debug, Error)]
pub enum BinSmartError {
    /// The user tried to do something the current state does not allow.
    ///
    /// Raised when submitting without an image. Recoverable by acquiring one.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The user dismissed the file picker or camera without choosing an image.
    #[error("No file selected")]
    NoFileSelected,

    /// The requested capture source is not available on this machine.
    #[error("Capture unavailable: {0}")]
    CaptureUnavailable(String),

    /// The captured payload contained no bytes.
    #[error("The selected image is empty")]
    EmptyImage,

    /// The captured payload exceeds the configured upload limit.
    #[error("Image is {size} bytes, larger than the {limit} byte limit")]
    ImageTooLarge {
        /// Payload size in bytes.
        size: usize,
        /// Configured maximum in bytes.
        limit: usize,
    },

    /// The captured payload is not in a recognised image format.
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// Filesystem or process I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Communication with the classification worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A report could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BinSmartError {
    /// Message suitable for an inline notice in the UI.
    ///
    /// Validation failures get the same friendly wording the submit form
    /// has always used; everything else falls back to `Display`.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Please select an image first".to_string(),
            other => other.to_string(),
        }
    }
}

/// Why a single classification attempt failed.
///
/// The `Display` output is the exact message committed to
/// [`Phase::Failed`](crate::app::Phase::Failed).
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ClassificationFailure {
    /// The service answered with a non-success HTTP status.
    #[error("Error: {status}")]
    Service {
        /// HTTP status code returned by the classifier.
        status: u16,
    },

    /// The request never produced a response.
    #[error("Failed to process image: {0}")]
    Transport(String),

    /// The response body was not the expected JSON document.
    #[error("Failed to process image: {0}")]
    Malformed(String),
}

/// A specialized `Result` type for BinSmart operations.
pub type Result<T> = std::result::Result<T, BinSmartError>;
