//! Domain layer for the BinSmart client.
//!
//! Core types shared by every other layer, independent of the terminal UI,
//! the HTTP stack, or the capture devices.
//!
//! # Organization
//!
//! - [`asset`]: the image asset, its preview handle and the classification request
//! - [`classification`]: response, outcome and the confidence gate
//! - [`error`]: error types and result alias

pub mod asset;
pub mod classification;
pub mod error;

pub use asset::{CaptureSource, ClassificationRequest, ImageAsset, PreviewHandle, PreviewStore};
pub use classification::{ClassificationResponse, Outcome, RejectReason, CONFIDENCE_THRESHOLD};
pub use error::{BinSmartError, ClassificationFailure, Result};
