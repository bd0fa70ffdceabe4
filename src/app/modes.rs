//! Finite-state types for the classification flow.
//!
//! [`Phase`] owns the live image in every non-empty state, so the compiler
//! rules out "result without image" and "two images" combinations.

use crate::domain::{ClassificationResponse, ImageAsset};

/// The application's finite state.
#[derive(Debug, Default)]
pub enum Phase {
    /// No image.
    #[default]
    Empty,
    /// One image, ready to submit.
    Ready(ImageAsset),
    /// The image is being classified.
    Submitting {
        asset: ImageAsset,
        /// Identifies the in-flight request.
        submission: u64,
    },
    /// A confident result for the image.
    Succeeded {
        asset: ImageAsset,
        response: ClassificationResponse,
    },
    /// The last attempt failed.
    Failed {
        asset: ImageAsset,
        /// User-facing failure message.
        message: String,
    },
}

impl Phase {
    /// Short name for logs and status lines.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Ready(_) => "ready",
            Self::Submitting { .. } => "submitting",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }

    #[must_use]
    pub const fn asset(&self) -> Option<&ImageAsset> {
        match self {
            Self::Empty => None,
            Self::Ready(asset)
            | Self::Submitting { asset, .. }
            | Self::Succeeded { asset, .. }
            | Self::Failed { asset, .. } => Some(asset),
        }
    }
}

/// What recording an outcome did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome did not belong to the in-flight submission.
    Stale,
    /// A confident result was committed.
    Succeeded,
    /// The result was withheld and the state reset.
    Rejected,
    /// A failure message was committed.
    Failed,
}
