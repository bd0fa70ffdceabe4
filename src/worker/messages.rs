//! Worker thread message types.
//!
//! Requests flow from the interactive loop to the worker as
//! [`WorkerMessage`]s and results come back as [`WorkerResponse`]s. Each
//! request carries the caller's tracing span so the worker's logs nest under
//! the submission that caused them.

use crate::domain::{ClassificationRequest, Outcome};

/// Messages sent to the classification worker.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Classify one image.
    Classify {
        /// Submission this request belongs to.
        submission: u64,
        /// The image payload to send.
        request: ClassificationRequest,
        /// Span of the code that posted the message.
        parent: tracing::Span,
    },

    /// Stop the worker after the current message.
    Shutdown,
}

impl WorkerMessage {
    /// Creates a `Classify` message attached to the current span.
    #[must_use]
    pub fn classify(submission: u64, request: ClassificationRequest) -> Self {
        Self::Classify {
            submission,
            request,
            parent: tracing::Span::current(),
        }
    }
}

/// Responses sent back from the classification worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// A classification attempt finished.
    Classified {
        /// Submission the outcome belongs to.
        submission: u64,
        /// What happened.
        outcome: Outcome,
    },
}
