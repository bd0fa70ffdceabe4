//! Side effects requested by the event handler.
//!
//! The handler never touches the network or the terminal. It returns
//! [`Action`]s and the runtime executes them in order.
//!
//! # Example
//!
//! ```rust
//! use binsmart::app::{Action, Advisory};
//!
//! let actions = vec![Action::Advise(Advisory::LowConfidence)];
//! assert_eq!(actions[0], Action::Advise(Advisory::LowConfidence));
//! ```

use crate::domain::ClassificationRequest;
use crate::presenter::LOW_CONFIDENCE_ADVISORY;

/// Commands for the runtime to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sends the image to the classification service.
    ///
    /// The outcome comes back later as an event tagged with `submission`.
    Classify {
        /// Submission the outcome must be matched against.
        submission: u64,
        /// Image payload and metadata.
        request: ClassificationRequest,
    },

    /// Shows a one-time notice to the user.
    Advise(Advisory),
}

/// Notices that do not belong to any single state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// The service answered but the confidence gate withheld the result.
    LowConfidence,
}

impl Advisory {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::LowConfidence => LOW_CONFIDENCE_ADVISORY,
        }
    }
}
