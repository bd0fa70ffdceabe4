//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point that mutates [`AppState`]. It
//! turns user intents and worker responses into transitions, and returns the
//! side effects for the runtime to execute.
//!
//! # Event Types
//!
//! - **Input**: `ImageAcquired`, `Submit`, `Reset`
//! - **Worker**: `WorkerResponse` carrying a tagged classification outcome
//!
//! # Example
//!
//! ```rust
//! use binsmart::app::{handle_event, AppState, Event};
//!
//! let mut state = AppState::new();
//! let (changed, actions) = handle_event(&mut state, Event::Reset)?;
//! assert!(!changed);
//! assert!(actions.is_empty());
//! # Ok::<(), binsmart::domain::BinSmartError>(())
//! ```

use crate::app::modes::Completion;
use crate::app::{Action, Advisory, AppState};
use crate::domain::error::Result;
use crate::domain::ImageAsset;
use crate::worker::WorkerResponse;

/// Occurrences the state machine reacts to.
#[derive(Debug)]
pub enum Event {
    /// A validated image was produced by input acquisition.
    ImageAcquired(ImageAsset),
    /// The user asked to classify the current image.
    Submit,
    /// The user asked to start over.
    Reset,
    /// The worker finished a classification.
    WorkerResponse(WorkerResponse),
}

impl Event {
    const fn kind(&self) -> &'static str {
        match self {
            Self::ImageAcquired(_) => "image_acquired",
            Self::Submit => "submit",
            Self::Reset => "reset",
            Self::WorkerResponse(_) => "worker_response",
        }
    }
}

/// Processes an event, mutates application state, and returns actions.
///
/// The boolean is `true` when the state changed and the screen should be
/// redrawn.
///
/// # Errors
///
/// Returns [`BinSmartError::Validation`](crate::domain::BinSmartError::Validation)
/// when `Submit` arrives with no image. State is left untouched.
pub fn handle_event(state: &mut AppState, event: Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!(
        "handle_event",
        event_type = event.kind(),
        phase = state.phase().name()
    )
    .entered();

    match event {
        Event::ImageAcquired(asset) => Ok((state.acquire(asset), vec![])),
        Event::Submit => match state.begin_submission()? {
            Some((submission, request)) => {
                tracing::info!(submission, bytes = request.payload.len(), "submission started");
                Ok((true, vec![Action::Classify { submission, request }]))
            }
            None => Ok((false, vec![])),
        },
        Event::Reset => Ok((state.reset(), vec![])),
        Event::WorkerResponse(WorkerResponse::Classified {
            submission,
            outcome,
        }) => match state.complete_submission(submission, outcome) {
            Completion::Stale => Ok((false, vec![])),
            Completion::Succeeded | Completion::Failed => Ok((true, vec![])),
            Completion::Rejected => Ok((true, vec![Action::Advise(Advisory::LowConfidence)])),
        },
    }
}
