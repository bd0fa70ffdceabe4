//! Application state and its transitions.
//!
//! [`AppState`] is the single source of truth. It wraps one [`Phase`] value
//! and only changes through the transition methods below, which the event
//! handler calls. Because [`ImageAsset`] releases its preview when dropped,
//! every transition that replaces or discards an asset releases the old
//! preview as a side effect of moving the phase.
//!
//! # Transitions
//!
//! ```text
//! from                          event            to
//! Empty | Ready | Succeeded |   acquire          Ready
//!   Failed
//! Ready                         submit           Submitting
//! Submitting                    accepted         Succeeded
//! Submitting                    low confidence   Empty, with an advisory
//! Submitting                    failure          Failed
//! any                           reset            Empty
//! ```

use crate::app::modes::{Completion, Phase};
use crate::domain::{
    BinSmartError, ClassificationRequest, ClassificationResponse, ImageAsset, Outcome, Result,
};
use crate::presenter;
use crate::ui::viewmodel::{FooterInfo, HeaderInfo, ImageInfo, ScreenViewModel, SubmitInfo};
use chrono::Datelike;

/// Central application state container.
#[derive(Debug, Default)]
pub struct AppState {
    phase: Phase,
    next_submission: u64,
}

impl AppState {
    /// Creates a state in [`Phase::Empty`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The live image, if any.
    #[must_use]
    pub const fn asset(&self) -> Option<&ImageAsset> {
        self.phase.asset()
    }

    /// The committed result, if the last submission succeeded.
    #[must_use]
    pub const fn response(&self) -> Option<&ClassificationResponse> {
        match &self.phase {
            Phase::Succeeded { response, .. } => Some(response),
            _ => None,
        }
    }

    /// The committed failure message, if the last submission failed.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    /// Whether the submit affordance is enabled.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        matches!(self.phase, Phase::Ready(_))
    }

    /// Makes `asset` the live image, releasing any previous one.
    ///
    /// Ignored while a submission is in flight; the offered asset is dropped
    /// and its preview released. Returns whether the state changed.
    pub fn acquire(&mut self, asset: ImageAsset) -> bool {
        if self.is_submitting() {
            tracing::debug!("acquire ignored while submitting");
            return false;
        }

        let previous = std::mem::replace(&mut self.phase, Phase::Ready(asset));
        tracing::debug!(previous = previous.name(), "image accepted");
        true
    }

    /// Moves `Ready` to `Submitting` and returns the request to send.
    ///
    /// Returns `Ok(None)` when a submission is in flight or an outcome is
    /// already committed, since the submit affordance is disabled there.
    ///
    /// # Errors
    ///
    /// [`BinSmartError::Validation`] when there is no image.
    pub fn begin_submission(&mut self) -> Result<Option<(u64, ClassificationRequest)>> {
        match std::mem::take(&mut self.phase) {
            Phase::Empty => Err(BinSmartError::Validation("no image".to_string())),
            Phase::Ready(asset) => {
                self.next_submission += 1;
                let submission = self.next_submission;
                let request = asset.to_request();
                self.phase = Phase::Submitting { asset, submission };
                Ok(Some((submission, request)))
            }
            other => {
                tracing::debug!(phase = other.name(), "submit ignored");
                self.phase = other;
                Ok(None)
            }
        }
    }

    /// Records the outcome of `submission`.
    ///
    /// Outcomes for anything other than the in-flight submission are dropped.
    pub fn complete_submission(&mut self, submission: u64, outcome: Outcome) -> Completion {
        let asset = match std::mem::take(&mut self.phase) {
            Phase::Submitting {
                asset,
                submission: current,
            } if current == submission => asset,
            other => {
                tracing::debug!(
                    submission,
                    phase = other.name(),
                    "discarding outcome for a submission that is not in flight"
                );
                self.phase = other;
                return Completion::Stale;
            }
        };

        match outcome {
            Outcome::Accepted(response) => {
                self.phase = Phase::Succeeded { asset, response };
                Completion::Succeeded
            }
            Outcome::Rejected(reason) => {
                tracing::info!(?reason, "result withheld by confidence gate");
                drop(asset);
                Completion::Rejected
            }
            Outcome::Failed(failure) => {
                self.phase = Phase::Failed {
                    asset,
                    message: failure.to_string(),
                };
                Completion::Failed
            }
        }
    }

    /// Returns to `Empty`, releasing the image and any outcome.
    ///
    /// A no-op from `Empty`. Resetting while submitting abandons the request;
    /// its outcome will no longer match and is dropped. Returns whether the
    /// state changed.
    pub fn reset(&mut self) -> bool {
        if matches!(self.phase, Phase::Empty) {
            return false;
        }

        let previous = std::mem::take(&mut self.phase);
        if let Phase::Submitting { submission, .. } = previous {
            tracing::info!(submission, "submission abandoned by reset");
        }
        tracing::debug!(previous = previous.name(), "state reset");
        true
    }

    /// Computes the renderable view of the current state.
    ///
    /// Notices are owned by the runtime and start out empty here.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ScreenViewModel {
        ScreenViewModel {
            header: HeaderInfo {
                title: "BinSmart".to_string(),
                status: self.phase.name().to_string(),
            },
            image: self.asset().map(ImageInfo::from_asset),
            submit: SubmitInfo {
                enabled: self.can_submit(),
                label: if self.is_submitting() {
                    "Processing...".to_string()
                } else {
                    "Classify Waste".to_string()
                },
            },
            error: self.failure_message().map(ToString::to_string),
            result: self.response().map(presenter::present),
            notices: vec![],
            footer: self.compute_footer(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.phase {
            Phase::Empty => "open <path>  file: browse  camera: take photo  about  quit",
            Phase::Ready(_) => "submit: classify  reset: remove image  open <path>  file  camera  quit",
            Phase::Submitting { .. } => "Processing... submit is disabled  reset: abandon  quit",
            Phase::Succeeded { .. } => "reset: classify another image  open <path>  file  camera  quit",
            Phase::Failed { .. } => "reset: start over  open <path>  file  camera  quit",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
            credits: presenter::credits(chrono::Local::now().year()),
        }
    }
}
