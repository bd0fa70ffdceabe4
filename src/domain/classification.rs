//! Classification response and outcome types.
//!
//! The remote service answers with a [`ClassificationResponse`]. Every
//! submission attempt resolves to exactly one [`Outcome`]: accepted, rejected
//! by the confidence gate, or failed.

use crate::domain::error::ClassificationFailure;
use serde::{Deserialize, Serialize};

/// Minimum confidence for a result to be shown to the user.
pub const CONFIDENCE_THRESHOLD: f64 = 0.85;

/// Successful response body from the classifier.
///
/// `prediction` is the bin category label; a body without one yields an
/// empty label, which presents as the generic bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    #[serde(default)]
    pub prediction: String,
    pub confidence: f64,
}

impl ClassificationResponse {
    /// Parses and validates a response body.
    ///
    /// A confidence outside `[0.0, 1.0]` breaks the service contract and is
    /// reported as malformed rather than clamped.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationFailure::Malformed`] if the body is not valid
    /// JSON, lacks `confidence`, or carries an out-of-range confidence.
    pub fn parse(body: &str) -> Result<Self, ClassificationFailure> {
        let response: Self = serde_json::from_str(body)
            .map_err(|e| ClassificationFailure::Malformed(e.to_string()))?;

        if !(0.0..=1.0).contains(&response.confidence) {
            return Err(ClassificationFailure::Malformed(format!(
                "confidence {} is outside [0, 1]",
                response.confidence
            )));
        }

        Ok(response)
    }

    /// Whether this response clears the confidence gate.
    #[must_use]
    pub fn is_confident(&self) -> bool {
        self.confidence >= CONFIDENCE_THRESHOLD
    }
}

/// Why a response was withheld from the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// The service's confidence was below [`CONFIDENCE_THRESHOLD`].
    LowConfidence {
        /// The confidence that failed the gate.
        confidence: f64,
    },
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    /// Confident result, safe to present.
    Accepted(ClassificationResponse),
    /// Result withheld by the confidence gate.
    Rejected(RejectReason),
    /// The attempt failed; the failure's `Display` is the user message.
    Failed(ClassificationFailure),
}

impl Outcome {
    /// Applies the confidence gate to a well-formed response.
    #[must_use]
    pub fn gate(response: ClassificationResponse) -> Self {
        if response.is_confident() {
            Self::Accepted(response)
        } else {
            Self::Rejected(RejectReason::LowConfidence {
                confidence: response.confidence,
            })
        }
    }
}
