//! Network exchange with the remote classification service.
//!
//! A [`Classifier`] turns one [`ClassificationRequest`] into one [`Outcome`].
//! Every failure is caught here and becomes [`Outcome::Failed`]; nothing
//! propagates to the caller as an error. There are no retries.
//!
//! # Wire format
//!
//! ```text
//! POST <endpoint>
//! Content-Type: multipart/form-data; boundary=...
//!
//! --boundary
//! Content-Disposition: form-data; name="file"; filename="bottle.jpg"
//! Content-Type: image/jpeg
//!
//! <raw image bytes>
//! --boundary--
//! ```
//!
//! A successful response body is `{"prediction": "...", "confidence": 0.93}`.

use crate::domain::{
    ClassificationFailure, ClassificationRequest, ClassificationResponse, Outcome, Result,
};
use reqwest::blocking::multipart::{Form, Part};
use std::time::Duration;

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Performs one classification attempt.
pub trait Classifier: Send + Sync {
    /// Sends `request` and maps whatever happens to an [`Outcome`].
    fn classify(&self, request: &ClassificationRequest) -> Outcome;
}

/// [`Classifier`] that talks HTTP to the classification endpoint.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpClassifier {
    /// Builds a client for `endpoint` with a whole-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`BinSmartError::Http`](crate::domain::BinSmartError::Http) if
    /// the TLS backend cannot be initialized.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("binsmart/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn exchange(
        &self,
        request: &ClassificationRequest,
    ) -> std::result::Result<String, ClassificationFailure> {
        let part = Part::bytes(request.payload.to_vec())
            .file_name(request.file_name.clone())
            .mime_str(request.mime_type)
            .map_err(|e| ClassificationFailure::Transport(e.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| ClassificationFailure::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "classifier responded");

        if !status.is_success() {
            return Err(ClassificationFailure::Service {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .map_err(|e| ClassificationFailure::Transport(e.to_string()))
    }
}

impl Classifier for HttpClassifier {
    fn classify(&self, request: &ClassificationRequest) -> Outcome {
        let _span = tracing::info_span!(
            "classify",
            endpoint = %self.endpoint,
            bytes = request.payload.len(),
            mime = request.mime_type
        )
        .entered();

        let outcome = match self.exchange(request) {
            Ok(body) => interpret_body(&body),
            Err(failure) => Outcome::Failed(failure),
        };

        match &outcome {
            Outcome::Accepted(response) => tracing::info!(
                prediction = %response.prediction,
                confidence = response.confidence,
                "classification accepted"
            ),
            Outcome::Rejected(reason) => tracing::info!(?reason, "classification rejected"),
            Outcome::Failed(failure) => tracing::warn!(error = %failure, "classification failed"),
        }

        outcome
    }
}

/// Maps a successful response body to an outcome.
///
/// Malformed bodies fail; well-formed ones go through the confidence gate.
#[must_use]
pub fn interpret_body(body: &str) -> Outcome {
    match ClassificationResponse::parse(body) {
        Ok(response) => Outcome::gate(response),
        Err(failure) => Outcome::Failed(failure),
    }
}
