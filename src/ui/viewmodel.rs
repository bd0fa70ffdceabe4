//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold
//! display-ready data only; deciding what to show happens before this point.
//!
//! # Example
//!
//! ```rust
//! use binsmart::app::AppState;
//!
//! let vm = AppState::new().compute_viewmodel();
//! assert!(vm.image.is_none());
//! assert!(!vm.submit.enabled);
//! assert_eq!(vm.submit.label, "Classify Waste");
//! ```

use crate::domain::{CaptureSource, ImageAsset};
use crate::presenter::ResultView;

/// Complete screen view model.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenViewModel {
    pub header: HeaderInfo,

    /// The live image, if any.
    pub image: Option<ImageInfo>,

    /// State of the submit affordance.
    pub submit: SubmitInfo,

    /// Failure message of the last submission.
    pub error: Option<String>,

    /// Display data of an accepted result.
    pub result: Option<ResultView>,

    /// One-time messages queued by the runtime.
    pub notices: Vec<String>,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
    /// Current phase name.
    pub status: String,
}

/// What is known about the live image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Preview reference, e.g. a file path the user can open.
    pub preview: String,
    pub source: CaptureSource,
    pub file_name: Option<String>,
    pub mime_type: &'static str,
    pub size_bytes: usize,
    pub dimensions: Option<(u32, u32)>,
    /// Local capture time, `HH:MM:SS`.
    pub captured_at: String,
}

impl ImageInfo {
    #[must_use]
    pub fn from_asset(asset: &ImageAsset) -> Self {
        Self {
            preview: asset.preview().to_string(),
            source: asset.source(),
            file_name: asset.file_name().map(ToString::to_string),
            mime_type: asset.mime_type(),
            size_bytes: asset.size(),
            dimensions: asset.dimensions(),
            captured_at: asset
                .captured_at()
                .with_timezone(&chrono::Local)
                .format("%H:%M:%S")
                .to_string(),
        }
    }
}

/// Submit affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitInfo {
    /// Whether `submit` would start a classification.
    pub enabled: bool,
    /// `"Processing..."` while in flight, `"Classify Waste"` otherwise.
    pub label: String,
}

/// Footer display information.
///
/// Contains command hints and the copyright line for the bottom of the
/// screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
    pub credits: String,
}
