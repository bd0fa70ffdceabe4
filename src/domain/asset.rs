//! Image asset and preview handle types.
//!
//! An [`ImageAsset`] is the one image the user is currently working with. It
//! owns the raw payload plus a [`PreviewHandle`], a displayable reference
//! created by a [`PreviewStore`]. The handle releases itself when dropped, so
//! replacing or discarding an asset releases its preview exactly once.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Which capture mechanism produced an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureSource {
    /// Chosen through a file picker or given as a path.
    File,
    /// Taken with a camera.
    Camera,
}

impl fmt::Display for CaptureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Camera => write!(f, "camera"),
        }
    }
}

/// Creates and releases displayable preview references.
///
/// Implementations decide what a reference is (a file path, an in-memory
/// key). `release` is called exactly once per reference by [`PreviewHandle`].
pub trait PreviewStore: Send + Sync {
    /// Registers a preview for `payload` and returns its reference.
    ///
    /// `extension` is a file extension hint for the detected format.
    ///
    /// # Errors
    ///
    /// Returns an error if the preview cannot be materialized.
    fn create(&self, payload: &[u8], extension: &str) -> crate::domain::Result<String>;

    /// Releases a reference previously returned by `create`.
    fn release(&self, reference: &str);
}

/// Owned preview reference that is released when dropped.
pub struct PreviewHandle {
    reference: String,
    store: Arc<dyn PreviewStore>,
}

impl PreviewHandle {
    /// Creates a preview for `payload` in `store`.
    ///
    /// # Errors
    ///
    /// Propagates the store's creation error.
    pub fn create(
        store: Arc<dyn PreviewStore>,
        payload: &[u8],
        extension: &str,
    ) -> crate::domain::Result<Self> {
        let reference = store.create(payload, extension)?;
        tracing::debug!(preview = %reference, "preview created");
        Ok(Self { reference, store })
    }

    /// The displayable reference, e.g. a path the user can open.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        tracing::debug!(preview = %self.reference, "preview released");
        self.store.release(&self.reference);
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}

/// The single live image in the application.
///
/// Not `Clone`: there is only ever one owner, and dropping it releases the
/// preview. The payload itself is shared cheaply with in-flight requests.
#[derive(Debug)]
pub struct ImageAsset {
    payload: Arc<[u8]>,
    source: CaptureSource,
    mime_type: &'static str,
    file_name: Option<String>,
    dimensions: Option<(u32, u32)>,
    captured_at: DateTime<Utc>,
    preview: PreviewHandle,
}

impl ImageAsset {
    /// Assembles an asset from already-validated parts.
    #[must_use]
    pub fn new(
        payload: Arc<[u8]>,
        source: CaptureSource,
        mime_type: &'static str,
        file_name: Option<String>,
        dimensions: Option<(u32, u32)>,
        preview: PreviewHandle,
    ) -> Self {
        Self {
            payload,
            source,
            mime_type,
            file_name,
            dimensions,
            captured_at: Utc::now(),
            preview,
        }
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    #[must_use]
    pub const fn source(&self) -> CaptureSource {
        self.source
    }

    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    #[must_use]
    pub const fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    #[must_use]
    pub const fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    #[must_use]
    pub fn preview(&self) -> &str {
        self.preview.reference()
    }

    /// Builds the request that carries this asset to the classifier.
    #[must_use]
    pub fn to_request(&self) -> ClassificationRequest {
        ClassificationRequest {
            payload: Arc::clone(&self.payload),
            file_name: self
                .file_name
                .clone()
                .unwrap_or_else(|| format!("{}-capture", self.source)),
            mime_type: self.mime_type,
        }
    }
}

/// One asset's payload, packaged for a single classification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    /// Raw image bytes.
    pub payload: Arc<[u8]>,
    /// File name sent with the multipart part.
    pub file_name: String,
    /// MIME type sent with the multipart part.
    pub mime_type: &'static str,
}
