//! Image acquisition from the file picker, the camera, or a known path.
//!
//! [`InputAcquisition`] owns two [`CaptureDevice`] capabilities and a
//! [`PreviewStore`](crate::domain::PreviewStore). Whatever the source, raw
//! bytes go through the same normalization: size and format checks, MIME
//! detection, and preview creation.
//!
//! # Example
//!
//! ```
//! use binsmart::input::{InputAcquisition, MemoryPreviewStore, UnavailableDevice};
//! use std::sync::Arc;
//!
//! let input = InputAcquisition::new(
//!     Box::new(UnavailableDevice::new("no picker")),
//!     Box::new(UnavailableDevice::new("no camera")),
//!     Arc::new(MemoryPreviewStore::default()),
//!     10 * 1024 * 1024,
//! );
//! assert!(input.acquire_from_camera().is_err());
//! ```

pub mod devices;
pub mod preview;

pub use devices::{
    CommandDevice, CommandOutput, DialogFilePicker, UnavailableDevice, IMAGE_EXTENSIONS,
};
pub use preview::{DirectoryPreviewStore, MemoryPreviewStore};

use crate::domain::{BinSmartError, CaptureSource, ImageAsset, PreviewHandle, PreviewStore, Result};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Bytes handed back by a capture device before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCapture {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
}

impl RawCapture {
    /// Reads a capture from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`BinSmartError::Io`] if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(Self { bytes, file_name })
    }
}

/// A platform facility that yields one image on request.
///
/// `Ok(None)` means the user dismissed the picker or camera.
pub trait CaptureDevice: Send {
    /// Asks the platform for one image.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is unavailable or fails.
    fn capture(&self) -> Result<Option<RawCapture>>;
}

/// Turns user captures into [`ImageAsset`]s.
pub struct InputAcquisition {
    file_picker: Box<dyn CaptureDevice>,
    camera: Box<dyn CaptureDevice>,
    previews: Arc<dyn PreviewStore>,
    max_image_bytes: usize,
}

impl InputAcquisition {
    #[must_use]
    pub fn new(
        file_picker: Box<dyn CaptureDevice>,
        camera: Box<dyn CaptureDevice>,
        previews: Arc<dyn PreviewStore>,
        max_image_bytes: usize,
    ) -> Self {
        Self {
            file_picker,
            camera,
            previews,
            max_image_bytes,
        }
    }

    /// Asks the file picker for an image.
    ///
    /// # Errors
    ///
    /// [`BinSmartError::NoFileSelected`] if the picker was cancelled, or a
    /// validation error from normalization.
    pub fn acquire_from_file(&self) -> Result<ImageAsset> {
        self.acquire(CaptureSource::File, self.file_picker.as_ref())
    }

    /// Asks the camera for a photo.
    ///
    /// # Errors
    ///
    /// [`BinSmartError::NoFileSelected`] if the capture was cancelled, or a
    /// validation error from normalization.
    pub fn acquire_from_camera(&self) -> Result<ImageAsset> {
        self.acquire(CaptureSource::Camera, self.camera.as_ref())
    }

    /// Loads an image the user already chose by path.
    ///
    /// # Errors
    ///
    /// [`BinSmartError::Io`] if the file cannot be read, or a validation
    /// error from normalization. Oversized files are refused from their
    /// metadata, before any bytes are read.
    pub fn acquire_from_path(&self, path: &Path) -> Result<ImageAsset> {
        let _span = tracing::debug_span!("acquire_from_path", path = %path.display()).entered();

        let on_disk = std::fs::metadata(path)?.len();
        if on_disk > self.max_image_bytes as u64 {
            return Err(BinSmartError::ImageTooLarge {
                size: usize::try_from(on_disk).unwrap_or(usize::MAX),
                limit: self.max_image_bytes,
            });
        }

        let raw = RawCapture::from_path(path)?;
        self.normalize(CaptureSource::File, raw)
    }

    fn acquire(&self, source: CaptureSource, device: &dyn CaptureDevice) -> Result<ImageAsset> {
        let _span = tracing::debug_span!("acquire", %source).entered();

        match device.capture()? {
            Some(raw) => self.normalize(source, raw),
            None => {
                tracing::debug!("capture cancelled by user");
                Err(BinSmartError::NoFileSelected)
            }
        }
    }

    fn normalize(&self, source: CaptureSource, raw: RawCapture) -> Result<ImageAsset> {
        let size = raw.bytes.len();
        if size == 0 {
            return Err(BinSmartError::EmptyImage);
        }
        if size > self.max_image_bytes {
            return Err(BinSmartError::ImageTooLarge {
                size,
                limit: self.max_image_bytes,
            });
        }

        let format = image::guess_format(&raw.bytes)
            .map_err(|e| BinSmartError::UnsupportedImage(e.to_string()))?;

        let dimensions = image::ImageReader::with_format(Cursor::new(&raw.bytes[..]), format)
            .into_dimensions()
            .ok();

        let extension = format.extensions_str().first().copied().unwrap_or("img");
        let payload: Arc<[u8]> = Arc::from(raw.bytes);
        let preview = PreviewHandle::create(Arc::clone(&self.previews), &payload, extension)?;

        tracing::debug!(
            %source,
            size,
            format = ?format,
            dimensions = ?dimensions,
            "image acquired"
        );

        Ok(ImageAsset::new(
            payload,
            source,
            format.to_mime_type(),
            raw.file_name,
            dimensions,
            preview,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Smallest valid PNG: 1x1 transparent pixel.
    pub(crate) const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    struct Scripted(Option<RawCapture>);

    impl CaptureDevice for Scripted {
        fn capture(&self) -> Result<Option<RawCapture>> {
            Ok(self.0.clone())
        }
    }

    fn png_capture() -> RawCapture {
        RawCapture {
            bytes: TINY_PNG.to_vec(),
            file_name: Some("bottle.png".into()),
        }
    }

    fn acquisition(
        file: Option<RawCapture>,
        camera: Option<RawCapture>,
        store: Arc<MemoryPreviewStore>,
    ) -> InputAcquisition {
        InputAcquisition::new(
            Box::new(Scripted(file)),
            Box::new(Scripted(camera)),
            store,
            1024,
        )
    }

    #[test]
    fn file_and_camera_normalize_the_same_way() {
        let store = Arc::new(MemoryPreviewStore::default());
        let input = acquisition(Some(png_capture()), Some(png_capture()), store.clone());

        let from_file = input.acquire_from_file().expect("file capture");
        let from_camera = input.acquire_from_camera().expect("camera capture");

        assert_eq!(from_file.source(), CaptureSource::File);
        assert_eq!(from_camera.source(), CaptureSource::Camera);
        for asset in [&from_file, &from_camera] {
            assert_eq!(asset.mime_type(), "image/png");
            assert_eq!(asset.dimensions(), Some((1, 1)));
            assert_eq!(asset.payload(), TINY_PNG);
        }
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn cancelled_picker_is_no_file_selected() {
        let store = Arc::new(MemoryPreviewStore::default());
        let input = acquisition(None, None, store.clone());

        assert!(matches!(
            input.acquire_from_file(),
            Err(BinSmartError::NoFileSelected)
        ));
        assert!(matches!(
            input.acquire_from_camera(),
            Err(BinSmartError::NoFileSelected)
        ));
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn rejects_empty_oversized_and_non_image_payloads() {
        let store = Arc::new(MemoryPreviewStore::default());

        let empty = RawCapture { bytes: vec![], file_name: None };
        let input = acquisition(Some(empty), None, store.clone());
        assert!(matches!(input.acquire_from_file(), Err(BinSmartError::EmptyImage)));

        let huge = RawCapture { bytes: vec![0; 2048], file_name: None };
        let input = acquisition(Some(huge), None, store.clone());
        assert!(matches!(
            input.acquire_from_file(),
            Err(BinSmartError::ImageTooLarge { size: 2048, limit: 1024 })
        ));

        let text = RawCapture { bytes: b"not an image".to_vec(), file_name: None };
        let input = acquisition(Some(text), None, store.clone());
        assert!(matches!(
            input.acquire_from_file(),
            Err(BinSmartError::UnsupportedImage(_))
        ));

        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn acquires_from_path_with_file_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("can.png");
        std::fs::write(&path, TINY_PNG).expect("write png");

        let store = Arc::new(MemoryPreviewStore::default());
        let input = acquisition(None, None, store);
        let asset = input.acquire_from_path(&path).expect("path capture");

        assert_eq!(asset.file_name(), Some("can.png"));
        assert_eq!(asset.source(), CaptureSource::File);
    }

    #[test]
    fn oversized_path_is_refused_before_reading() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("huge.png");
        let file = std::fs::File::create(&path).expect("create");
        file.set_len(1 << 30).expect("sparse length");

        let store = Arc::new(MemoryPreviewStore::default());
        let input = acquisition(None, None, store.clone());

        assert!(matches!(
            input.acquire_from_path(&path),
            Err(BinSmartError::ImageTooLarge { size, limit: 1024 }) if size == 1 << 30
        ));
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn missing_path_is_io_error() {
        let store = Arc::new(MemoryPreviewStore::default());
        let input = acquisition(None, None, store);
        assert!(matches!(
            input.acquire_from_path(Path::new("/definitely/not/here.png")),
            Err(BinSmartError::Io(_))
        ));
    }
}
