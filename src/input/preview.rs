//! Preview store implementations.
//!
//! - [`DirectoryPreviewStore`] writes each preview to its own file so the
//!   terminal can show a path the user can open; the file is deleted on
//!   release.
//! - [`MemoryPreviewStore`] only tracks references. It backs headless runs
//!   and lets tests check that every preview is released exactly once.

use crate::domain::{PreviewStore, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Stores previews as files in a directory.
#[derive(Debug)]
pub struct DirectoryPreviewStore {
    dir: PathBuf,
    next_id: AtomicU64,
}

impl DirectoryPreviewStore {
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            next_id: AtomicU64::new(1),
        }
    }
}

impl PreviewStore for DirectoryPreviewStore {
    fn create(&self, payload: &[u8], extension: &str) -> Result<String> {
        std::fs::create_dir_all(&self.dir)?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let path = self
            .dir
            .join(format!("preview-{}-{id}.{extension}", std::process::id()));
        std::fs::write(&path, payload)?;

        Ok(path.to_string_lossy().into_owned())
    }

    fn release(&self, reference: &str) {
        if let Err(e) = std::fs::remove_file(reference) {
            tracing::debug!(preview = %reference, error = %e, "failed to remove preview file");
        }
    }
}

/// Tracks previews in memory without materializing them.
#[derive(Debug, Default)]
pub struct MemoryPreviewStore {
    next_id: AtomicU64,
    live: Mutex<HashSet<String>>,
    released: Mutex<Vec<String>>,
}

impl MemoryPreviewStore {
    /// Number of previews created and not yet released.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether `reference` is currently live.
    #[must_use]
    pub fn is_live(&self, reference: &str) -> bool {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(reference)
    }

    /// Every release call so far, in order.
    #[must_use]
    pub fn released(&self) -> Vec<String> {
        self.released
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PreviewStore for MemoryPreviewStore {
    fn create(&self, _payload: &[u8], extension: &str) -> Result<String> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let reference = format!("memory://preview/{id}.{extension}");
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(reference.clone());
        Ok(reference)
    }

    fn release(&self, reference: &str) {
        let was_live = self
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(reference);
        if !was_live {
            tracing::warn!(preview = %reference, "release of unknown or already released preview");
        }
        self.released
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(reference.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_store_writes_and_removes_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DirectoryPreviewStore::new(dir.path().join("previews"));

        let reference = store.create(b"pixels", "png").expect("create");
        let path = PathBuf::from(&reference);
        assert_eq!(std::fs::read(&path).expect("read preview"), b"pixels");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));

        store.release(&reference);
        assert!(!path.exists());
    }

    #[test]
    fn memory_store_tracks_live_and_released() {
        let store = MemoryPreviewStore::default();
        let first = store.create(b"a", "png").expect("create");
        let second = store.create(b"b", "jpg").expect("create");
        assert_ne!(first, second);
        assert_eq!(store.live_count(), 2);

        store.release(&first);
        assert!(!store.is_live(&first));
        assert!(store.is_live(&second));
        assert_eq!(store.released(), vec![first]);
    }
}
