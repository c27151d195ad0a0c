//! In-process uploaders for tests and local runs without a media host.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{MediaUploader, UploadError, UploadedMedia};

/// Returns `<base>/<n>.jpg` for the n-th upload.
pub struct StaticUploader {
    base: String,
    calls: AtomicUsize,
}

impl StaticUploader {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into(), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

impl Default for StaticUploader {
    fn default() -> Self { Self::new("https://media.test/photos") }
}

#[async_trait]
impl MediaUploader for StaticUploader {
    async fn upload(&self, payload: &str) -> Result<UploadedMedia, UploadError> {
        if payload.trim().is_empty() {
            return Err(UploadError::EmptyPayload);
        }
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(UploadedMedia { url: format!("{}/{}.jpg", self.base.trim_end_matches('/'), n) })
    }
}

/// Fails every upload.
#[derive(Default)]
pub struct FailingUploader;

#[async_trait]
impl MediaUploader for FailingUploader {
    async fn upload(&self, _payload: &str) -> Result<UploadedMedia, UploadError> {
        Err(UploadError::Transport("media host unreachable".into()))
    }
}
