//! Media host abstraction.
//!
//! Property photos arrive as encoded payloads (usually data URIs) and are
//! exchanged for durable URLs by a [`MediaUploader`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cloudinary;
pub mod mock;

pub use cloudinary::CloudinaryUploader;

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedMedia {
    pub url: String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("empty payload")]
    EmptyPayload,
    #[error("configuration error: {0}")]
    Config(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rejected by media host ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Port for the external media host.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, payload: &str) -> Result<UploadedMedia, UploadError>;
}

/// Payloads that already point at a remote resource are stored as-is.
pub fn is_remote_url(payload: &str) -> bool {
    let p = payload.trim_start();
    p.starts_with("http://") || p.starts_with("https://")
}
