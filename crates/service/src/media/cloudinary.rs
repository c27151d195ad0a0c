//! Cloudinary upload adapter.
//!
//! Uses the signed upload API: the request carries `api_key`, `timestamp` and
//! `signature = sha1("timestamp=<ts><api_secret>")`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use configs::MediaConfig;
use serde::Deserialize;
use sha1::{Digest, Sha1};
use tracing::{debug, instrument, warn};

use super::{MediaUploader, UploadError, UploadedMedia};

pub struct CloudinaryUploader {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: Option<String>,
    secure_url: Option<String>,
}

impl CloudinaryUploader {
    pub fn new(cfg: &MediaConfig) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| UploadError::Config(e.to_string()))?;
        let base = cfg.base_url.trim_end_matches('/');
        Ok(Self {
            client,
            endpoint: format!("{base}/v1_1/{}/image/upload", cfg.cloud_name),
            api_key: cfg.api_key.clone(),
            api_secret: cfg.api_secret.clone(),
        })
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }

    fn sign(&self, timestamp: i64) -> String {
        let digest = Sha1::digest(format!("timestamp={timestamp}{}", self.api_secret).as_bytes());
        hex::encode(digest)
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    async fn upload(&self, payload: &str) -> Result<UploadedMedia, UploadError> {
        if payload.trim().is_empty() {
            return Err(UploadError::EmptyPayload);
        }
        let timestamp = Utc::now().timestamp();
        let signature = self.sign(timestamp);
        let timestamp = timestamp.to_string();
        let form = [
            ("file", payload),
            ("api_key", self.api_key.as_str()),
            ("timestamp", timestamp.as_str()),
            ("signature", signature.as_str()),
        ];

        let resp = self.client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "media_upload_rejected");
            return Err(UploadError::Rejected { status: status.as_u16(), message });
        }

        let body: UploadResponse = resp
            .json()
            .await
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;
        let url = body
            .url
            .or(body.secure_url)
            .ok_or_else(|| UploadError::InvalidResponse("missing url".into()))?;
        debug!(%url, "media_uploaded");
        Ok(UploadedMedia { url })
    }
}
