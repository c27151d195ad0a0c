use thiserror::Error;
use uuid::Uuid;

use crate::media::UploadError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("property not found: {0}")]
    PropertyNotFound(Uuid),
    #[error("database error: {0}")]
    Db(String),
    #[error("integrity error: {0}")]
    Integrity(String),
    #[error("upload failed: {0}")]
    Upload(#[from] UploadError),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn db(e: impl std::fmt::Display) -> Self { Self::Db(e.to_string()) }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::PropertyNotFound(_))
    }

    /// Validation failures raised by the caller's input rather than the store.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Model(models::errors::ModelError::Validation(_)))
    }
}
