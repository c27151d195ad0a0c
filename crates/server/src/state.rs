use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::media::MediaUploader;
use service::PropertyService;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub properties: PropertyService,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection, uploader: Arc<dyn MediaUploader>) -> Self {
        Self { properties: PropertyService::new(db.clone(), uploader), db }
    }
}
