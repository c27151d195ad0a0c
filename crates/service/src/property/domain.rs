use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::{property, user};

/// Create input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProperty {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub property_type: String,
    #[serde(default)]
    pub location: String,
    pub price: f64,
    /// Encoded image payload handed to the media host.
    pub photo: String,
    /// Owner email.
    pub email: String,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub property_type: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub photo: Option<String>,
}

/// Property with its creator expanded to the full user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetail {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub property_type: String,
    pub location: String,
    pub price: f64,
    pub photo: String,
    pub creator: user::Model,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl PropertyDetail {
    pub fn from_parts(p: property::Model, creator: user::Model) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            property_type: p.property_type,
            location: p.location,
            price: p.price,
            photo: p.photo,
            creator,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
