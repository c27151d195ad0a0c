#![cfg(test)]
use sea_orm::DatabaseConnection;

use models::user;

use crate::property::CreateProperty;

/// Fresh migrated in-memory database; every test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

pub async fn seed_owner(db: &DatabaseConnection, email: &str) -> Result<user::Model, anyhow::Error> {
    Ok(user::create(db, "Owner", email, "").await?)
}

pub fn sample_create(email: &str, title: &str, property_type: &str) -> CreateProperty {
    CreateProperty {
        title: title.into(),
        description: "A place".into(),
        property_type: property_type.into(),
        location: "Lakeside".into(),
        price: 250_000.0,
        photo: "data:image/png;base64,iVBORw0KGgo=".into(),
        email: email.into(),
    }
}
