use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::info;

use models::{property, user};
use crate::errors::ServiceError;

/// User with `allProperties` resolved to full property records, in list order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithProperties {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub all_properties: Vec<property::Model>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

/// Register a user, or return the existing one when the email is taken.
pub async fn create_user(db: &DatabaseConnection, name: &str, email: &str, avatar: &str) -> Result<user::Model, ServiceError> {
    if let Some(existing) = user::find_by_email(db, email).await? {
        return Ok(existing);
    }
    match user::create(db, name, email, avatar).await {
        Ok(created) => {
            info!(user_id = %created.id, email = %created.email, "user_created");
            Ok(created)
        }
        // lost a race on the unique email; the winner's row is the answer
        Err(e @ models::errors::ModelError::Db(_)) => match user::find_by_email(db, email).await? {
            Some(existing) => Ok(existing),
            None => Err(e.into()),
        },
        Err(e) => Err(e.into()),
    }
}

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
    let found = user::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)?;
    Ok(found)
}

/// Get a user with the properties they own.
pub async fn get_user_with_properties(db: &DatabaseConnection, id: Uuid) -> Result<UserWithProperties, ServiceError> {
    let u = get_user(db, id).await?.ok_or_else(|| ServiceError::UserNotFound(id.to_string()))?;
    let ids = u.all_properties.0.clone();
    let mut by_id: HashMap<Uuid, property::Model> = if ids.is_empty() {
        HashMap::new()
    } else {
        property::Entity::find()
            .filter(property::Column::Id.is_in(ids.clone()))
            .all(db)
            .await
            .map_err(ServiceError::db)?
            .into_iter()
            .map(|p| (p.id, p))
            .collect()
    };
    let all_properties = ids.iter().filter_map(|pid| by_id.remove(pid)).collect();
    Ok(UserWithProperties { id: u.id, name: u.name, email: u.email, avatar: u.avatar, all_properties, created_at: u.created_at })
}

/// List users, newest last; `limit` of `None` or `0` returns everyone.
pub async fn list_users(db: &DatabaseConnection, limit: Option<u64>) -> Result<Vec<user::Model>, ServiceError> {
    let mut select = user::Entity::find().order_by_asc(user::Column::CreatedAt);
    if let Some(l) = limit.filter(|l| *l > 0) {
        select = select.limit(l);
    }
    let users = select.all(db).await.map_err(ServiceError::db)?;
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::media::mock::StaticUploader;
    use crate::test_support::{get_db, sample_create};
    use crate::PropertyService;

    #[tokio::test]
    async fn user_create_is_idempotent_per_email() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_user(&db, "Ann", "ann@example.com", "https://a/x.png").await?;
        let b = create_user(&db, "Someone else", "ann@example.com", "").await?;
        assert_eq!(a.id, b.id);
        assert_eq!(b.name, "Ann");
        assert_eq!(list_users(&db, None).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn user_with_properties_keeps_list_order() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let owner = create_user(&db, "Owner", "owner@example.com", "").await?;
        let svc = PropertyService::new(db.clone(), Arc::new(StaticUploader::default()));
        let first = svc.create(sample_create("owner@example.com", "First", "House")).await?;
        let second = svc.create(sample_create("owner@example.com", "Second", "Flat")).await?;

        let full = get_user_with_properties(&db, owner.id).await?;
        let ids: Vec<Uuid> = full.all_properties.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        Ok(())
    }

    #[tokio::test]
    async fn missing_user_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = get_user_with_properties(&db, Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn list_users_honours_limit() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        for i in 0..3 {
            create_user(&db, "U", &format!("u{i}@example.com"), "").await?;
        }
        assert_eq!(list_users(&db, Some(2)).await?.len(), 2);
        assert_eq!(list_users(&db, Some(0)).await?.len(), 3);
        Ok(())
    }
}
