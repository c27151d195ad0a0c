use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use tracing::{error, info, instrument};
use uuid::Uuid;

use models::property::{self, NewProperty};
use models::user;

use crate::errors::ServiceError;
use crate::media::{is_remote_url, MediaUploader};
use crate::property::domain::{CreateProperty, PropertyDetail, PropertyPatch};
use crate::property::query::{ListPage, ListProperties};
use crate::property::unit_of_work::PropertyUnitOfWork;

/// Property workflows over an injected store handle and media uploader.
#[derive(Clone)]
pub struct PropertyService {
    db: DatabaseConnection,
    uploader: Arc<dyn MediaUploader>,
}

impl PropertyService {
    pub fn new(db: DatabaseConnection, uploader: Arc<dyn MediaUploader>) -> Self { Self { db, uploader } }

    /// One page of matching properties and the total number of matches.
    #[instrument(skip(self, q), fields(property_type = %q.property_type, title_like = %q.title_like))]
    pub async fn list(&self, q: &ListProperties) -> Result<ListPage, ServiceError> {
        let total = q.filtered().count(&self.db).await.map_err(ServiceError::db)?;
        let items = q.page().all(&self.db).await.map_err(ServiceError::db)?;
        Ok(ListPage { items, total })
    }

    /// Property with its creator expanded.
    pub async fn detail(&self, id: Uuid) -> Result<PropertyDetail, ServiceError> {
        let (p, creator) = property::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(ServiceError::db)?
            .ok_or(ServiceError::PropertyNotFound(id))?;
        let creator = creator.ok_or_else(|| ServiceError::Integrity(format!("creator {} of property {} missing", p.creator, id)))?;
        Ok(PropertyDetail::from_parts(p, creator))
    }

    /// Create a property and append it to its owner's list atomically.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: CreateProperty) -> Result<property::Model, ServiceError> {
        let uow = PropertyUnitOfWork::begin(&self.db).await?;
        match self.create_in(&uow, input).await {
            Ok(created) => {
                uow.commit().await?;
                info!(property_id = %created.id, creator = %created.creator, "property_created");
                Ok(created)
            }
            Err(e) => {
                uow.abort(&e).await;
                error!(error = %e, "property_create_failed");
                Err(e)
            }
        }
    }

    async fn create_in(&self, uow: &PropertyUnitOfWork, input: CreateProperty) -> Result<property::Model, ServiceError> {
        // Reject bad input before anything reaches the media host.
        property::validate_title(&input.title)?;
        property::validate_property_type(&input.property_type)?;
        property::validate_price(input.price)?;

        let owner = uow
            .lock_user_by_email(&input.email)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(input.email.clone()))?;

        let photo = self.uploader.upload(&input.photo).await?;

        let created = uow
            .insert_property(NewProperty {
                title: input.title,
                description: input.description,
                property_type: input.property_type,
                location: input.location,
                price: input.price,
                photo: photo.url,
                creator: owner.id,
            })
            .await?;

        let mut ids = owner.all_properties.clone();
        ids.push(created.id);
        uow.save_property_ids(owner, ids).await?;
        Ok(created)
    }

    /// Partial single-row update; no transaction needed.
    #[instrument(skip(self, patch), fields(property_id = %id))]
    pub async fn update(&self, id: Uuid, patch: PropertyPatch) -> Result<property::Model, ServiceError> {
        let existing = property::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ServiceError::db)?
            .ok_or(ServiceError::PropertyNotFound(id))?;

        if let Some(t) = &patch.title { property::validate_title(t)?; }
        if let Some(pt) = &patch.property_type { property::validate_property_type(pt)?; }
        if let Some(p) = patch.price { property::validate_price(p)?; }

        let photo = self.resolve_photo(patch.photo.as_deref()).await?;

        let mut am: property::ActiveModel = existing.into();
        if let Some(t) = patch.title {
            am.title_search = Set(property::search_key(&t));
            am.title = Set(t);
        }
        if let Some(d) = patch.description { am.description = Set(d); }
        if let Some(pt) = patch.property_type { am.property_type = Set(pt); }
        if let Some(l) = patch.location { am.location = Set(l); }
        if let Some(p) = patch.price { am.price = Set(p); }
        if let Some(url) = photo { am.photo = Set(url); }
        am.updated_at = Set(Utc::now().into());

        let updated = am.update(&self.db).await.map_err(ServiceError::db)?;
        info!(property_id = %updated.id, "property_updated");
        Ok(updated)
    }

    /// `None` keeps the stored photo; remote URLs are kept literally.
    async fn resolve_photo(&self, payload: Option<&str>) -> Result<Option<String>, ServiceError> {
        match payload {
            None => Ok(None),
            Some(p) if p.trim().is_empty() => Ok(None),
            Some(p) if is_remote_url(p) => Ok(Some(p.to_string())),
            Some(p) => Ok(Some(self.uploader.upload(p).await?.url)),
        }
    }

    /// Delete a property and remove it from its creator's list atomically.
    #[instrument(skip(self), fields(property_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let (existing, creator) = property::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(ServiceError::db)?
            .ok_or(ServiceError::PropertyNotFound(id))?;
        let creator = creator.ok_or_else(|| ServiceError::Integrity(format!("creator {} of property {} missing", existing.creator, id)))?;

        let uow = PropertyUnitOfWork::begin(&self.db).await?;
        match Self::delete_in(&uow, id, creator.id).await {
            Ok(()) => {
                uow.commit().await?;
                info!(property_id = %id, creator = %creator.id, "property_deleted");
                Ok(())
            }
            Err(e) => {
                uow.abort(&e).await;
                error!(error = %e, "property_delete_failed");
                Err(e)
            }
        }
    }

    async fn delete_in(uow: &PropertyUnitOfWork, id: Uuid, creator: Uuid) -> Result<(), ServiceError> {
        if !uow.delete_property(id).await? {
            return Err(ServiceError::PropertyNotFound(id));
        }
        // Re-read under lock so concurrent list edits are not overwritten.
        let owner = uow
            .lock_user(creator)
            .await?
            .ok_or_else(|| ServiceError::Integrity(format!("creator {} missing", creator)))?;
        let mut ids = owner.all_properties.clone();
        ids.remove(id);
        uow.save_property_ids(owner, ids).await?;
        Ok(())
    }
}
