//! Transaction scope for writes spanning `property` and `user`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend,
    EntityTrait, QueryFilter, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::{debug, warn};
use uuid::Uuid;

use models::property::{self, NewProperty};
use models::user::{self, PropertyIds};

use crate::errors::ServiceError;

/// Add `FOR UPDATE` where the backend has row locks. SQLite has none and
/// serializes writers on its own.
fn lock_for(backend: DbBackend, select: Select<user::Entity>) -> Select<user::Entity> {
    match backend {
        DbBackend::Sqlite => select,
        _ => select.lock_exclusive(),
    }
}

/// A single database transaction. Must end in [`commit`](Self::commit) or
/// [`rollback`](Self::rollback); every read and write inside the workflow goes
/// through it.
pub struct PropertyUnitOfWork {
    txn: DatabaseTransaction,
}

impl PropertyUnitOfWork {
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, ServiceError> {
        let txn = db.begin().await.map_err(ServiceError::db)?;
        debug!("unit_of_work_begin");
        Ok(Self { txn })
    }

    fn locked(&self, select: Select<user::Entity>) -> Select<user::Entity> {
        lock_for(self.txn.get_database_backend(), select)
    }

    /// Owner lookup by email, locking the row for the rest of the transaction.
    pub async fn lock_user_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        let select = user::Entity::find().filter(user::Column::Email.eq(email.trim()));
        self.locked(select).one(&self.txn).await.map_err(ServiceError::db)
    }

    pub async fn lock_user(&self, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
        self.locked(user::Entity::find_by_id(id)).one(&self.txn).await.map_err(ServiceError::db)
    }

    pub async fn insert_property(&self, input: NewProperty) -> Result<property::Model, ServiceError> {
        Ok(property::insert(&self.txn, input).await?)
    }

    /// Returns false when no row matched.
    pub async fn delete_property(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = property::Entity::delete_by_id(id).exec(&self.txn).await.map_err(ServiceError::db)?;
        Ok(res.rows_affected > 0)
    }

    pub async fn save_property_ids(&self, owner: user::Model, ids: PropertyIds) -> Result<user::Model, ServiceError> {
        let mut am: user::ActiveModel = owner.into();
        am.all_properties = Set(ids);
        am.update(&self.txn).await.map_err(ServiceError::db)
    }

    pub async fn commit(self) -> Result<(), ServiceError> {
        self.txn.commit().await.map_err(ServiceError::db)?;
        debug!("unit_of_work_commit");
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), ServiceError> {
        self.txn.rollback().await.map_err(ServiceError::db)?;
        debug!("unit_of_work_rollback");
        Ok(())
    }

    /// Roll back after `cause`. A failed rollback is only logged; `cause` stays
    /// the reported error.
    pub async fn abort(self, cause: &ServiceError) {
        if let Err(e) = self.rollback().await {
            warn!(error = %e, cause = %cause, "unit_of_work_rollback_failed");
        }
    }
}
