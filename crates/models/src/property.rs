use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "property")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    /// `title` folded by [`search_key`]; the listing filter matches on it.
    #[sea_orm(column_type = "Text")]
    #[serde(skip)]
    pub title_search: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub property_type: String,
    pub location: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "Text")]
    pub photo: String,
    pub creator: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Creator,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Creator => Entity::belongs_to(user::Entity)
                .from(Column::Creator)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::Creator.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields of a property about to be inserted. `photo` is already a durable URL.
#[derive(Clone, Debug)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub property_type: String,
    pub location: String,
    pub price: f64,
    pub photo: String,
    pub creator: Uuid,
}

/// Unicode-aware case folding for title search, applied to the stored column
/// and to the needle alike.
pub fn search_key(title: &str) -> String {
    title.to_lowercase()
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    Ok(())
}

pub fn validate_property_type(property_type: &str) -> Result<(), errors::ModelError> {
    if property_type.trim().is_empty() {
        return Err(errors::ModelError::Validation("propertyType required".into()));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), errors::ModelError> {
    if !price.is_finite() || price < 0.0 {
        return Err(errors::ModelError::Validation("price must be a non-negative number".into()));
    }
    Ok(())
}

pub fn validate_new(input: &NewProperty) -> Result<(), errors::ModelError> {
    validate_title(&input.title)?;
    validate_property_type(&input.property_type)?;
    validate_price(input.price)
}

pub async fn insert<C: ConnectionTrait>(db: &C, input: NewProperty) -> Result<Model, errors::ModelError> {
    validate_new(&input)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title_search: Set(search_key(&input.title)),
        title: Set(input.title),
        description: Set(input.description),
        property_type: Set(input.property_type),
        location: Set(input.location),
        price: Set(input.price),
        photo: Set(input.photo),
        creator: Set(input.creator),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
