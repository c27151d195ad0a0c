use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use common::types::Message;
use models::property;
use service::pagination::Window;
use service::property::{CreateProperty, ListProperties, PropertyDetail, PropertyPatch, SortOrder};

use crate::errors::JsonApiError;
use crate::routes::TOTAL_COUNT_HEADER;
use crate::state::AppState;

const NOT_FOUND: &str = "Property does not exist";

/// Listing query as sent by the admin frontend.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ListPropertiesQuery {
    #[serde(rename = "_start")]
    pub start: Option<u64>,
    /// Row limit, not an end index.
    #[serde(rename = "_end")]
    pub end: Option<u64>,
    #[serde(rename = "_sort")]
    pub sort: Option<String>,
    #[serde(rename = "_order")]
    pub order: Option<String>,
    pub title_like: Option<String>,
    #[serde(rename = "propertyType")]
    pub property_type: Option<String>,
}

impl From<ListPropertiesQuery> for ListProperties {
    fn from(q: ListPropertiesQuery) -> Self {
        ListProperties {
            property_type: q.property_type.unwrap_or_default(),
            title_like: q.title_like.unwrap_or_default(),
            window: Window::new(q.start, q.end),
            order: SortOrder::parse(q.order.as_deref()),
            sort: q.sort,
        }
    }
}

#[utoipa::path(
    get, path = "/api/v1/properties", tag = "properties",
    params(ListPropertiesQuery),
    responses(
        (status = 200, description = "Page of properties; x-total-count carries the filtered total"),
        (status = 500, description = "Store failure", body = crate::openapi::MessageResponse)
    )
)]
pub async fn list(State(state): State<AppState>, Query(q): Query<ListPropertiesQuery>) -> Result<impl IntoResponse, JsonApiError> {
    let page = state
        .properties
        .list(&q.into())
        .await
        .map_err(|e| JsonApiError::from_service(e, NOT_FOUND, "Failed to fetch properties, please try again later"))?;
    Ok(([(TOTAL_COUNT_HEADER, page.total.to_string())], Json(page.items)))
}

#[utoipa::path(
    get, path = "/api/v1/properties/{id}", tag = "properties",
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property with its creator"),
        (status = 404, description = "Not Found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn detail(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<PropertyDetail>, JsonApiError> {
    state
        .properties
        .detail(id)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, NOT_FOUND, "Failed to get the property details, please try again later"))
}

#[utoipa::path(
    post, path = "/api/v1/properties", tag = "properties",
    request_body = crate::openapi::CreatePropertyDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 404, description = "Owner not found", body = crate::openapi::MessageResponse),
        (status = 500, description = "Create Failed", body = crate::openapi::MessageResponse)
    )
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<CreateProperty>) -> Result<Json<property::Model>, JsonApiError> {
    info!(email = %input.email, property_type = %input.property_type, "property_create_request");
    state
        .properties
        .create(input)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, "User not found", "Failed to create property, please try again later"))
}

#[utoipa::path(
    patch, path = "/api/v1/properties/{id}", tag = "properties",
    params(("id" = Uuid, Path, description = "Property ID")),
    request_body = crate::openapi::PropertyPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error", body = crate::openapi::MessageResponse),
        (status = 404, description = "Not Found", body = crate::openapi::MessageResponse),
        (status = 500, description = "Update Failed", body = crate::openapi::MessageResponse)
    )
)]
pub async fn update(State(state): State<AppState>, Path(id): Path<Uuid>, Json(patch): Json<PropertyPatch>) -> Result<Json<property::Model>, JsonApiError> {
    state
        .properties
        .update(id, patch)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, NOT_FOUND, "Failed to update property, please try again later"))
}

#[utoipa::path(
    delete, path = "/api/v1/properties/{id}", tag = "properties",
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageResponse),
        (status = 404, description = "Not Found", body = crate::openapi::MessageResponse),
        (status = 500, description = "Delete Failed", body = crate::openapi::MessageResponse)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<(StatusCode, Json<Message>), JsonApiError> {
    state
        .properties
        .delete(id)
        .await
        .map_err(|e| JsonApiError::from_service(e, NOT_FOUND, "Failed to delete property, please try again later"))?;
    Ok((StatusCode::OK, Json(Message::new("Property deleted successfully"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_maps_window_and_filters() {
        let q: ListPropertiesQuery =
            serde_json::from_value(serde_json::json!({"_start": 10, "_end": 20, "_order": "DESC", "propertyType": "House"})).unwrap();
        let list: ListProperties = q.into();
        assert_eq!(list.window.offset(), 10);
        assert_eq!(list.window.limit(), Some(20));
        assert_eq!(list.order, SortOrder::Desc);
        assert_eq!(list.property_type, "House");
        assert!(list.title_like.is_empty());
    }
}
