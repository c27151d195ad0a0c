use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use models::user;
use service::user_service::{self, UserWithProperties};

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListUsersQuery {
    #[serde(rename = "_end")]
    pub end: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: String,
}

#[utoipa::path(
    get, path = "/api/v1/users", tag = "users",
    params(ListUsersQuery),
    responses((status = 200, description = "All users"))
)]
pub async fn list(State(state): State<AppState>, Query(q): Query<ListUsersQuery>) -> Result<Json<Vec<user::Model>>, JsonApiError> {
    user_service::list_users(&state.db, q.end)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, "User not found", "Failed to fetch users, please try again later"))
}

#[utoipa::path(
    post, path = "/api/v1/users", tag = "users",
    request_body = crate::openapi::CreateUserDoc,
    responses(
        (status = 200, description = "Created or existing user"),
        (status = 400, description = "Validation Error", body = crate::openapi::MessageResponse)
    )
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<CreateUserInput>) -> Result<Json<user::Model>, JsonApiError> {
    user_service::create_user(&state.db, &input.name, &input.email, &input.avatar)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, "User not found", "Failed to create user, please try again later"))
}

#[utoipa::path(
    get, path = "/api/v1/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User with properties"),
        (status = 404, description = "Not Found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn detail(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<UserWithProperties>, JsonApiError> {
    user_service::get_user_with_properties(&state.db, id)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, "User not found", "Failed to get the user, please try again later"))
}
