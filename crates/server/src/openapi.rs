use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageResponse { pub message: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreatePropertyDoc {
    pub title: String,
    pub description: String,
    pub property_type: String,
    pub location: String,
    pub price: f64,
    /// Encoded image, usually a data URI.
    pub photo: String,
    /// Owner email
    pub email: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PropertyPatchDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    pub property_type: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    /// Encoded image to upload, or an http(s) URL stored as-is.
    pub photo: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateUserDoc { pub name: String, pub email: String, pub avatar: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::properties::list,
        crate::routes::properties::detail,
        crate::routes::properties::create,
        crate::routes::properties::update,
        crate::routes::properties::delete,
        crate::routes::users::list,
        crate::routes::users::create,
        crate::routes::users::detail,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            CreatePropertyDoc,
            PropertyPatchDoc,
            CreateUserDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "properties"),
        (name = "users")
    )
)]
pub struct ApiDoc;
