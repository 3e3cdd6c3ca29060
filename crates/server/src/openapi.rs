use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Stored pet document as returned by every pet endpoint.
#[derive(Serialize, ToSchema)]
pub struct PetDoc {
    #[serde(rename = "_id")]
    #[schema(format = Uuid)]
    pub id: String,
    pub petname: String,
    pub pettype: String,
    pub petbreed: String,
    pub petage: String,
    pub description: Option<String>,
    pub location: String,
    #[schema(example = "/public/pets/rex.png")]
    pub image: Option<String>,
    #[schema(example = "available")]
    pub status: String,
    #[schema(format = DateTime)]
    pub created_at: String,
    #[schema(format = DateTime)]
    pub updated_at: String,
}

/// Multipart form accepted by create and update. On update every part is optional.
#[derive(ToSchema)]
pub struct PetFormDoc {
    pub petname: Option<String>,
    pub pettype: Option<String>,
    pub petbreed: Option<String>,
    pub petage: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Required on create; content type must start with `image`.
    #[schema(value_type = String, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub status: u16,
    pub error: String,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::pets::create,
        crate::routes::pets::update,
        crate::routes::pets::get_all,
        crate::routes::pets::get_by_id,
        crate::routes::pets::delete,
        crate::routes::pets::search,
    ),
    components(
        schemas(
            HealthResponse,
            PetDoc,
            PetFormDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "pets")
    )
)]
pub struct ApiDoc;
