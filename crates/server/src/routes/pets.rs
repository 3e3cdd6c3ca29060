use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use models::pet::{self, PetFields};
use service::pet::ImageUpload;

use crate::errors::ApiError;
use crate::observability::record;
use crate::state::ServerState;

const IMAGE_REQUIRED: &str = "Image is required and must be sent as form-data";

/// Text fields plus the optional `image` file of a create/update request.
#[derive(Debug, Default)]
pub struct PetForm {
    pub fields: PetFields,
    pub image: Option<ImageUpload>,
}

/// Drain a multipart body into a `PetForm`.
///
/// Unknown parts are skipped. An `image` part only counts as a file when it
/// carries a non-empty filename: browsers send `filename=""` for a file input
/// left blank. A part without a declared content type is treated as
/// `application/octet-stream`.
pub async fn read_form(mut multipart: Multipart) -> Result<PetForm, ApiError> {
    let mut form = PetForm::default();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else { continue };

        if name == "image" {
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().unwrap_or("application/octet-stream").to_owned();
            let bytes = field.bytes().await?;
            if let Some(file_name) = file_name.filter(|n| !n.is_empty()) {
                form.image = Some(ImageUpload { file_name, content_type, bytes: bytes.to_vec() });
            }
            continue;
        }

        let slot = match name.as_str() {
            "petname" => &mut form.fields.petname,
            "pettype" => &mut form.fields.pettype,
            "petbreed" => &mut form.fields.petbreed,
            "petage" => &mut form.fields.petage,
            "description" => &mut form.fields.description,
            "location" => &mut form.fields.location,
            _ => continue,
        };
        *slot = Some(field.text().await?);
    }
    Ok(form)
}

#[utoipa::path(
    post, path = "/pets", tag = "pets",
    request_body(content = crate::openapi::PetFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created", body = crate::openapi::PetDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 413, description = "Payload Too Large", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<pet::Model>), ApiError> {
    let result = async {
        // a body that is not multipart cannot carry the image
        let multipart = multipart.map_err(|_| ApiError::Validation(IMAGE_REQUIRED.into()))?;
        let form = read_form(multipart).await?;
        let created = state.pets.create(form.fields, form.image).await?;
        Ok::<_, ApiError>((StatusCode::CREATED, Json(created)))
    }
    .await;
    record("create", &result);
    result
}

#[utoipa::path(
    put, path = "/pets/{id}", tag = "pets",
    params(("id" = String, Path, description = "Pet identifier")),
    request_body(content = crate::openapi::PetFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PetDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 413, description = "Payload Too Large", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<pet::Model>, ApiError> {
    let result = async {
        // no multipart body means nothing to change
        let form = match multipart {
            Ok(m) => read_form(m).await?,
            Err(_) => PetForm::default(),
        };
        let updated = state.pets.update(&id, form.fields, form.image).await?;
        Ok::<_, ApiError>(Json(updated))
    }
    .await;
    record("update", &result);
    result
}

#[utoipa::path(
    get, path = "/pets", tag = "pets",
    responses((status = 200, description = "All pets", body = [crate::openapi::PetDoc]))
)]
pub async fn get_all(State(state): State<ServerState>) -> Result<Json<Vec<pet::Model>>, ApiError> {
    let result = state.pets.list().await.map(Json).map_err(ApiError::from);
    record("get_all", &result);
    result
}

#[utoipa::path(
    get, path = "/pets/{id}", tag = "pets",
    params(("id" = String, Path, description = "Pet identifier")),
    responses((status = 200, description = "The pet, or null when absent", body = crate::openapi::PetDoc))
)]
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Option<pet::Model>>, ApiError> {
    let result = state.pets.get(&id).await.map(Json).map_err(ApiError::from);
    record("get_by_id", &result);
    result
}

#[utoipa::path(
    delete, path = "/pets/{id}", tag = "pets",
    params(("id" = String, Path, description = "Pet identifier")),
    responses((status = 200, description = "The deleted pet, or null when absent", body = crate::openapi::PetDoc))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Option<pet::Model>>, ApiError> {
    let result = state.pets.delete(&id).await.map(Json).map_err(ApiError::from);
    record("delete", &result);
    result
}

#[utoipa::path(
    get, path = "/pets/search/{term}", tag = "pets",
    params(("term" = String, Path, description = "Case-insensitive substring of name, type or breed")),
    responses((status = 200, description = "Matching pets", body = [crate::openapi::PetDoc]))
)]
pub async fn search(
    State(state): State<ServerState>,
    Path(term): Path<String>,
) -> Result<Json<Vec<pet::Model>>, ApiError> {
    let result = state.pets.search(&term).await.map(Json).map_err(ApiError::from);
    record("search", &result);
    result
}
