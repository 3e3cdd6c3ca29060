use std::sync::Arc;

use models::pet::{self, PetFields};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::pet::repository::PetRepository;
use crate::storage::blob_store::BlobStore;

/// An uploaded file as received from the client.
#[derive(Clone, Debug)]
pub struct ImageUpload {
    pub file_name: String,
    /// Declared content type, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image")
    }
}

/// Application service encapsulating pet listing rules.
///
/// Each operation validates inline and stops at the first violation; the
/// caller translates `ServiceError` into a response.
pub struct PetService {
    repo: Arc<dyn PetRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl PetService {
    pub fn new(repo: Arc<dyn PetRepository>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { repo, blobs }
    }

    async fn store_image(&self, image: &ImageUpload) -> Result<String, ServiceError> {
        if !image.is_image() {
            return Err(ServiceError::Validation("Only image files are allowed".into()));
        }
        self.blobs.put(&image.file_name, &image.bytes).await
    }

    /// Create a listing. The image is stored before the text fields are
    /// checked, so a request with missing fields still leaves its file behind.
    #[instrument(skip_all, fields(petname = ?fields.petname))]
    pub async fn create(&self, fields: PetFields, image: Option<ImageUpload>) -> Result<pet::Model, ServiceError> {
        let image = image.ok_or_else(|| {
            ServiceError::Validation("Image is required and must be sent as form-data".into())
        })?;
        let image_path = self.store_image(&image).await?;
        let new_pet = fields.into_new_pet(Some(image_path))?;
        let created = self.repo.insert(new_pet).await?;
        info!(event = "pet_created", id = %created.id, image = ?created.image, "created pet");
        Ok(created)
    }

    /// Partial update: only non-empty values replace stored ones.
    #[instrument(skip(self, fields, image))]
    pub async fn update(&self, id: &str, fields: PetFields, image: Option<ImageUpload>) -> Result<pet::Model, ServiceError> {
        let id = pet::parse_id(id)?;

        let image_path = match &image {
            Some(upload) => Some(self.store_image(upload).await?),
            None => None,
        };

        let mut current = self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Pet"))?;
        fields.merge_into(&mut current, image_path);
        let saved = self.repo.save(current).await?;
        info!(event = "pet_updated", id = %saved.id, "updated pet");
        Ok(saved)
    }

    pub async fn list(&self) -> Result<Vec<pet::Model>, ServiceError> {
        let pets = self.repo.find_all().await?;
        info!(count = pets.len(), "list pets");
        Ok(pets)
    }

    /// `Ok(None)` when nothing is stored under `id`, including ids the store
    /// could never have issued.
    pub async fn get(&self, id: &str) -> Result<Option<pet::Model>, ServiceError> {
        match pet::parse_id(id) {
            Ok(id) => self.repo.find_by_id(id).await,
            Err(_) => Ok(None),
        }
    }

    /// Remove a listing and return it; deleting an absent id is not an error.
    /// The stored image is left in place.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Option<pet::Model>, ServiceError> {
        let Ok(id) = pet::parse_id(id) else { return Ok(None) };
        let removed = self.repo.delete(id).await?;
        info!(event = "pet_deleted", %id, existed = removed.is_some(), "delete pet");
        Ok(removed)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<pet::Model>, ServiceError> {
        let pets = self.repo.search(term).await?;
        info!(%term, count = pets.len(), "search pets");
        Ok(pets)
    }
}
