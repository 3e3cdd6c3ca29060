use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use models::pet::{self, NewPet};
use tokio::{fs, sync::RwLock};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pet::repository::PetRepository;

/// Pet documents kept in memory and persisted as one JSON array.
///
/// The vector is in insertion order, which is also the order of `find_all`.
/// Mutations are applied to a copy, written out (temp file + rename) while
/// the write lock is held, and only then swapped in, so a failed write leaves
/// both the file and the in-memory view unchanged.
pub struct JsonPetStore {
    inner: RwLock<Vec<pet::Model>>,
    file_path: PathBuf,
}

impl JsonPetStore {
    /// Open the store at `path`, creating an empty file if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        }

        let pets: Vec<pet::Model> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Storage(format!("corrupt {}: {e}", file_path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(ServiceError::Storage(e.to_string())),
        };

        let store = Self { inner: RwLock::new(pets), file_path };
        store.persist(&*store.inner.read().await).await?;
        Ok(Arc::new(store))
    }

    async fn persist(&self, pets: &[pet::Model]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(pets).map_err(|e| ServiceError::Storage(e.to_string()))?;
        let tmp = self.file_path.with_extension("json.tmp");
        fs::write(&tmp, data).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::rename(&tmp, &self.file_path).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl PetRepository for JsonPetStore {
    async fn insert(&self, new_pet: NewPet) -> Result<pet::Model, ServiceError> {
        let model = new_pet.into_model(Uuid::new_v4(), Utc::now().into());
        let mut pets = self.inner.write().await;
        let mut next = pets.clone();
        next.push(model.clone());
        self.persist(&next).await?;
        *pets = next;
        Ok(model)
    }

    async fn find_all(&self) -> Result<Vec<pet::Model>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<pet::Model>, ServiceError> {
        Ok(self.inner.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, mut model: pet::Model) -> Result<pet::Model, ServiceError> {
        let mut pets = self.inner.write().await;
        let Some(idx) = pets.iter().position(|p| p.id == model.id) else {
            return Err(ServiceError::not_found("Pet"));
        };
        model.updated_at = Utc::now().into();
        let mut next = pets.clone();
        next[idx] = model.clone();
        self.persist(&next).await?;
        *pets = next;
        Ok(model)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<pet::Model>, ServiceError> {
        let mut pets = self.inner.write().await;
        let Some(idx) = pets.iter().position(|p| p.id == id) else { return Ok(None) };
        let mut next = pets.clone();
        let removed = next.remove(idx);
        self.persist(&next).await?;
        *pets = next;
        Ok(Some(removed))
    }

    async fn search(&self, term: &str) -> Result<Vec<pet::Model>, ServiceError> {
        let pets = self.inner.read().await;
        Ok(pets.iter().filter(|p| p.matches_term(term)).cloned().collect())
    }
}
