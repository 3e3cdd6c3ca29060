#![cfg(test)]
use std::path::PathBuf;

use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::pet::PetService;
use crate::storage::{blob_store::LocalBlobStore, json_pet_store::JsonPetStore};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Postgres connection with migrations applied, or `None` when tests should
/// not touch a database (`SKIP_DB_TESTS` set or `DATABASE_URL` missing).
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let cfg = DatabaseConfig::from_env();

    MIGRATED
        .get_or_init(|| async {
            let db = connect_with_config(&cfg).await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
        })
        .await;

    Ok(Some(connect_with_config(&cfg).await?))
}

/// A `PetService` over a JSON store and blob root inside a fresh temp dir.
pub struct TestEnv {
    pub service: PetService,
    pub root: PathBuf,
}

impl TestEnv {
    pub async fn new() -> Result<Self, anyhow::Error> {
        let root = std::env::temp_dir().join(format!("pet_service_{}", Uuid::new_v4()));
        let repo = JsonPetStore::open(root.join("data").join("pets.json")).await?;
        let blobs = LocalBlobStore::new(root.join("public").join("pets"), "/public/pets").await?;
        let service = PetService::new(repo, blobs);
        Ok(Self { service, root })
    }

    pub async fn blob_exists(&self, name: &str) -> bool {
        tokio::fs::metadata(self.root.join("public").join("pets").join(name)).await.is_ok()
    }

    pub async fn cleanup(self) {
        let _ = tokio::fs::remove_dir_all(&self.root).await;
    }
}
