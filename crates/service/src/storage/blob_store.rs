use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, instrument};

use crate::errors::ServiceError;

/// Blob storage: receives an uploaded file by name and hands back the path
/// it will be served under.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `bytes` under `file_name`, replacing any existing blob of that name.
    async fn put(&self, file_name: &str, bytes: &[u8]) -> Result<String, ServiceError>;
}

/// Keep only the final path component of a client-supplied filename.
pub fn sanitize_file_name(raw: &str) -> Result<&str, ServiceError> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(ServiceError::Validation("Invalid image filename".into()));
    }
    Ok(name)
}

/// Blobs on the local filesystem under `root`, served at `public_prefix`.
#[derive(Clone, Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalBlobStore {
    /// Create the root directory if missing.
    pub async fn new<P: Into<PathBuf>>(root: P, public_prefix: &str) -> Result<Arc<Self>, ServiceError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot create {}: {e}", root.display())))?;
        Ok(Arc::new(Self {
            root,
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }))
    }

    pub fn public_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_prefix, file_name)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn put(&self, file_name: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        let name = sanitize_file_name(file_name)?;
        let target = self.root.join(name);
        fs::write(&target, bytes)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot write {}: {e}", target.display())))?;
        debug!(path = %target.display(), "blob stored");
        Ok(self.public_path(name))
    }
}
