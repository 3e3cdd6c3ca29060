use std::path::PathBuf;
use std::sync::Arc;

use service::pet::PetService;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub pets: Arc<PetService>,
    /// Directory served under the public image prefix.
    pub blob_root: PathBuf,
    pub public_prefix: String,
}

impl ServerState {
    pub fn new(pets: PetService, blob_root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            pets: Arc::new(pets),
            blob_root: blob_root.into(),
            public_prefix: public_prefix.into(),
        }
    }
}
