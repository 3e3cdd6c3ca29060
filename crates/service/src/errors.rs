use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Message fit for a client, without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(m) | Self::NotFound(m) | Self::Db(m) | Self::Storage(m) => m.clone(),
            Self::Model(models::errors::ModelError::Validation(m))
            | Self::Model(models::errors::ModelError::Db(m)) => m.clone(),
        }
    }

    /// Whether the caller sent bad input, as opposed to a collaborator failing.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Model(models::errors::ModelError::Validation(_)))
    }
}
