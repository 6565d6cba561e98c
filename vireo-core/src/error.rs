use thiserror::Error;
use vireo_model::ModelError;

#[derive(Error, Debug)]
pub enum MediaError {
    /// Unknown user, or an item identifier the catalog cannot resolve
    #[error("Not found: {0}")]
    NotFound(String),

    /// The item resolved but the user may not see it
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The metadata refresher failed while repairing an item during lookup
    #[error("Metadata refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MediaError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, MediaError::NotFound(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, MediaError::Unauthorized(_))
    }
}

pub type Result<T> = std::result::Result<T, MediaError>;
