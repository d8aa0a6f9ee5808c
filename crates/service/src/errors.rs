use thiserror::Error;

use crate::reconcile::LinkError;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Field rule violation; the message is the validator's, unwrapped.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("database error: {0}")]
    Db(String),
    #[error("hash error: {0}")]
    Hash(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{entity} {id} not found"))
    }

    /// Errors caused by the caller's input rather than by the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Link(_) | Self::InvalidInput(_) | Self::NotFound(_) | Self::Conflict(_) | Self::Unauthorized
        )
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::NotFound(msg) => Self::NotFound(msg),
            models::errors::ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e {
            sea_orm::DbErr::RecordNotFound(msg) => Self::NotFound(msg),
            other => Self::Db(other.to_string()),
        }
    }
}
