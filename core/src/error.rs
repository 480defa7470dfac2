use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Store unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing or invalid field: {field}")]
    Validation { field: String },

    #[error("Administrator role required to {action}")]
    Unauthorized { action: &'static str },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PortalError {
    pub fn validation(field: impl Into<String>) -> Self {
        PortalError::Validation {
            field: field.into(),
        }
    }
}

pub type PortalResult<T> = Result<T, PortalError>;
