use crate::name::InvalidNameReason;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuitError {
    #[error("invalid document name: {0}")]
    NameInvalid(InvalidNameReason),

    #[error("steering document already exists: {0}")]
    AlreadyExists(String),

    #[error("steering document not found: {0}")]
    NotFound(String),

    #[error("'{0}' is a bundled steering document and cannot be renamed or deleted")]
    NotCustom(String),

    #[error("invalid template metadata: {0}")]
    InvalidMetadata(String),

    #[error("framework not found: {0}")]
    FrameworkNotFound(String),

    #[error("search error: {0}")]
    Search(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

// Manual impl: the reason is rendered in the message, not exposed as a source.
impl From<InvalidNameReason> for SuitError {
    fn from(reason: InvalidNameReason) -> Self {
        SuitError::NameInvalid(reason)
    }
}

pub type Result<T> = std::result::Result<T, SuitError>;
