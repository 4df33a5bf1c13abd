use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Invalid device ID: {0}")]
    InvalidDeviceId(String),

    #[error("Search term is required")]
    EmptySearchTerm,

    #[error("No devices found matching the search term: {0}")]
    NoSearchMatches(String),

    #[error("Update data is required")]
    EmptyUpdate,

    #[error("No valid fields to update")]
    NoValidUpdateFields,

    #[error("Invalid update value: {0}")]
    InvalidUpdateValue(String),

    #[error("Repository error: {0}")]
    Repository(#[from] anyhow::Error),
}
