pub mod catalog_service;
pub mod error;
pub mod repository;
pub mod types;
pub mod update;

pub use catalog_service::CatalogService;
pub use error::{DomainError, DomainResult};
pub use repository::CatalogRepository;
pub use types::*;
pub use update::DeviceUpdate;

// Re-export the repository mock when the testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use repository::MockCatalogRepository;
