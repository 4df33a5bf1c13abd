pub mod api;
pub mod view_state;

pub use api::{ApiClientError, CatalogApi, HttpCatalogApi, SortSelection};
pub use view_state::{CatalogView, FetchRequest};

// Re-export the API mock when the testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use api::MockCatalogApi;
