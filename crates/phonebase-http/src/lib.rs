pub mod error;
pub mod handlers;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use server::{run_http_server, CorsConfig, HttpServerConfig};
