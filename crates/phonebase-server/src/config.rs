use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use phonebase_postgres::PostgresConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// HTTP bind host
    #[serde(default = "default_http_host")]
    pub http_host: String,

    /// HTTP bind port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// The single client origin allowed by CORS
    #[serde(default = "default_cors_origin")]
    pub cors_allowed_origin: String,

    /// Apply pending goose migrations at startup
    #[serde(default)]
    pub run_migrations: bool,

    /// Optional JSON file of brands to load at startup
    #[serde(default)]
    pub brand_seed_file: Option<String>,

    /// PostgreSQL settings (PHONEBASE_POSTGRES__*)
    #[serde(default)]
    pub postgres: PostgresConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    3001
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("PHONEBASE").separator("__"))
            .build()?
            .try_deserialize()
    }
}
