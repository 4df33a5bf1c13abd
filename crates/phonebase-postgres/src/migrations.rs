use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::debug;

use crate::config::PostgresConfig;

/// Applies goose-format SQL migrations by spawning the goose binary.
pub struct MigrationRunner {
    goose_binary_path: String,
    migrations_dir: String,
    dsn: String,
}

impl MigrationRunner {
    pub fn new(goose_binary_path: String, migrations_dir: String, dsn: String) -> Self {
        Self {
            goose_binary_path,
            migrations_dir,
            dsn,
        }
    }

    /// Builds a runner from the store configuration.
    pub fn from_config(config: &PostgresConfig) -> Self {
        Self::new(
            config.goose_binary_path.clone(),
            config.migrations_dir.clone(),
            config.dsn(),
        )
    }

    /// Runs all pending migrations (`goose -dir {dir} postgres {dsn} up`).
    pub async fn run_migrations(&self) -> Result<()> {
        debug!(
            migrations_dir = %self.migrations_dir,
            "running migrations"
        );

        let output = Command::new(&self.goose_binary_path)
            .arg("-dir")
            .arg(&self.migrations_dir)
            .arg("postgres")
            .arg(&self.dsn)
            .arg("up")
            .output()
            .await
            .context("failed to spawn goose")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            bail!("Migration failed.\nstdout: {}\nstderr: {}", stdout, stderr);
        }

        debug!("migrations completed successfully");
        Ok(())
    }

    /// Reports the current migration status.
    pub async fn migration_status(&self) -> Result<String> {
        let output = Command::new(&self.goose_binary_path)
            .arg("-dir")
            .arg(&self.migrations_dir)
            .arg("postgres")
            .arg(&self.dsn)
            .arg("status")
            .output()
            .await
            .context("failed to spawn goose")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("Failed to get migration status: {}", stderr);
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
