use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use phonebase_domain::{Brand, CatalogService};

/// Brand seed files come either as a bare array or wrapped in the upstream
/// brand-list envelope (`{"data": [...]}`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BrandSeedFile {
    Bare(Vec<Brand>),
    Enveloped { data: Vec<Brand> },
}

impl BrandSeedFile {
    fn into_brands(self) -> Vec<Brand> {
        match self {
            BrandSeedFile::Bare(brands) => brands,
            BrandSeedFile::Enveloped { data } => data,
        }
    }
}

/// Loads brands from a JSON file into the reference table. Existing brand
/// ids are left untouched.
pub async fn seed_brands_from_file(service: &CatalogService, path: &str) -> Result<u64> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read brand seed file {}", path))?;

    let seed: BrandSeedFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse brand seed file {}", path))?;
    let brands = seed.into_brands();

    let total = brands.len();
    let inserted = service.seed_brands(brands).await?;

    info!(path, total, inserted, "brand seed file applied");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_and_enveloped_seed_files() {
        let bare: BrandSeedFile =
            serde_json::from_str(r#"[{"brand_id": 9, "brand_name": "Samsung"}]"#).unwrap();
        assert_eq!(bare.into_brands().len(), 1);

        let enveloped: BrandSeedFile = serde_json::from_str(
            r#"{"data": [{"brand_id": 9, "brand_name": "Samsung"}, {"brand_id": 48, "brand_name": "Apple"}]}"#,
        )
        .unwrap();
        let brands = enveloped.into_brands();
        assert_eq!(brands.len(), 2);
        assert_eq!(brands[1].brand_name, "Apple");
    }
}
