use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{DomainError, DomainResult};
use crate::repository::CatalogRepository;
use crate::types::{
    Brand, CatalogEntry, CreateDeviceInput, DeleteDeviceInput, DeviceDetail, ListDevicesInput,
    SearchDevicesInput, UpdateDeviceInput,
};

/// Domain service for catalog operations. Handlers call into this layer;
/// it validates inputs and maps repository outcomes to domain errors.
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// List catalog entries, optionally brand-filtered and sorted. An empty
    /// result is a valid outcome.
    pub async fn list_devices(&self, input: ListDevicesInput) -> DomainResult<Vec<CatalogEntry>> {
        debug!(sort = ?input.sort, brand_ids = ?input.brand_ids, "listing devices");

        let entries = self.repository.list_devices(input).await?;

        debug!(count = entries.len(), "listed devices");
        Ok(entries)
    }

    /// Free-text search. Unlike listing, zero matches is reported as
    /// `NoSearchMatches` so the surface can answer 404.
    pub async fn search_devices(
        &self,
        input: SearchDevicesInput,
    ) -> DomainResult<Vec<CatalogEntry>> {
        if input.term.trim().is_empty() {
            return Err(DomainError::EmptySearchTerm);
        }

        debug!(term = %input.term, "searching devices");

        let term = input.term.clone();
        let entries = self.repository.search_devices(input).await?;

        if entries.is_empty() {
            return Err(DomainError::NoSearchMatches(term));
        }

        debug!(count = entries.len(), "search matched devices");
        Ok(entries)
    }

    /// Create a device and its detail row with the caller-supplied id.
    pub async fn create_device(&self, input: CreateDeviceInput) -> DomainResult<DeviceDetail> {
        if input.device_id.is_empty() {
            return Err(DomainError::InvalidDeviceId(
                "Device ID cannot be empty".to_string(),
            ));
        }

        debug!(device_id = %input.device_id, brand_id = input.brand_id, "creating device");

        let detail = self.repository.create_device(input).await?;

        info!(device_id = %detail.device_id, "device created");
        Ok(detail)
    }

    /// Apply an allow-listed partial update to a device's detail row.
    pub async fn update_device(&self, input: UpdateDeviceInput) -> DomainResult<DeviceDetail> {
        if input.device_id.is_empty() {
            return Err(DomainError::InvalidDeviceId(
                "Device ID cannot be empty".to_string(),
            ));
        }
        if input.update.is_empty() {
            return Err(DomainError::NoValidUpdateFields);
        }

        debug!(device_id = %input.device_id, "updating device");

        let device_id = input.device_id.clone();
        let detail = self
            .repository
            .update_device(input)
            .await?
            .ok_or(DomainError::DeviceNotFound(device_id))?;

        info!(device_id = %detail.device_id, "device updated");
        Ok(detail)
    }

    /// Delete a device and its detail row. Deleting an unknown id fails with
    /// `DeviceNotFound` and leaves the store untouched.
    pub async fn delete_device(&self, input: DeleteDeviceInput) -> DomainResult<()> {
        if input.device_id.is_empty() {
            return Err(DomainError::InvalidDeviceId(
                "Device ID cannot be empty".to_string(),
            ));
        }

        debug!(device_id = %input.device_id, "deleting device");

        let device_id = input.device_id.clone();
        let deleted = self.repository.delete_device(input).await?;

        if !deleted {
            return Err(DomainError::DeviceNotFound(device_id));
        }

        info!(device_id = %device_id, "device deleted");
        Ok(())
    }

    /// Load brands into the reference table, skipping existing ids.
    pub async fn seed_brands(&self, brands: Vec<Brand>) -> DomainResult<u64> {
        let inserted = self.repository.upsert_brands(brands).await?;

        info!(inserted, "brands seeded");
        Ok(inserted)
    }
}
