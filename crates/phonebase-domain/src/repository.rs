use async_trait::async_trait;

use crate::error::DomainResult;
use crate::types::{
    Brand, CatalogEntry, CreateDeviceInput, DeleteDeviceInput, DeviceDetail, ListDevicesInput,
    SearchDevicesInput, UpdateDeviceInput,
};

/// Storage operations over the catalog. The infrastructure layer
/// (phonebase-postgres) implements this trait.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Joined listing of every device, optionally restricted to a brand set
    /// and ordered per the sort mode.
    async fn list_devices(&self, input: ListDevicesInput) -> DomainResult<Vec<CatalogEntry>>;

    /// Case-insensitive substring search over device name and
    /// "brand + device name", newest release first.
    async fn search_devices(&self, input: SearchDevicesInput) -> DomainResult<Vec<CatalogEntry>>;

    /// Inserts the device row and its detail row as one atomic unit and
    /// returns the stored detail row.
    async fn create_device(&self, input: CreateDeviceInput) -> DomainResult<DeviceDetail>;

    /// Applies an allow-listed partial update to the detail row. `None` when
    /// the device id matched nothing.
    async fn update_device(&self, input: UpdateDeviceInput) -> DomainResult<Option<DeviceDetail>>;

    /// Removes the detail row then the device row atomically. `false` when
    /// the device id matched nothing (in which case nothing is persisted).
    async fn delete_device(&self, input: DeleteDeviceInput) -> DomainResult<bool>;

    /// Inserts brands, skipping ids that already exist. Returns the number
    /// of rows actually inserted.
    async fn upsert_brands(&self, brands: Vec<Brand>) -> DomainResult<u64>;
}
