use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::update::DeviceUpdate;

/// Manufacturer reference entity. Static data loaded by the brand seeder,
/// never mutated through the REST surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub brand_id: i32,
    pub brand_name: String,
}

/// Identity record for a phone model, linked to a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: String,
    pub device_name: String,
    pub device_image_url: String,
    pub brand_id: i32,
}

/// One-to-one extension of a device holding its spec attributes.
/// `release_date` and `price` are nullable in the store; everything else is
/// loaded as text ("N/A" stands in for unknown values upstream).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDetail {
    pub device_id: String,
    pub device_name: String,
    pub device_image_url: String,
    pub display_size: String,
    pub display_res: String,
    pub camera: String,
    pub video: String,
    pub ram: String,
    pub chipset: String,
    pub battery: String,
    pub battery_type: String,
    pub release_date: Option<NaiveDate>,
    pub body: String,
    pub os_type: String,
    pub storage: String,
    pub price: Option<f64>,
}

/// Flat read model for the catalog listing: every `device_details` column
/// joined with the device name and brand name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub device_id: String,
    pub device_name: String,
    pub device_image_url: String,
    pub display_size: String,
    pub display_res: String,
    pub camera: String,
    pub video: String,
    pub ram: String,
    pub chipset: String,
    pub battery: String,
    pub battery_type: String,
    pub release_date: Option<NaiveDate>,
    pub body: String,
    pub os_type: String,
    pub storage: String,
    pub price: Option<f64>,
    pub brand_name: String,
}

/// Sort mode for catalog listings. Price orders always place rows without a
/// price after every priced row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceSort {
    /// Store-defined order, no explicit ORDER BY.
    #[default]
    Default,
    ReleaseDateAsc,
    ReleaseDateDesc,
    PriceAsc,
    PriceDesc,
}

/// Input for listing catalog entries. `brand_ids: None` means no brand
/// filter; an empty set behaves the same way.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListDevicesInput {
    pub brand_ids: Option<Vec<i32>>,
    pub sort: DeviceSort,
}

/// Input for free-text device search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDevicesInput {
    pub term: String,
}

/// Full payload for creating a device and its detail row. The caller supplies
/// the device id; this layer never generates identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDeviceInput {
    pub device_id: String,
    pub device_name: String,
    pub device_image_url: String,
    pub brand_id: i32,
    pub display_size: String,
    pub display_res: String,
    pub camera: String,
    pub video: String,
    pub ram: String,
    pub chipset: String,
    pub battery: String,
    pub battery_type: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    pub body: String,
    pub os_type: String,
    pub storage: String,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Input for a partial update of a device's detail row.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateDeviceInput {
    pub device_id: String,
    pub update: DeviceUpdate,
}

/// Input for deleting a device and its detail row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDeviceInput {
    pub device_id: String,
}
