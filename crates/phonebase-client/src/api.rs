use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use phonebase_domain::{CatalogEntry, CreateDeviceInput, DeviceDetail, DeviceUpdate};

#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
}

/// The sort modes the browser UI offers, each mapping to its own endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortSelection {
    #[default]
    Default,
    PriceHighToLow,
    PriceLowToHigh,
    DateNewToOld,
    DateOldToNew,
}

impl SortSelection {
    pub fn path(&self) -> &'static str {
        match self {
            SortSelection::Default => "/devices",
            SortSelection::PriceHighToLow => "/devices/price/desc",
            SortSelection::PriceLowToHigh => "/devices/price/asc",
            SortSelection::DateNewToOld => "/devices/sort/desc",
            SortSelection::DateOldToNew => "/devices/sort/asc",
        }
    }
}

/// The catalog REST contract from the client's side.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_devices(
        &self,
        brand_ids: Vec<i32>,
        sort: SortSelection,
    ) -> Result<Vec<CatalogEntry>, ApiClientError>;

    async fn search_devices(&self, term: String) -> Result<Vec<CatalogEntry>, ApiClientError>;

    async fn create_device(&self, input: CreateDeviceInput)
        -> Result<DeviceDetail, ApiClientError>;

    async fn update_device(
        &self,
        device_id: String,
        update: DeviceUpdate,
    ) -> Result<DeviceDetail, ApiClientError>;

    async fn delete_device(&self, device_id: String) -> Result<String, ApiClientError>;
}

#[derive(Debug, Deserialize)]
struct CreatedBody {
    device: DeviceDetail,
}

#[derive(Debug, Deserialize)]
struct UpdatedBody {
    #[serde(rename = "updatedDevice")]
    updated_device: DeviceDetail,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

/// reqwest-backed implementation of the catalog REST contract.
#[derive(Clone)]
pub struct HttpCatalogApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(ApiClientError::UnexpectedStatus {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn fetch_devices(
        &self,
        brand_ids: Vec<i32>,
        sort: SortSelection,
    ) -> Result<Vec<CatalogEntry>, ApiClientError> {
        // The browser client always sends brandIds, empty when nothing is
        // selected; keep the same shape.
        let csv = brand_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .http
            .get(format!("{}{}", self.base_url, sort.path()))
            .query(&[("brandIds", csv.as_str())])
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn search_devices(&self, term: String) -> Result<Vec<CatalogEntry>, ApiClientError> {
        let response = self
            .http
            .get(format!("{}/devices/search", self.base_url))
            .query(&[("searchTerm", term.as_str())])
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_device(
        &self,
        input: CreateDeviceInput,
    ) -> Result<DeviceDetail, ApiClientError> {
        let response = self
            .http
            .post(format!("{}/devices", self.base_url))
            .json(&input)
            .send()
            .await?;

        let body: CreatedBody = Self::check(response).await?.json().await?;
        Ok(body.device)
    }

    async fn update_device(
        &self,
        device_id: String,
        update: DeviceUpdate,
    ) -> Result<DeviceDetail, ApiClientError> {
        let response = self
            .http
            .put(format!("{}/devices/{}", self.base_url, device_id))
            .json(&update)
            .send()
            .await?;

        let body: UpdatedBody = Self::check(response).await?.json().await?;
        Ok(body.updated_device)
    }

    async fn delete_device(&self, device_id: String) -> Result<String, ApiClientError> {
        let response = self
            .http
            .delete(format!("{}/devices/{}", self.base_url, device_id))
            .send()
            .await?;

        let body: MessageBody = Self::check(response).await?.json().await?;
        Ok(body.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_selections_map_to_their_endpoints() {
        assert_eq!(SortSelection::Default.path(), "/devices");
        assert_eq!(SortSelection::PriceHighToLow.path(), "/devices/price/desc");
        assert_eq!(SortSelection::PriceLowToHigh.path(), "/devices/price/asc");
        assert_eq!(SortSelection::DateNewToOld.path(), "/devices/sort/desc");
        assert_eq!(SortSelection::DateOldToNew.path(), "/devices/sort/asc");
    }
}
