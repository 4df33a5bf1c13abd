use tracing::{debug, warn};

use phonebase_domain::{CatalogEntry, DeviceUpdate};

use crate::api::{ApiClientError, CatalogApi, SortSelection};

/// A pending fetch issued by a view-state change. The driver runs it against
/// a `CatalogApi` and feeds the outcome back through `apply_fetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub brand_ids: Vec<i32>,
    pub sort: SortSelection,
}

/// Per-session view state of the catalog browser: the search term, the
/// selected brand filter, the sort mode, and the currently loaded device
/// list. Brand and sort changes issue a fresh fetch; the search term only
/// filters the loaded list client-side.
///
/// Fetches are sequence-numbered and a response that is not from the latest
/// fetch is discarded, so a slow older response can never overwrite a newer
/// list.
#[derive(Debug, Default)]
pub struct CatalogView {
    search_term: String,
    selected_brands: Vec<i32>,
    sort: SortSelection,
    devices: Vec<CatalogEntry>,
    loading: bool,
    latest_fetch: u64,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_brands(&self) -> &[i32] {
        &self.selected_brands
    }

    pub fn sort(&self) -> SortSelection {
        self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Updates the search term. Filtering happens locally over the loaded
    /// list; no fetch is issued.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Adds or removes a brand from the filter set, clears the search term
    /// (the browser UI does the same), and issues a fetch.
    pub fn toggle_brand(&mut self, brand_id: i32) -> FetchRequest {
        match self.selected_brands.iter().position(|&id| id == brand_id) {
            Some(index) => {
                self.selected_brands.remove(index);
            }
            None => self.selected_brands.push(brand_id),
        }
        self.search_term.clear();
        self.begin_fetch()
    }

    /// Switches the sort mode and issues a fetch.
    pub fn set_sort(&mut self, sort: SortSelection) -> FetchRequest {
        self.sort = sort;
        self.begin_fetch()
    }

    /// Issues a fetch for the current filter and sort selection.
    pub fn refresh(&mut self) -> FetchRequest {
        self.begin_fetch()
    }

    fn begin_fetch(&mut self) -> FetchRequest {
        self.latest_fetch += 1;
        self.loading = true;
        FetchRequest {
            seq: self.latest_fetch,
            brand_ids: self.selected_brands.clone(),
            sort: self.sort,
        }
    }

    /// Applies a fetch outcome. Stale responses are dropped; a failure keeps
    /// the previously displayed list and only logs the problem.
    pub fn apply_fetch(&mut self, seq: u64, result: Result<Vec<CatalogEntry>, ApiClientError>) {
        if seq != self.latest_fetch {
            debug!(seq, latest = self.latest_fetch, "discarding stale fetch response");
            return;
        }

        self.loading = false;
        match result {
            Ok(devices) => {
                debug!(count = devices.len(), "device list loaded");
                self.devices = devices;
            }
            Err(error) => {
                warn!("Error fetching devices: {}", error);
            }
        }
    }

    /// Runs a pending fetch against the API and applies its outcome.
    pub async fn execute(&mut self, api: &dyn CatalogApi, request: FetchRequest) {
        let result = api.fetch_devices(request.brand_ids, request.sort).await;
        self.apply_fetch(request.seq, result);
    }

    /// The loaded list narrowed by the search term: case-insensitive
    /// substring match over device name or brand name.
    pub fn visible_devices(&self) -> Vec<&CatalogEntry> {
        if self.search_term.is_empty() {
            return self.devices.iter().collect();
        }

        let needle = self.search_term.to_lowercase();
        self.devices
            .iter()
            .filter(|device| {
                device.device_name.to_lowercase().contains(&needle)
                    || device.brand_name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Deletes a device and, on confirmed success, removes it from the
    /// loaded list without refetching.
    pub async fn delete_device(
        &mut self,
        api: &dyn CatalogApi,
        device_id: &str,
    ) -> Result<String, ApiClientError> {
        let message = api.delete_device(device_id.to_string()).await?;
        self.devices.retain(|device| device.device_id != device_id);
        Ok(message)
    }

    /// Updates a device and issues a full refetch (the browser client
    /// reloads the page after an update rather than patching local state).
    pub async fn update_device(
        &mut self,
        api: &dyn CatalogApi,
        device_id: &str,
        update: DeviceUpdate,
    ) -> Result<FetchRequest, ApiClientError> {
        api.update_device(device_id.to_string(), update).await?;
        Ok(self.refresh())
    }
}
