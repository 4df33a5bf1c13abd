use serde::{Deserialize, Serialize};

use phonebase_domain::DeviceDetail;

/// Query string for the listing endpoints. `brandIds` is a comma-separated
/// list of brand ids; absent or empty means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "brandIds")]
    pub brand_ids: Option<String>,
}

/// Query string for the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub device: DeviceDetail,
}

#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub message: &'static str,
    #[serde(rename = "updatedDevice")]
    pub updated_device: DeviceDetail,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Parses the `brandIds` csv. A missing or empty parameter means "no
/// filter"; a fragment that fails integer parsing becomes a brand id that
/// matches no row, so a malformed request narrows the result instead of
/// failing it.
pub fn parse_brand_ids(raw: Option<&str>) -> Option<Vec<i32>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    Some(
        raw.split(',')
            .map(|fragment| fragment.trim().parse::<i32>().unwrap_or(-1))
            .collect(),
    )
}
