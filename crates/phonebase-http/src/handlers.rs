use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use tracing::{debug, info};

use phonebase_domain::{
    CatalogEntry, CatalogService, CreateDeviceInput, DeleteDeviceInput, DeviceSort, DeviceUpdate,
    DomainError, ListDevicesInput, SearchDevicesInput, UpdateDeviceInput,
};

use crate::error::ApiError;
use crate::types::{
    parse_brand_ids, CreatedResponse, ListQuery, MessageResponse, SearchQuery, UpdatedResponse,
};

pub type SharedCatalogService = Arc<CatalogService>;

async fn list_with_sort(
    service: &CatalogService,
    query: ListQuery,
    sort: DeviceSort,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    let input = ListDevicesInput {
        brand_ids: parse_brand_ids(query.brand_ids.as_deref()),
        sort,
    };
    let entries = service.list_devices(input).await?;
    Ok(Json(entries))
}

pub async fn list_devices(
    State(service): State<SharedCatalogService>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    debug!("GET /devices endpoint accessed");
    list_with_sort(&service, query, DeviceSort::Default).await
}

pub async fn list_devices_by_date_desc(
    State(service): State<SharedCatalogService>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    debug!("GET /devices/sort/desc endpoint accessed");
    list_with_sort(&service, query, DeviceSort::ReleaseDateDesc).await
}

pub async fn list_devices_by_date_asc(
    State(service): State<SharedCatalogService>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    debug!("GET /devices/sort/asc endpoint accessed");
    list_with_sort(&service, query, DeviceSort::ReleaseDateAsc).await
}

pub async fn list_devices_by_price_desc(
    State(service): State<SharedCatalogService>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    debug!("GET /devices/price/desc endpoint accessed");
    list_with_sort(&service, query, DeviceSort::PriceDesc).await
}

pub async fn list_devices_by_price_asc(
    State(service): State<SharedCatalogService>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    debug!("GET /devices/price/asc endpoint accessed");
    list_with_sort(&service, query, DeviceSort::PriceAsc).await
}

pub async fn search_devices(
    State(service): State<SharedCatalogService>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    debug!("GET /devices/search endpoint accessed");

    let entries = service
        .search_devices(SearchDevicesInput {
            term: query.search_term.unwrap_or_default(),
        })
        .await?;

    info!(count = entries.len(), "search request served");
    Ok(Json(entries))
}

pub async fn create_device(
    State(service): State<SharedCatalogService>,
    Json(input): Json<CreateDeviceInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    debug!("POST /devices endpoint accessed");

    let detail = service.create_device(input).await?;

    info!(device_id = %detail.device_id, "create request served");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Device created successfully",
            device: detail,
        }),
    ))
}

pub async fn update_device(
    State(service): State<SharedCatalogService>,
    Path(device_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    debug!("PUT /devices/{{deviceId}} endpoint accessed");

    let fields = match body.as_object() {
        Some(fields) if !fields.is_empty() => fields,
        _ => return Err(DomainError::EmptyUpdate.into()),
    };
    let update = DeviceUpdate::from_json(fields)?;

    let detail = service
        .update_device(UpdateDeviceInput { device_id, update })
        .await?;

    info!(device_id = %detail.device_id, "update request served");
    Ok(Json(UpdatedResponse {
        message: "Device details updated successfully",
        updated_device: detail,
    }))
}

pub async fn delete_device(
    State(service): State<SharedCatalogService>,
    Path(device_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!("DELETE /devices/{{deviceId}} endpoint accessed");

    service
        .delete_device(DeleteDeviceInput {
            device_id: device_id.clone(),
        })
        .await?;

    info!(device_id = %device_id, "delete request served");
    Ok(Json(MessageResponse {
        message: format!("Device {} and its details successfully deleted", device_id),
    }))
}
