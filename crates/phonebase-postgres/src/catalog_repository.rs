use async_trait::async_trait;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;
use tracing::{debug, instrument};

use phonebase_domain::{
    Brand, CatalogEntry, CatalogRepository, CreateDeviceInput, DeleteDeviceInput, DeviceDetail,
    DeviceSort, DomainError, DomainResult, ListDevicesInput, SearchDevicesInput,
    UpdateDeviceInput,
};

use crate::client::PostgresClient;

/// Joined select shared by listing and search. Column order must match
/// `entry_from_row`.
const ENTRY_SELECT: &str = "SELECT dd.device_id, d.device_name, dd.device_image_url, \
     dd.display_size, dd.display_res, dd.camera, dd.video, dd.ram, dd.chipset, \
     dd.battery, dd.battery_type, dd.release_date, dd.body, dd.os_type, dd.storage, \
     dd.price, b.brand_name \
     FROM devices d \
     JOIN device_details dd ON d.device_id = dd.device_id \
     JOIN brands b ON d.brand_id = b.brand_id";

/// Detail columns returned by writes. Column order must match
/// `detail_from_row`.
const DETAIL_RETURNING: &str = "device_id, device_name, device_image_url, display_size, \
     display_res, camera, video, ram, chipset, battery, battery_type, release_date, \
     body, os_type, storage, price";

fn order_clause(sort: DeviceSort) -> &'static str {
    match sort {
        DeviceSort::Default => "",
        DeviceSort::ReleaseDateAsc => " ORDER BY dd.release_date ASC",
        DeviceSort::ReleaseDateDesc => " ORDER BY dd.release_date DESC",
        DeviceSort::PriceAsc => " ORDER BY dd.price ASC NULLS LAST",
        DeviceSort::PriceDesc => " ORDER BY dd.price DESC NULLS LAST",
    }
}

fn entry_from_row(row: &Row) -> CatalogEntry {
    CatalogEntry {
        device_id: row.get(0),
        device_name: row.get(1),
        device_image_url: row.get(2),
        display_size: row.get(3),
        display_res: row.get(4),
        camera: row.get(5),
        video: row.get(6),
        ram: row.get(7),
        chipset: row.get(8),
        battery: row.get(9),
        battery_type: row.get(10),
        release_date: row.get(11),
        body: row.get(12),
        os_type: row.get(13),
        storage: row.get(14),
        price: row.get(15),
        brand_name: row.get(16),
    }
}

fn detail_from_row(row: &Row) -> DeviceDetail {
    DeviceDetail {
        device_id: row.get(0),
        device_name: row.get(1),
        device_image_url: row.get(2),
        display_size: row.get(3),
        display_res: row.get(4),
        camera: row.get(5),
        video: row.get(6),
        ram: row.get(7),
        chipset: row.get(8),
        battery: row.get(9),
        battery_type: row.get(10),
        release_date: row.get(11),
        body: row.get(12),
        os_type: row.get(13),
        storage: row.get(14),
        price: row.get(15),
    }
}

/// PostgreSQL implementation of the CatalogRepository trait.
#[derive(Clone)]
pub struct PostgresCatalogRepository {
    client: PostgresClient,
}

impl PostgresCatalogRepository {
    pub fn new(client: PostgresClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    #[instrument(skip(self, input), fields(sort = ?input.sort))]
    async fn list_devices(&self, input: ListDevicesInput) -> DomainResult<Vec<CatalogEntry>> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::Repository)?;

        let rows = match &input.brand_ids {
            Some(brand_ids) => {
                let sql = format!(
                    "{} WHERE d.brand_id = ANY($1){}",
                    ENTRY_SELECT,
                    order_clause(input.sort)
                );
                conn.query(sql.as_str(), &[brand_ids]).await
            }
            None => {
                let sql = format!("{}{}", ENTRY_SELECT, order_clause(input.sort));
                conn.query(sql.as_str(), &[]).await
            }
        }
        .map_err(|e| DomainError::Repository(e.into()))?;

        debug!(count = rows.len(), "listed catalog entries");

        Ok(rows.iter().map(entry_from_row).collect())
    }

    #[instrument(skip(self, input), fields(term = %input.term))]
    async fn search_devices(&self, input: SearchDevicesInput) -> DomainResult<Vec<CatalogEntry>> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::Repository)?;

        let sql = format!(
            "{} WHERE LOWER(d.device_name) LIKE LOWER($1) \
             OR LOWER(b.brand_name || ' ' || d.device_name) LIKE LOWER($1) \
             ORDER BY dd.release_date DESC",
            ENTRY_SELECT
        );
        let pattern = format!("%{}%", input.term);

        let rows = conn
            .query(sql.as_str(), &[&pattern])
            .await
            .map_err(|e| DomainError::Repository(e.into()))?;

        debug!(count = rows.len(), "search matched catalog entries");

        Ok(rows.iter().map(entry_from_row).collect())
    }

    #[instrument(skip(self, input), fields(device_id = %input.device_id, brand_id = input.brand_id))]
    async fn create_device(&self, input: CreateDeviceInput) -> DomainResult<DeviceDetail> {
        let mut conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::Repository)?;

        let transaction = conn
            .transaction()
            .await
            .map_err(|e| DomainError::Repository(e.into()))?;

        transaction
            .execute(
                "INSERT INTO devices (device_id, device_name, device_image_url, brand_id) \
                 VALUES ($1, $2, $3, $4)",
                &[
                    &input.device_id,
                    &input.device_name,
                    &input.device_image_url,
                    &input.brand_id,
                ],
            )
            .await
            .map_err(|e| DomainError::Repository(e.into()))?;

        let sql = format!(
            "INSERT INTO device_details (\
                 device_id, device_name, device_image_url, display_size, \
                 display_res, camera, video, ram, chipset, battery, \
                 battery_type, release_date, body, os_type, storage, price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {}",
            DETAIL_RETURNING
        );

        let row = transaction
            .query_one(
                sql.as_str(),
                &[
                    &input.device_id,
                    &input.device_name,
                    &input.device_image_url,
                    &input.display_size,
                    &input.display_res,
                    &input.camera,
                    &input.video,
                    &input.ram,
                    &input.chipset,
                    &input.battery,
                    &input.battery_type,
                    &input.release_date,
                    &input.body,
                    &input.os_type,
                    &input.storage,
                    &input.price,
                ],
            )
            .await
            .map_err(|e| DomainError::Repository(e.into()))?;

        // Both inserts roll back if this fails
        transaction
            .commit()
            .await
            .map_err(|e| DomainError::Repository(e.into()))?;

        debug!(device_id = %input.device_id, "device and detail rows created");

        Ok(detail_from_row(&row))
    }

    #[instrument(skip(self, input), fields(device_id = %input.device_id))]
    async fn update_device(&self, input: UpdateDeviceInput) -> DomainResult<Option<DeviceDetail>> {
        if input.update.is_empty() {
            return Err(DomainError::NoValidUpdateFields);
        }

        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::Repository)?;

        // The SET clause is assembled from the DeviceUpdate fields only;
        // client-supplied key strings never reach the SQL text.
        let update = &input.update;
        let mut columns: Vec<&'static str> = Vec::new();
        let mut params: Vec<&(dyn ToSql + Sync)> = vec![&input.device_id];

        if let Some(v) = &update.device_name {
            columns.push("device_name");
            params.push(v);
        }
        if let Some(v) = &update.device_image_url {
            columns.push("device_image_url");
            params.push(v);
        }
        if let Some(v) = &update.display_size {
            columns.push("display_size");
            params.push(v);
        }
        if let Some(v) = &update.display_res {
            columns.push("display_res");
            params.push(v);
        }
        if let Some(v) = &update.camera {
            columns.push("camera");
            params.push(v);
        }
        if let Some(v) = &update.video {
            columns.push("video");
            params.push(v);
        }
        if let Some(v) = &update.ram {
            columns.push("ram");
            params.push(v);
        }
        if let Some(v) = &update.chipset {
            columns.push("chipset");
            params.push(v);
        }
        if let Some(v) = &update.battery {
            columns.push("battery");
            params.push(v);
        }
        if let Some(v) = &update.battery_type {
            columns.push("battery_type");
            params.push(v);
        }
        if let Some(v) = &update.release_date {
            columns.push("release_date");
            params.push(v);
        }
        if let Some(v) = &update.body {
            columns.push("body");
            params.push(v);
        }
        if let Some(v) = &update.os_type {
            columns.push("os_type");
            params.push(v);
        }
        if let Some(v) = &update.storage {
            columns.push("storage");
            params.push(v);
        }
        if let Some(v) = &update.price {
            columns.push("price");
            params.push(v);
        }

        let set_clause = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ${}", column, i + 2))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "UPDATE device_details SET {} WHERE device_id = $1 RETURNING {}",
            set_clause, DETAIL_RETURNING
        );

        let row = conn
            .query_opt(sql.as_str(), &params)
            .await
            .map_err(|e| DomainError::Repository(e.into()))?;

        debug!(
            device_id = %input.device_id,
            fields = columns.len(),
            matched = row.is_some(),
            "device detail update applied"
        );

        Ok(row.as_ref().map(detail_from_row))
    }

    #[instrument(skip(self, input), fields(device_id = %input.device_id))]
    async fn delete_device(&self, input: DeleteDeviceInput) -> DomainResult<bool> {
        let mut conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::Repository)?;

        let transaction = conn
            .transaction()
            .await
            .map_err(|e| DomainError::Repository(e.into()))?;

        // Detail row first (it carries the foreign key). Its row count is
        // deliberately unchecked; only the device-table delete decides the
        // outcome.
        transaction
            .execute(
                "DELETE FROM device_details WHERE device_id = $1",
                &[&input.device_id],
            )
            .await
            .map_err(|e| DomainError::Repository(e.into()))?;

        let deleted = transaction
            .execute(
                "DELETE FROM devices WHERE device_id = $1",
                &[&input.device_id],
            )
            .await
            .map_err(|e| DomainError::Repository(e.into()))?;

        if deleted == 0 {
            transaction
                .rollback()
                .await
                .map_err(|e| DomainError::Repository(e.into()))?;
            return Ok(false);
        }

        transaction
            .commit()
            .await
            .map_err(|e| DomainError::Repository(e.into()))?;

        debug!(device_id = %input.device_id, "device and detail rows deleted");

        Ok(true)
    }

    #[instrument(skip(self, brands), fields(count = brands.len()))]
    async fn upsert_brands(&self, brands: Vec<Brand>) -> DomainResult<u64> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::Repository)?;

        let mut inserted = 0;
        for brand in &brands {
            inserted += conn
                .execute(
                    "INSERT INTO brands (brand_id, brand_name) VALUES ($1, $2) \
                     ON CONFLICT (brand_id) DO NOTHING",
                    &[&brand.brand_id, &brand.brand_name],
                )
                .await
                .map_err(|e| DomainError::Repository(e.into()))?;
        }

        debug!(inserted, "brands upserted");

        Ok(inserted)
    }
}
