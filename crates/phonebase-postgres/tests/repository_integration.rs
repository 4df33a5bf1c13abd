use chrono::NaiveDate;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;

use phonebase_domain::{
    Brand, CatalogRepository, CreateDeviceInput, DeleteDeviceInput, DeviceSort, DeviceUpdate,
    ListDevicesInput, SearchDevicesInput, UpdateDeviceInput,
};
use phonebase_postgres::{MigrationRunner, PostgresCatalogRepository, PostgresClient, PostgresConfig};

async fn setup_test_db() -> (
    ContainerAsync<Postgres>,
    PostgresClient,
    PostgresCatalogRepository,
) {
    let postgres = Postgres::default().start().await.unwrap();
    let host = postgres.get_host().await.unwrap();
    let port = postgres.get_host_port_ipv4(5432).await.unwrap();

    let goose_path = which::which("goose").expect("goose binary not found");
    let config = PostgresConfig {
        host: host.to_string(),
        port,
        database: "postgres".to_string(),
        username: "postgres".to_string(),
        password: "postgres".to_string(),
        max_pool_size: 5,
        migrations_dir: format!("{}/migrations", env!("CARGO_MANIFEST_DIR")),
        goose_binary_path: goose_path.to_string_lossy().to_string(),
    };

    MigrationRunner::from_config(&config)
        .run_migrations()
        .await
        .expect("Migrations failed");

    let client = PostgresClient::new(&config).expect("Failed to create client");
    let repository = PostgresCatalogRepository::new(client.clone());

    (postgres, client, repository)
}

async fn seed_brands(repo: &PostgresCatalogRepository) {
    repo.upsert_brands(vec![
        Brand {
            brand_id: 9,
            brand_name: "Samsung".to_string(),
        },
        Brand {
            brand_id: 48,
            brand_name: "Apple".to_string(),
        },
    ])
    .await
    .unwrap();
}

fn create_input(device_id: &str, brand_id: i32) -> CreateDeviceInput {
    CreateDeviceInput {
        device_id: device_id.to_string(),
        device_name: format!("Galaxy {}", device_id),
        device_image_url: format!("https://img.example/{}.jpg", device_id),
        brand_id,
        display_size: "6.2\"".to_string(),
        display_res: "1080x2340".to_string(),
        camera: "50MP".to_string(),
        video: "8K".to_string(),
        ram: "8GB".to_string(),
        chipset: "Exynos 2400".to_string(),
        battery: "4000mAh".to_string(),
        battery_type: "Li-Ion".to_string(),
        release_date: NaiveDate::from_ymd_opt(2024, 1, 31),
        body: "Glass front".to_string(),
        os_type: "Android 14".to_string(),
        storage: "256GB".to_string(),
        price: Some(799.0),
    }
}

fn list_input(brand_ids: Option<Vec<i32>>, sort: DeviceSort) -> ListDevicesInput {
    ListDevicesInput { brand_ids, sort }
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn create_then_list_round_trips_every_field() {
    let (_container, _client, repo) = setup_test_db().await;
    seed_brands(&repo).await;

    let input = create_input("D1", 9);
    let created = repo.create_device(input.clone()).await.unwrap();
    assert_eq!(created.device_id, "D1");
    assert_eq!(created.price, Some(799.0));

    let entries = repo
        .list_devices(list_input(Some(vec![9]), DeviceSort::Default))
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry.device_id, input.device_id);
    assert_eq!(entry.device_name, input.device_name);
    assert_eq!(entry.device_image_url, input.device_image_url);
    assert_eq!(entry.display_size, input.display_size);
    assert_eq!(entry.display_res, input.display_res);
    assert_eq!(entry.camera, input.camera);
    assert_eq!(entry.video, input.video);
    assert_eq!(entry.ram, input.ram);
    assert_eq!(entry.chipset, input.chipset);
    assert_eq!(entry.battery, input.battery);
    assert_eq!(entry.battery_type, input.battery_type);
    assert_eq!(entry.release_date, input.release_date);
    assert_eq!(entry.body, input.body);
    assert_eq!(entry.os_type, input.os_type);
    assert_eq!(entry.storage, input.storage);
    assert_eq!(entry.price, input.price);
    assert_eq!(entry.brand_name, "Samsung");
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn list_restricts_to_the_requested_brand_set() {
    let (_container, _client, repo) = setup_test_db().await;
    seed_brands(&repo).await;

    repo.create_device(create_input("S1", 9)).await.unwrap();
    repo.create_device(create_input("S2", 9)).await.unwrap();
    repo.create_device(create_input("A1", 48)).await.unwrap();

    let samsung_only = repo
        .list_devices(list_input(Some(vec![9]), DeviceSort::Default))
        .await
        .unwrap();
    assert_eq!(samsung_only.len(), 2);
    assert!(samsung_only.iter().all(|e| e.brand_name == "Samsung"));

    let both = repo
        .list_devices(list_input(Some(vec![9, 48]), DeviceSort::Default))
        .await
        .unwrap();
    assert_eq!(both.len(), 3);

    let unfiltered = repo
        .list_devices(list_input(None, DeviceSort::Default))
        .await
        .unwrap();
    assert_eq!(unfiltered.len(), 3);

    let unknown_brand = repo
        .list_devices(list_input(Some(vec![-1]), DeviceSort::Default))
        .await
        .unwrap();
    assert!(unknown_brand.is_empty());
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn release_date_sort_orders_both_ways() {
    let (_container, _client, repo) = setup_test_db().await;
    seed_brands(&repo).await;

    let mut older = create_input("OLD", 9);
    older.release_date = NaiveDate::from_ymd_opt(2020, 6, 1);
    let mut newer = create_input("NEW", 9);
    newer.release_date = NaiveDate::from_ymd_opt(2024, 6, 1);
    repo.create_device(older).await.unwrap();
    repo.create_device(newer).await.unwrap();

    let desc = repo
        .list_devices(list_input(None, DeviceSort::ReleaseDateDesc))
        .await
        .unwrap();
    assert_eq!(desc[0].device_id, "NEW");
    assert_eq!(desc[1].device_id, "OLD");

    let asc = repo
        .list_devices(list_input(None, DeviceSort::ReleaseDateAsc))
        .await
        .unwrap();
    assert_eq!(asc[0].device_id, "OLD");
    assert_eq!(asc[1].device_id, "NEW");
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn price_sort_places_unpriced_rows_last_in_both_directions() {
    let (_container, _client, repo) = setup_test_db().await;
    seed_brands(&repo).await;

    let mut cheap = create_input("CHEAP", 9);
    cheap.price = Some(199.0);
    let mut expensive = create_input("DEAR", 9);
    expensive.price = Some(1199.0);
    let mut unpriced = create_input("NOPRICE", 9);
    unpriced.price = None;
    repo.create_device(cheap).await.unwrap();
    repo.create_device(expensive).await.unwrap();
    repo.create_device(unpriced).await.unwrap();

    let asc = repo
        .list_devices(list_input(None, DeviceSort::PriceAsc))
        .await
        .unwrap();
    assert_eq!(asc[0].device_id, "CHEAP");
    assert_eq!(asc[1].device_id, "DEAR");
    assert_eq!(asc[2].device_id, "NOPRICE");

    let desc = repo
        .list_devices(list_input(None, DeviceSort::PriceDesc))
        .await
        .unwrap();
    assert_eq!(desc[0].device_id, "DEAR");
    assert_eq!(desc[1].device_id, "CHEAP");
    assert_eq!(desc[2].device_id, "NOPRICE");
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn search_is_case_insensitive_and_covers_brand_prefix() {
    let (_container, _client, repo) = setup_test_db().await;
    seed_brands(&repo).await;

    repo.create_device(create_input("D1", 9)).await.unwrap();

    // Device name substring, any case
    let by_name = repo
        .search_devices(SearchDevicesInput {
            term: "gAlAxY".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].device_id, "D1");

    // "brand + device name" concatenation
    let by_brand_and_name = repo
        .search_devices(SearchDevicesInput {
            term: "samsung galaxy".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(by_brand_and_name.len(), 1);

    let no_match = repo
        .search_devices(SearchDevicesInput {
            term: "zzzznomatch".to_string(),
        })
        .await
        .unwrap();
    assert!(no_match.is_empty());
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn create_rolls_back_both_rows_when_the_detail_insert_fails() {
    let (_container, client, repo) = setup_test_db().await;
    seed_brands(&repo).await;

    // The negative price violates the detail-table check constraint, so the
    // second statement of the transaction fails after the device insert
    // succeeded.
    let mut input = create_input("D1", 9);
    input.price = Some(-5.0);
    let result = repo.create_device(input).await;
    assert!(result.is_err());

    let conn = client.get_connection().await.unwrap();
    let device_rows = conn
        .query("SELECT device_id FROM devices WHERE device_id = $1", &[&"D1"])
        .await
        .unwrap();
    assert!(device_rows.is_empty());
    let detail_rows = conn
        .query(
            "SELECT device_id FROM device_details WHERE device_id = $1",
            &[&"D1"],
        )
        .await
        .unwrap();
    assert!(detail_rows.is_empty());
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn duplicate_create_fails_without_partial_state() {
    let (_container, client, repo) = setup_test_db().await;
    seed_brands(&repo).await;

    repo.create_device(create_input("D1", 9)).await.unwrap();
    let result = repo.create_device(create_input("D1", 9)).await;
    assert!(result.is_err());

    let conn = client.get_connection().await.unwrap();
    let device_count: i64 = conn
        .query_one("SELECT COUNT(*) FROM devices", &[])
        .await
        .unwrap()
        .get(0);
    let detail_count: i64 = conn
        .query_one("SELECT COUNT(*) FROM device_details", &[])
        .await
        .unwrap()
        .get(0);
    assert_eq!(device_count, 1);
    assert_eq!(detail_count, 1);
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn update_changes_only_the_named_fields() {
    let (_container, _client, repo) = setup_test_db().await;
    seed_brands(&repo).await;

    repo.create_device(create_input("D1", 9)).await.unwrap();

    let updated = repo
        .update_device(UpdateDeviceInput {
            device_id: "D1".to_string(),
            update: DeviceUpdate {
                price: Some(500.0),
                ..Default::default()
            },
        })
        .await
        .unwrap()
        .expect("device should exist");

    assert_eq!(updated.price, Some(500.0));
    // Everything else untouched
    assert_eq!(updated.device_name, "Galaxy D1");
    assert_eq!(updated.ram, "8GB");
    assert_eq!(
        updated.release_date,
        NaiveDate::from_ymd_opt(2024, 1, 31)
    );
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn update_of_unknown_id_matches_nothing_and_changes_nothing() {
    let (_container, _client, repo) = setup_test_db().await;
    seed_brands(&repo).await;

    repo.create_device(create_input("D1", 9)).await.unwrap();

    let result = repo
        .update_device(UpdateDeviceInput {
            device_id: "missing".to_string(),
            update: DeviceUpdate {
                price: Some(500.0),
                ..Default::default()
            },
        })
        .await
        .unwrap();
    assert!(result.is_none());

    let entries = repo
        .list_devices(list_input(None, DeviceSort::Default))
        .await
        .unwrap();
    assert_eq!(entries[0].price, Some(799.0));
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn delete_removes_both_rows_and_repeating_it_reports_nothing_deleted() {
    let (_container, client, repo) = setup_test_db().await;
    seed_brands(&repo).await;

    repo.create_device(create_input("D1", 9)).await.unwrap();

    let deleted = repo
        .delete_device(DeleteDeviceInput {
            device_id: "D1".to_string(),
        })
        .await
        .unwrap();
    assert!(deleted);

    let conn = client.get_connection().await.unwrap();
    for table in ["devices", "device_details"] {
        let count: i64 = conn
            .query_one(
                format!("SELECT COUNT(*) FROM {} WHERE device_id = 'D1'", table).as_str(),
                &[],
            )
            .await
            .unwrap()
            .get(0);
        assert_eq!(count, 0, "{} still holds the deleted device", table);
    }

    let deleted_again = repo
        .delete_device(DeleteDeviceInput {
            device_id: "D1".to_string(),
        })
        .await
        .unwrap();
    assert!(!deleted_again);
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn upsert_brands_skips_existing_ids() {
    let (_container, _client, repo) = setup_test_db().await;

    let first = repo
        .upsert_brands(vec![Brand {
            brand_id: 9,
            brand_name: "Samsung".to_string(),
        }])
        .await
        .unwrap();
    assert_eq!(first, 1);

    let second = repo
        .upsert_brands(vec![
            Brand {
                brand_id: 9,
                brand_name: "Samsung".to_string(),
            },
            Brand {
                brand_id: 48,
                brand_name: "Apple".to_string(),
            },
        ])
        .await
        .unwrap();
    assert_eq!(second, 1);
}
