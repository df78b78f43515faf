use chrono::{Duration, TimeZone, Utc};
use resource_actor::ActorClient;
use std::sync::Arc;
use stockroom::clock::{Clock, ManualClock, SharedClock};
use stockroom::highlight::AlertTag;
use stockroom::lifecycle::InventorySystem;
use stockroom::model::{AccountCreate, SettingsUpdate, Unit};
use stockroom::product_actor::ProductError;
use stockroom::storage::KvStore;

fn start_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap())
}

fn shop(email: &str) -> AccountCreate {
    AccountCreate {
        owner_name: "Meena".to_string(),
        shop_name: "Meena Kirana".to_string(),
        shop_address: "7 Market Lane".to_string(),
        shop_category: "grocery".to_string(),
        email: email.to_string(),
        password: "ledger".to_string(),
    }
}

/// Full end-to-end test with real actors: quantities flow through the product
/// actor and the classifier sees the resulting history.
#[tokio::test]
async fn test_inventory_alerts_end_to_end() {
    let clock = start_clock();
    let shared: SharedClock = Arc::new(clock.clone());
    let system = InventorySystem::in_memory(shared).expect("Failed to start system");
    let products = &system.product_client;

    let oil = products.add_product("Mustard Oil").await.unwrap();
    let salt = products.add_product("Salt").await.unwrap();
    let milk = products.add_product("Milk").await.unwrap();

    products.set_quantity(oil, 10.0).await.unwrap();
    products.set_quantity(oil, 7.0).await.unwrap(); // 30% drop
    products.set_quantity(salt, 4.0).await.unwrap();
    products.set_unit(milk, Unit::Liter).await.unwrap();
    products
        .set_expiry(milk, Some(clock.now() + Duration::days(2)))
        .await
        .unwrap();

    let settings = system.settings.current();
    let tags: Vec<(String, Option<AlertTag>)> = products
        .list_with_alerts(&settings, clock.now())
        .await
        .unwrap()
        .into_iter()
        .map(|(p, tag)| (p.name, tag))
        .collect();
    assert_eq!(
        tags,
        vec![
            ("Mustard Oil".to_string(), Some(AlertTag::LowStock)),
            ("Salt".to_string(), None),
            ("Milk".to_string(), Some(AlertTag::Expiring)),
        ]
    );

    // A month later salt has gone stale; an increment clears it.
    clock.advance(Duration::days(31));
    let salt_row = products.get(salt).await.unwrap().unwrap();
    assert_eq!(
        stockroom::highlight::classify(&salt_row, &settings, clock.now()),
        Some(AlertTag::Stale)
    );
    products.increment(salt).await.unwrap();
    let salt_row = products.get(salt).await.unwrap().unwrap();
    assert_eq!(salt_row.previous_qty, 4.0);
    assert_eq!(salt_row.current_qty, 5.0);
    assert_eq!(
        stockroom::highlight::classify(&salt_row, &settings, clock.now()),
        None
    );

    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let clock: SharedClock = Arc::new(start_clock());

    let first = InventorySystem::with_store(KvStore::open(dir.path()).unwrap(), clock.clone(), 8)
        .expect("Failed to start system");
    first.auth.signup(shop("meena@example.com")).await.unwrap();
    let rice = first.product_client.add_product("Rice").await.unwrap();
    let dal = first.product_client.add_product("Dal").await.unwrap();
    first.product_client.set_quantity(rice, 25.0).await.unwrap();
    first.product_client.delete(dal).await.unwrap();
    first
        .settings
        .update(SettingsUpdate {
            low_stock_percent: Some(40),
            ..Default::default()
        })
        .unwrap();
    first.shutdown().await.expect("Failed to shutdown");

    let second = InventorySystem::with_store(KvStore::open(dir.path()).unwrap(), clock, 8)
        .expect("Failed to restart system");
    let names: Vec<String> = second
        .product_client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Rice"]);
    assert_eq!(
        second.product_client.get(rice).await.unwrap().unwrap().current_qty,
        25.0
    );
    assert_eq!(second.settings.current().low_stock_percent, 40);
    assert_eq!(
        second.auth.require_user().unwrap().email,
        "meena@example.com"
    );
    second.auth.login("MEENA@example.com", "ledger").await.unwrap();

    second.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_missing_product_and_bad_input_errors() {
    let system = InventorySystem::in_memory(Arc::new(start_clock())).unwrap();
    let products = &system.product_client;

    assert_eq!(
        products.add_product("   ").await,
        Err(ProductError::InvalidName)
    );

    let id = products.add_product("Soap").await.unwrap();
    products.delete(id).await.unwrap();
    assert!(matches!(
        products.increment(id).await,
        Err(ProductError::NotFound(_))
    ));
    assert!(matches!(
        products.rename(id, "Soap Bar".to_string()).await,
        Err(ProductError::NotFound(_))
    ));
    assert!(products.get(id).await.unwrap().is_none());

    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_concurrent_increments_are_serialized() {
    let system = InventorySystem::in_memory(Arc::new(start_clock())).unwrap();
    let id = system.product_client.add_product("Matches").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..25 {
        let client = system.product_client.clone();
        handles.push(tokio::spawn(async move { client.increment(id).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let product = system.product_client.get(id).await.unwrap().unwrap();
    assert_eq!(product.current_qty, 25.0);
    assert_eq!(product.previous_qty, 24.0);

    system.shutdown().await.expect("Failed to shutdown");
}
