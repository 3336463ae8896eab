use arena_bot::store::PreferenceStore;
use arena_bot::store::StoreError;
use arena_bot::store::json_store::JsonPreferenceStore;

mod common;

#[tokio::test]
async fn test_missing_file_starts_empty() {
    let (store, path) = common::setup_store().await;

    assert!(store.is_empty());
    assert!(store.get(1).await.is_none());

    common::teardown_store(path).await;
}

#[tokio::test]
async fn test_set_and_get_survives_reload() {
    let (store, path) = common::setup_store().await;

    store
        .set_timezone(1, "Asia/Kolkata")
        .await
        .expect("Failed to set timezone");
    store
        .set_enabled(1, true)
        .await
        .expect("Failed to set enabled");

    let pref = store.get(1).await.expect("Missing preference");
    assert_eq!(pref.timezone.as_deref(), Some("Asia/Kolkata"));
    assert!(pref.enabled);

    // A fresh store reading the same snapshot sees the same record
    let reloaded = JsonPreferenceStore::load(&path)
        .await
        .expect("Failed to reload store");
    let pref = reloaded.get(1).await.expect("Missing persisted preference");
    assert_eq!(pref.timezone.as_deref(), Some("Asia/Kolkata"));
    assert!(pref.enabled);

    common::teardown_store(path).await;
}

#[tokio::test]
async fn test_clear_preserves_enabled_flag() {
    let (store, path) = common::setup_store().await;

    store.set_timezone(1, "Europe/Berlin").await.unwrap();
    store.set_enabled(1, true).await.unwrap();
    store.clear_timezone(1).await.unwrap();

    let pref = store.get(1).await.expect("Record should persist");
    assert!(pref.timezone.is_none());
    assert!(pref.enabled);

    let reloaded = JsonPreferenceStore::load(&path).await.unwrap();
    let pref = reloaded.get(1).await.expect("Record should persist on disk");
    assert!(pref.timezone.is_none());
    assert!(pref.enabled);

    common::teardown_store(path).await;
}

#[tokio::test]
async fn test_clear_without_record_is_noop() {
    let (store, path) = common::setup_store().await;

    store.clear_timezone(42).await.unwrap();
    assert!(store.get(42).await.is_none());

    common::teardown_store(path).await;
}

#[tokio::test]
async fn test_set_timezone_keeps_other_users() {
    let (store, path) = common::setup_store().await;

    store.set_timezone(1, "Asia/Kolkata").await.unwrap();
    store.set_timezone(2, "America/New_York").await.unwrap();
    store.set_timezone(1, "Europe/London").await.unwrap();

    assert_eq!(
        store.get(1).await.unwrap().timezone.as_deref(),
        Some("Europe/London")
    );
    assert_eq!(
        store.get(2).await.unwrap().timezone.as_deref(),
        Some("America/New_York")
    );

    common::teardown_store(path).await;
}

#[tokio::test]
async fn test_corrupt_snapshot_is_rejected() {
    let path = std::env::temp_dir().join(format!("arena-bot-test-{}.json", uuid::Uuid::new_v4()));
    tokio::fs::write(&path, "{not json")
        .await
        .expect("Failed to write corrupt file");

    let result = JsonPreferenceStore::load(&path).await;
    assert!(matches!(result, Err(StoreError::CorruptSnapshot { .. })));

    common::teardown_store(path).await;
}
