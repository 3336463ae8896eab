use arena_bot::service::error::ServiceError;
use arena_bot::service::preference_service::PreferenceService;

mod common;

#[tokio::test]
async fn test_set_enable_clear_lifecycle() {
    let (store, path) = common::setup_store().await;
    let service = PreferenceService::new(store.clone());

    // Enabling before any timezone is stored is rejected
    let err = service.set_enabled(1, true).await.unwrap_err();
    assert!(matches!(err, ServiceError::NoTimezoneSet));

    service.set_timezone(1, "Asia/Kolkata").await.unwrap();
    service.set_enabled(1, true).await.unwrap();

    let pref = service.get(1).await.expect("Missing preference");
    assert!(pref.usable_timezone().is_some());

    // Clearing keeps the record but makes the timezone unusable
    service.clear_timezone(1).await.unwrap();
    let pref = service.get(1).await.expect("Record should persist");
    assert!(pref.timezone.is_none());
    assert!(pref.enabled);

    // And re-enabling now requires setting a timezone again
    let err = service.set_enabled(1, true).await.unwrap_err();
    assert!(matches!(err, ServiceError::NoTimezoneSet));

    common::teardown_store(path).await;
}

#[tokio::test]
async fn test_unknown_timezone_is_rejected_without_writing() {
    let (store, path) = common::setup_store().await;
    let service = PreferenceService::new(store.clone());

    let err = service.set_timezone(1, "Asia/Gotham").await.unwrap_err();
    assert!(matches!(err, ServiceError::UnknownTimezone { .. }));
    assert!(service.get(1).await.is_none());

    common::teardown_store(path).await;
}

#[tokio::test]
async fn test_clear_without_record_fails() {
    let (store, path) = common::setup_store().await;
    let service = PreferenceService::new(store.clone());

    let err = service.clear_timezone(1).await.unwrap_err();
    assert!(matches!(err, ServiceError::NoTimezoneSet));

    common::teardown_store(path).await;
}
