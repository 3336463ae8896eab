//! Timezone preference management on top of the injected store.
//!
//! Enforces the invariants the store itself stays agnostic of: only
//! canonical IANA names are stored, and the enabled flag can only be toggled
//! while a timezone is set.

use std::sync::Arc;

use crate::model::UserPreference;
use crate::service::error::ServiceError;
use crate::store::PreferenceStore;
use crate::timezone::catalog;

pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, user_id: u64) -> Option<UserPreference> {
        self.store.get(user_id).await
    }

    /// Stores a timezone after validating it against the IANA catalog.
    pub async fn set_timezone(&self, user_id: u64, name: &str) -> Result<(), ServiceError> {
        if !catalog::is_valid(name) {
            return Err(ServiceError::UnknownTimezone {
                name: name.to_string(),
            });
        }
        self.store.set_timezone(user_id, name).await?;
        Ok(())
    }

    /// Clears the stored timezone; the record and its enabled flag persist.
    pub async fn clear_timezone(&self, user_id: u64) -> Result<(), ServiceError> {
        if self.get(user_id).await.is_none() {
            return Err(ServiceError::NoTimezoneSet);
        }
        self.store.clear_timezone(user_id).await?;
        Ok(())
    }

    /// Toggles message scanning. Requires a stored timezone either way, so
    /// an enabled record always carries one.
    pub async fn set_enabled(&self, user_id: u64, enabled: bool) -> Result<(), ServiceError> {
        let has_timezone = self
            .get(user_id)
            .await
            .is_some_and(|pref| pref.has_timezone());
        if !has_timezone {
            return Err(ServiceError::NoTimezoneSet);
        }
        self.store.set_enabled(user_id, enabled).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockPreferenceStore;

    #[tokio::test]
    async fn test_set_timezone_rejects_unknown_name() {
        let mut store = MockPreferenceStore::new();
        store.expect_set_timezone().never();
        let service = PreferenceService::new(Arc::new(store));

        let err = service.set_timezone(1, "Asia/Gotham").await.unwrap_err();
        assert!(matches!(err, ServiceError::UnknownTimezone { .. }));
    }

    #[tokio::test]
    async fn test_set_timezone_stores_valid_name() {
        let mut store = MockPreferenceStore::new();
        store
            .expect_set_timezone()
            .withf(|user_id, name| *user_id == 1 && name == "Asia/Kolkata")
            .once()
            .returning(|_, _| Ok(()));
        let service = PreferenceService::new(Arc::new(store));

        service.set_timezone(1, "Asia/Kolkata").await.unwrap();
    }

    #[tokio::test]
    async fn test_enable_requires_stored_timezone() {
        let mut store = MockPreferenceStore::new();
        store.expect_get().returning(|_| None);
        store.expect_set_enabled().never();
        let service = PreferenceService::new(Arc::new(store));

        let err = service.set_enabled(1, true).await.unwrap_err();
        assert!(matches!(err, ServiceError::NoTimezoneSet));
    }

    #[tokio::test]
    async fn test_enable_with_cleared_timezone_fails() {
        let mut store = MockPreferenceStore::new();
        store.expect_get().returning(|_| {
            Some(UserPreference {
                timezone: None,
                enabled: false,
            })
        });
        store.expect_set_enabled().never();
        let service = PreferenceService::new(Arc::new(store));

        let err = service.set_enabled(1, true).await.unwrap_err();
        assert!(matches!(err, ServiceError::NoTimezoneSet));
    }

    #[tokio::test]
    async fn test_clear_requires_existing_record() {
        let mut store = MockPreferenceStore::new();
        store.expect_get().returning(|_| None);
        store.expect_clear_timezone().never();
        let service = PreferenceService::new(Arc::new(store));

        let err = service.clear_timezone(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NoTimezoneSet));
    }
}
