//! Per-user preference persistence.
//!
//! The store is an injected interface so the resolution logic never touches
//! the backing file directly. The shipped implementation keeps the whole
//! mapping in memory and rewrites a JSON snapshot on every mutation, last
//! write wins.

pub mod error;
pub mod json_store;

use async_trait::async_trait;

pub use error::StoreError;
pub use json_store::JsonPreferenceStore;

use crate::model::UserPreference;

/// Key-value access to [`UserPreference`] records, keyed by Discord user ID.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored preference for a user, if any.
    async fn get(&self, user_id: u64) -> Option<UserPreference>;

    /// Stores a timezone, creating the record if needed. The enabled flag of
    /// an existing record is preserved.
    async fn set_timezone(&self, user_id: u64, timezone: &str) -> Result<(), StoreError>;

    /// Toggles scanning of the user's messages.
    async fn set_enabled(&self, user_id: u64, enabled: bool) -> Result<(), StoreError>;

    /// Empties the stored timezone. The record and its enabled flag persist.
    async fn clear_timezone(&self, user_id: u64) -> Result<(), StoreError>;
}
