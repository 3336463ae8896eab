//! JSON-snapshot implementation of the preference store.

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use log::info;

use crate::model::UserPreference;
use crate::store::PreferenceStore;
use crate::store::StoreError;

/// Flat `user_id -> preference` mapping backed by a single JSON file.
///
/// The snapshot is loaded once at startup and rewritten in full on every
/// mutation. Single-writer discipline comes from the internal lock; the
/// serialized snapshot is taken under it, so concurrent mutations cannot
/// interleave a torn write.
pub struct JsonPreferenceStore {
    path: PathBuf,
    data: RwLock<HashMap<u64, UserPreference>>,
}

impl JsonPreferenceStore {
    /// Loads the snapshot at `path`, starting empty if the file is missing.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|e| StoreError::CorruptSnapshot {
                    path: path.to_string_lossy().into_owned(),
                    source: e,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "No preference snapshot at {}, starting empty.",
                    path.to_string_lossy()
                );
                HashMap::new()
            }
            Err(e) => {
                return Err(StoreError::ReadError {
                    path: path.to_string_lossy().into_owned(),
                    source: e,
                });
            }
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Number of stored records, reported in the startup log.
    pub fn len(&self) -> usize {
        self.data.read().expect("preference lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies a mutation and serializes the resulting snapshot under the
    /// lock, then writes it out.
    async fn mutate(
        &self,
        f: impl FnOnce(&mut HashMap<u64, UserPreference>),
    ) -> Result<(), StoreError> {
        let serialized = {
            let mut data = self.data.write().expect("preference lock poisoned");
            f(&mut data);
            serde_json::to_string_pretty(&*data).expect("preference map serializes")
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::WriteError {
                    path: self.path.to_string_lossy().into_owned(),
                    source: e,
                })?;
        }

        tokio::fs::write(&self.path, serialized)
            .await
            .map_err(|e| StoreError::WriteError {
                path: self.path.to_string_lossy().into_owned(),
                source: e,
            })
    }
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    async fn get(&self, user_id: u64) -> Option<UserPreference> {
        self.data
            .read()
            .expect("preference lock poisoned")
            .get(&user_id)
            .cloned()
    }

    async fn set_timezone(&self, user_id: u64, timezone: &str) -> Result<(), StoreError> {
        let timezone = timezone.to_string();
        self.mutate(|data| {
            let entry = data.entry(user_id).or_default();
            entry.timezone = Some(timezone);
        })
        .await
    }

    async fn set_enabled(&self, user_id: u64, enabled: bool) -> Result<(), StoreError> {
        self.mutate(|data| {
            data.entry(user_id).or_default().enabled = enabled;
        })
        .await
    }

    async fn clear_timezone(&self, user_id: u64) -> Result<(), StoreError> {
        self.mutate(|data| {
            if let Some(entry) = data.get_mut(&user_id) {
                entry.timezone = None;
            }
        })
        .await
    }
}
