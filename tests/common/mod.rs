use std::path::PathBuf;
use std::sync::Arc;

use arena_bot::store::json_store::JsonPreferenceStore;
use uuid::Uuid;

pub async fn setup_store() -> (Arc<JsonPreferenceStore>, PathBuf) {
    let uuid = Uuid::new_v4();
    let path = std::env::temp_dir().join(format!("arena-bot-test-{}.json", uuid));

    let store = JsonPreferenceStore::load(&path)
        .await
        .expect("Failed to create store");

    (Arc::new(store), path)
}

pub async fn teardown_store(path: PathBuf) {
    if path.exists() {
        let _ = std::fs::remove_file(path);
    }
}
