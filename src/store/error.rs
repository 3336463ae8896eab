#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("Failed to read preference snapshot at {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write preference snapshot at {path}: {source}")]
    WriteError {
        path: String,
        source: std::io::Error,
    },

    #[error("Corrupt preference snapshot at {path}: {source}")]
    CorruptSnapshot {
        path: String,
        source: serde_json::Error,
    },
}
