use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error("Unable to find timezone `{name}`")]
    UnknownTimezone { name: String },

    #[error("You have not yet set a timezone")]
    NoTimezoneSet,

    #[error("StoreError: {0}")]
    StoreError(#[from] StoreError),
}
