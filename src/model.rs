//! Core data model shared across services.

use serde::Deserialize;
use serde::Serialize;

/// Per-user timezone preference.
///
/// A record is created the first time a user sets a timezone and is never
/// deleted; clearing empties the timezone but keeps the record and the
/// enabled flag. A user only contributes resolved times while `enabled` is
/// true and a timezone is stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreference {
    pub timezone: Option<String>,
    pub enabled: bool,
}

impl UserPreference {
    /// The stored timezone name, only when the preference is usable for
    /// resolution: enabled and non-empty.
    pub fn usable_timezone(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.timezone.as_deref().filter(|tz| !tz.is_empty())
    }

    /// Whether any timezone is stored, regardless of the enabled flag.
    pub fn has_timezone(&self) -> bool {
        self.timezone.as_deref().is_some_and(|tz| !tz.is_empty())
    }
}
