//! The IANA timezone catalog shown by `timezone info` and used to validate
//! `timezone set` arguments.
//!
//! Listings embed each zone's current local time, so pages are regenerated
//! per request rather than cached.

use chrono::DateTime;
use chrono::Offset;
use chrono::Utc;
use chrono_tz::TZ_VARIANTS;
use chrono_tz::Tz;

/// Zones listed per catalog page.
pub const PAGE_SIZE: usize = 100;

/// Maximum autocomplete suggestions returned to Discord.
pub const MAX_SUGGESTIONS: usize = 20;

/// Whether `name` is a canonical IANA timezone name.
pub fn is_valid(name: &str) -> bool {
    name.parse::<Tz>().is_ok()
}

/// All IANA zones sorted ascending by their UTC offset at `now`, name as a
/// tiebreak so pages stay stable within one offset.
pub fn sorted_timezones(now: DateTime<Utc>) -> Vec<Tz> {
    let mut zones: Vec<(i32, Tz)> = TZ_VARIANTS
        .iter()
        .map(|tz| (now.with_timezone(tz).offset().fix().local_minus_utc(), *tz))
        .collect();
    zones.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.name().cmp(b.1.name())));
    zones.into_iter().map(|(_, tz)| tz).collect()
}

/// Renders the catalog into page descriptions of [`PAGE_SIZE`] zones, each
/// line carrying the zone's current weekday and local clock time.
pub fn catalog_pages(now: DateTime<Utc>) -> Vec<String> {
    sorted_timezones(now)
        .chunks(PAGE_SIZE)
        .map(|chunk| {
            chunk
                .iter()
                .map(|tz| {
                    format!(
                        "- {} ▪ {}",
                        tz.name(),
                        now.with_timezone(tz).format("%A, %I:%M %p")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

/// Case-insensitive substring search over zone names for autocomplete.
pub fn search(partial: &str) -> Vec<&'static str> {
    let partial = partial.to_lowercase();
    TZ_VARIANTS
        .iter()
        .map(|tz| tz.name())
        .filter(|name| name.to_lowercase().contains(&partial))
        .take(MAX_SUGGESTIONS)
        .collect()
}
