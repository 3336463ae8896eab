//! Projection of a matched clock time onto absolute instants in a zone.

use chrono::DateTime;
use chrono::Duration;
use chrono::Timelike;
use chrono_tz::Tz;

use crate::timeparse::Meridiem;
use crate::timeparse::TimeMatch;

/// Converts a 12-hour clock hour to 24-hour form.
///
/// `12am` maps to 0 and `12pm` stays 12; otherwise pm adds 12.
pub fn to_24h(hour: u8, meridiem: Meridiem) -> u32 {
    match meridiem {
        Meridiem::Pm if hour != 12 => u32::from(hour) + 12,
        Meridiem::Pm => 12,
        Meridiem::Am if hour == 12 => 0,
        Meridiem::Am => u32::from(hour),
    }
}

/// Projects a match onto one or two instants anchored at `anchor` (the
/// caller passes "now" in the resolved zone).
///
/// With a meridiem the result is a single instant. Without one the text
/// under-specifies which half of the day is meant, so both readings are
/// returned, pm first; 12 stays ambiguous between noon and midnight. A day
/// reference shifts the anchor by whole days before the clock fields are
/// substituted. Clock times that do not exist in the zone (DST gaps) are
/// dropped.
pub fn project(time: &TimeMatch, anchor: DateTime<Tz>) -> Vec<DateTime<Tz>> {
    let minute = u32::from(time.minute.unwrap_or(0));
    let anchor = match time.day_ref {
        Some(day_ref) => anchor + Duration::days(day_ref.day_offset()),
        None => anchor,
    };

    let hours = match time.meridiem {
        Some(meridiem) => vec![to_24h(time.hour, meridiem)],
        None => vec![
            to_24h(time.hour, Meridiem::Pm),
            to_24h(time.hour, Meridiem::Am),
        ],
    };

    hours
        .into_iter()
        .filter_map(|hour| at_clock(anchor, hour, minute))
        .collect()
}

/// Label for a projected instant, minutes shown only when non-zero.
pub fn clock_label(instant: &DateTime<Tz>) -> String {
    if instant.minute() != 0 {
        instant.format("%I:%M %p").to_string()
    } else {
        instant.format("%I %p").to_string()
    }
}

fn at_clock(anchor: DateTime<Tz>, hour: u32, minute: u32) -> Option<DateTime<Tz>> {
    anchor
        .with_hour(hour)?
        .with_minute(minute)?
        .with_second(0)?
        .with_nanosecond(0)
}
