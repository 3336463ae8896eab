//! Extraction of informally-written clock times from chat messages.
//!
//! Implemented as a small explicit grammar: a [`tokenizer`] splits the
//! message into word/number/punctuation tokens and the [`parser`] assembles
//! [`TimeMatch`] records from them. At most [`MAX_MATCHES`] matches are
//! returned per message.

pub mod parser;
pub mod tokenizer;

pub use parser::extract_times;

/// Matches beyond this count are discarded.
pub const MAX_MATCHES: usize = 3;

/// Half-of-day marker attached to a clock time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

/// Relative-day qualifier from the fixed vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayReference {
    Yesterday,
    Tomorrow,
    DayAfterTomorrow,
    DayBeforeYesterday,
}

impl DayReference {
    /// Whole-day shift applied to the anchor date.
    pub fn day_offset(&self) -> i64 {
        match self {
            DayReference::Yesterday => -1,
            DayReference::Tomorrow => 1,
            DayReference::DayAfterTomorrow => 2,
            DayReference::DayBeforeYesterday => -2,
        }
    }
}

/// A `for <someone>` target as written, before guild-member resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetRef {
    /// A raw `<@id>` or `<@!id>` mention.
    Mention(u64),
    /// A bare numeric user ID.
    Id(u64),
    /// A name-ish word; resolved against guild members, dropped if unknown.
    Name(String),
}

/// One clock-time mention found in a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeMatch {
    /// 12-hour clock hour, 1-12.
    pub hour: u8,
    /// Minute, if written with a `:` separator.
    pub minute: Option<u8>,
    pub meridiem: Option<Meridiem>,
    pub day_ref: Option<DayReference>,
    pub target: Option<TargetRef>,
}
