//! Timezone resolution for a matched time.
//!
//! Pure decision logic over preference data; guild-member lookup and reply
//! rendering live in the bot layer.

use chrono_tz::Tz;

use crate::model::UserPreference;

/// What the resolver knows about one candidate subject (the message author,
/// or the user a `for <someone>` clause points at).
#[derive(Clone, Debug, Default)]
pub struct SubjectView {
    pub user_id: u64,
    pub preference: Option<UserPreference>,
    /// Whether the subject is currently a member of the guild.
    pub is_guild_member: bool,
}

/// Returns the timezone a match should be projected into, or `None` when
/// the match must be skipped silently.
///
/// A targeted match never falls back to the author: if the target is not a
/// guild member, or has no usable preference, the match is dropped. The
/// author path has no membership requirement, so times mentioned in DMs
/// still resolve.
pub fn resolve_timezone(author: &SubjectView, target: Option<&SubjectView>) -> Option<Tz> {
    let subject = match target {
        Some(target) if !target.is_guild_member => return None,
        Some(target) => target,
        None => author,
    };
    subject.preference.as_ref()?.usable_timezone()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(timezone: Option<&str>, enabled: bool, is_guild_member: bool) -> SubjectView {
        SubjectView {
            user_id: 1,
            preference: Some(UserPreference {
                timezone: timezone.map(str::to_string),
                enabled,
            }),
            is_guild_member,
        }
    }

    #[test]
    fn test_author_with_usable_preference() {
        let author = subject(Some("Asia/Kolkata"), true, true);
        assert_eq!(
            resolve_timezone(&author, None),
            Some(chrono_tz::Asia::Kolkata)
        );
    }

    #[test]
    fn test_disabled_author_never_resolves() {
        let author = subject(Some("Asia/Kolkata"), false, true);
        assert_eq!(resolve_timezone(&author, None), None);
    }

    #[test]
    fn test_author_without_preference() {
        let author = SubjectView {
            user_id: 1,
            preference: None,
            is_guild_member: true,
        };
        assert_eq!(resolve_timezone(&author, None), None);
    }

    #[test]
    fn test_cleared_timezone_does_not_resolve() {
        let author = subject(Some(""), true, true);
        assert_eq!(resolve_timezone(&author, None), None);
        let author = subject(None, true, true);
        assert_eq!(resolve_timezone(&author, None), None);
    }

    #[test]
    fn test_target_does_not_fall_back_to_author() {
        let author = subject(Some("Asia/Kolkata"), true, true);
        let target = subject(None, true, true);
        assert_eq!(resolve_timezone(&author, Some(&target)), None);
    }

    #[test]
    fn test_target_must_be_guild_member() {
        let author = subject(Some("Asia/Kolkata"), true, true);
        let target = subject(Some("Europe/Berlin"), true, false);
        assert_eq!(resolve_timezone(&author, Some(&target)), None);
    }

    #[test]
    fn test_author_resolves_outside_guild() {
        // A DM author has no guild membership but their own times still relay
        let author = subject(Some("Asia/Kolkata"), true, false);
        assert_eq!(
            resolve_timezone(&author, None),
            Some(chrono_tz::Asia::Kolkata)
        );
    }

    #[test]
    fn test_target_with_usable_preference() {
        let author = subject(None, false, true);
        let target = subject(Some("Europe/Berlin"), true, true);
        assert_eq!(
            resolve_timezone(&author, Some(&target)),
            Some(chrono_tz::Europe::Berlin)
        );
    }

    #[test]
    fn test_unparseable_stored_name_is_skipped() {
        let author = subject(Some("Mars/Olympus"), true, true);
        assert_eq!(resolve_timezone(&author, None), None);
    }
}
