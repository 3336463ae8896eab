//! Vanity role decision logic.
//!
//! Pure functions over a member's presence snapshot; role mutation, DM
//! notifications and Discord lookups stay in the bot layer.

use std::collections::HashMap;
use std::time::Duration;
use std::time::Instant;

/// Re-grant suppression window after an automatic removal.
pub const COOLDOWN: Duration = Duration::from_secs(30);

/// What the engine decided for one member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VanityAction {
    Grant,
    Revoke,
    Keep,
}

/// Promotional-string matching rules for custom statuses.
#[derive(Clone, Debug)]
pub struct StatusRules {
    site_host: String,
    invite_slug: String,
}

impl StatusRules {
    pub fn new(site_host: impl Into<String>, invite_slug: impl Into<String>) -> Self {
        Self {
            site_host: site_host.into(),
            invite_slug: invite_slug.into(),
        }
    }

    /// Whether a custom-status text advertises the community.
    ///
    /// The site host matches with an optional scheme and `www.` prefix. The
    /// vanity invite forms only count while `allow_invite` is set (guild at
    /// premium tier 3). All checks are token-delimited, so substrings inside
    /// longer words do not match.
    pub fn mentions_community(&self, status: &str, allow_invite: bool) -> bool {
        status.split_whitespace().any(|token| {
            if allow_invite && self.is_invite_token(token) {
                return true;
            }
            self.is_site_token(token)
        })
    }

    fn is_invite_token(&self, token: &str) -> bool {
        let Some(slug) = token
            .strip_prefix("discord.gg/")
            .or_else(|| token.strip_prefix(".gg/"))
        else {
            return false;
        };
        slug.eq_ignore_ascii_case(&self.invite_slug)
    }

    fn is_site_token(&self, token: &str) -> bool {
        let token = token
            .strip_prefix("https://")
            .or_else(|| token.strip_prefix("http://"))
            .unwrap_or(token);
        let token = token.strip_prefix("www.").unwrap_or(token);
        token.eq_ignore_ascii_case(&self.site_host)
    }
}

/// Presence snapshot of one member, as seen by the decision function.
#[derive(Clone, Debug, Default)]
pub struct MemberStatusView {
    pub has_vanity_role: bool,
    pub is_offline: bool,
    pub custom_status: Option<String>,
}

/// Decides the vanity action for a member.
///
/// The role is revoked whenever it is held but the member is offline or the
/// promo string left their status. A grant requires the promo string, no
/// held role, and no active cooldown.
pub fn evaluate(
    view: &MemberStatusView,
    rules: &StatusRules,
    allow_invite: bool,
    cooldown_active: bool,
) -> VanityAction {
    let advertising = !view.is_offline
        && view
            .custom_status
            .as_deref()
            .is_some_and(|status| rules.mentions_community(status, allow_invite));

    if view.has_vanity_role && !advertising {
        return VanityAction::Revoke;
    }
    if !view.has_vanity_role && advertising && !cooldown_active {
        return VanityAction::Grant;
    }
    VanityAction::Keep
}

/// In-memory `user_id -> expiry` map suppressing automatic re-grants.
///
/// Not persisted across restarts; a plain timestamp comparison, no scheduled
/// tasks.
#[derive(Default)]
pub struct VanityCooldown {
    expiries: HashMap<u64, Instant>,
}

impl VanityCooldown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the suppression window for a user.
    pub fn suppress(&mut self, user_id: u64, now: Instant) {
        self.expiries.insert(user_id, now + COOLDOWN);
    }

    pub fn is_active(&self, user_id: u64, now: Instant) -> bool {
        self.expiries.get(&user_id).is_some_and(|expiry| *expiry > now)
    }

    /// Drops the entry, used when a grant goes through.
    pub fn clear(&mut self, user_id: u64) {
        self.expiries.remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> StatusRules {
        StatusRules::new("pokearena.xyz", "pokearena")
    }

    #[test]
    fn test_site_token_with_scheme_and_www() {
        let r = rules();
        for status in [
            "pokearena.xyz",
            "play at www.pokearena.xyz now",
            "https://pokearena.xyz",
            "http://www.pokearena.xyz rocks",
        ] {
            assert!(r.mentions_community(status, false), "{status}");
        }
    }

    #[test]
    fn test_invite_requires_allowance() {
        let r = rules();
        assert!(r.mentions_community("join discord.gg/pokearena", true));
        assert!(r.mentions_community(".gg/pokearena", true));
        assert!(!r.mentions_community("join discord.gg/pokearena", false));
    }

    #[test]
    fn test_substrings_do_not_match() {
        let r = rules();
        assert!(!r.mentions_community("mypokearena.xyz", false));
        assert!(!r.mentions_community("pokearena.xyz.evil.com", false));
        assert!(!r.mentions_community("discord.gg/other", true));
    }

    fn view(has_role: bool, offline: bool, status: Option<&str>) -> MemberStatusView {
        MemberStatusView {
            has_vanity_role: has_role,
            is_offline: offline,
            custom_status: status.map(str::to_string),
        }
    }

    #[test]
    fn test_grant_when_advertising_without_role() {
        let action = evaluate(&view(false, false, Some("pokearena.xyz")), &rules(), false, false);
        assert_eq!(action, VanityAction::Grant);
    }

    #[test]
    fn test_cooldown_blocks_grant() {
        let action = evaluate(&view(false, false, Some("pokearena.xyz")), &rules(), false, true);
        assert_eq!(action, VanityAction::Keep);
    }

    #[test]
    fn test_revoke_when_offline() {
        let action = evaluate(&view(true, true, Some("pokearena.xyz")), &rules(), false, false);
        assert_eq!(action, VanityAction::Revoke);
    }

    #[test]
    fn test_revoke_when_status_lost_promo() {
        let action = evaluate(&view(true, false, Some("gaming")), &rules(), false, false);
        assert_eq!(action, VanityAction::Revoke);

        let action = evaluate(&view(true, false, None), &rules(), false, false);
        assert_eq!(action, VanityAction::Revoke);
    }

    #[test]
    fn test_keep_when_nothing_changes() {
        let action = evaluate(&view(true, false, Some("pokearena.xyz")), &rules(), false, false);
        assert_eq!(action, VanityAction::Keep);

        let action = evaluate(&view(false, false, Some("gaming")), &rules(), false, false);
        assert_eq!(action, VanityAction::Keep);
    }

    #[test]
    fn test_cooldown_window() {
        let mut cooldown = VanityCooldown::new();
        let now = Instant::now();

        assert!(!cooldown.is_active(1, now));
        cooldown.suppress(1, now);
        assert!(cooldown.is_active(1, now));
        assert!(cooldown.is_active(1, now + COOLDOWN - Duration::from_millis(1)));
        assert!(!cooldown.is_active(1, now + COOLDOWN));

        cooldown.suppress(2, now);
        cooldown.clear(2);
        assert!(!cooldown.is_active(2, now));
    }
}
