//! Clan join detection and welcome text.

use std::collections::HashSet;

use poise::serenity_prelude::RoleId;
use rand::seq::IndexedRandom;

use crate::config::ClanConfig;

/// Celebratory openers for clan welcomes; `{mention}` is substituted with
/// the new member's mention.
pub const WELCOME_TEXTS: [&str; 3] = [
    "Hey hey {mention}!! ⚡",
    "🤺 Engarde!! {mention}",
    "⚔️{mention} barged in..",
];

/// Returns the clan a member just joined, if any.
///
/// A welcome fires only on the first clan role: members already holding any
/// clan role before the update are skipped.
pub fn detect_clan_join<'a>(
    clans: &'a [ClanConfig],
    before: &HashSet<RoleId>,
    after: &HashSet<RoleId>,
) -> Option<&'a ClanConfig> {
    if clans.iter().any(|clan| before.contains(&clan.role_id)) {
        return None;
    }
    clans.iter().find(|clan| after.contains(&clan.role_id))
}

/// Picks a random welcome line for a member mention.
pub fn welcome_line(mention: &str) -> String {
    let template = WELCOME_TEXTS
        .choose(&mut rand::rng())
        .unwrap_or(&WELCOME_TEXTS[0]);
    render_welcome(template, mention)
}

fn render_welcome(template: &str, mention: &str) -> String {
    template.replace("{mention}", mention)
}

/// Footer line for the welcome embed.
pub fn welcome_footer(clan_name: &str, member_count: usize) -> String {
    format!("{} now has {} members.", clan_name, member_count)
}
