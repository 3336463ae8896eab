//! Embed builders shared between event handlers and commands.

use poise::serenity_prelude::Colour;
use poise::serenity_prelude::CreateEmbed;
use poise::serenity_prelude::CreateEmbedAuthor;
use poise::serenity_prelude::CreateEmbedFooter;

use crate::clan;
use crate::config::ClanConfig;
use crate::service::time_relay_service::ReplyGroup;

/// Background colour matching Discord's own embed chrome.
pub const DARK: Colour = Colour::new(0x2B2D31);
pub const GOLD: Colour = Colour::new(0xF1C40F);
pub const BLURPLE: Colour = Colour::new(0x5865F2);
pub const PINK: Colour = Colour::new(0xEB459E);
pub const BRAND_RED: Colour = Colour::new(0xED4245);

/// Title the ally DM embed is recognized by when editing past notifications.
pub const ALLY_DM_TITLE: &str = "⭐ New Ally";

/// Renders one reply group into a time-relay embed.
pub fn time_reply_embed(group: &ReplyGroup) -> CreateEmbed<'static> {
    let description = group
        .lines
        .iter()
        .map(|line| {
            format!(
                "- {} -> <t:{}:F> (<t:{}:R>) your time",
                line.label, line.unix, line.unix
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut author = CreateEmbedAuthor::new(group.name.clone());
    if let Some(url) = &group.avatar_url {
        author = author.icon_url(url.clone());
    }

    CreateEmbed::new()
        .colour(DARK)
        .author(author)
        .description(description)
}

/// The DM notification for a vanity role change. The same embed is sent
/// fresh on a first grant and rebuilt wholesale when editing an earlier one,
/// so both paths stay in sync.
pub fn ally_dm_embed(
    member_name: &str,
    thumbnail_url: Option<String>,
    now_unix: i64,
    granted: bool,
) -> CreateEmbed<'static> {
    let action = if granted {
        "✅ Added **Ally** role to you"
    } else {
        "❌ Removed **Ally** role from you"
    };

    let mut embed = CreateEmbed::new()
        .colour(GOLD)
        .title(ALLY_DM_TITLE)
        .description(format!(
            "👍 Hey **{}**, it is commendable that you have supported Pokearena \
             Official! You are now an **Ally** of arena as our token of gratitude! 🌠",
            member_name
        ))
        .field("Last Updated:", format!("<t:{}:R>", now_unix), true)
        .field("Action Done:", action, true);

    if let Some(url) = thumbnail_url {
        embed = embed.thumbnail(url, None);
    }

    embed
}

/// The clan welcome announcement embed.
pub fn clan_welcome_embed(
    clan: &ClanConfig,
    colour: Colour,
    display_name: &str,
    member_count: usize,
    avatar_url: String,
) -> CreateEmbed<'static> {
    CreateEmbed::new()
        .colour(colour)
        .title("🔔 New Clan Member")
        .description(format!(
            "A new member has joined our <@&{}>!\nDo welcome {} aboard!",
            clan.role_id, display_name
        ))
        .footer(CreateEmbedFooter::new(clan::welcome_footer(
            &clan.name,
            member_count,
        )))
        .image(avatar_url, None)
}

/// One page of the timezone catalog.
pub fn catalog_page_embed(description: String) -> CreateEmbed<'static> {
    CreateEmbed::new()
        .colour(GOLD)
        .title("Available Timezones")
        .description(description)
}
