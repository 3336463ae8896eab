//! Gateway event callbacks: the time-relay message pipeline, vanity role
//! upkeep, and clan welcomes.
//!
//! Cache lookups are collected into plain data inside non-await blocks so no
//! cache guard is held across an await point.

use chrono::Utc;
use log::debug;
use log::info;
use poise::serenity_prelude::ActivityType;
use poise::serenity_prelude::Colour;
use poise::serenity_prelude::CreateMessage;
use poise::serenity_prelude::EditMessage;
use poise::serenity_prelude::GetMessages;
use poise::serenity_prelude::GuildId;
use poise::serenity_prelude::Member;
use poise::serenity_prelude::Message;
use poise::serenity_prelude::OnlineStatus;
use poise::serenity_prelude::Presence;
use poise::serenity_prelude::PremiumTier;
use poise::serenity_prelude::ReactionType;
use poise::serenity_prelude::RoleId;
use poise::serenity_prelude::UserId;

use crate::bot::commands::Error;
use crate::bot::embeds;
use crate::clan;
use crate::config::Config;
use crate::service::Services;
use crate::service::time_relay_service::RelayRequest;
use crate::service::time_relay_service::RelaySubject;
use crate::timeparse::TargetRef;
use crate::timeparse::extract_times;
use crate::vanity::MemberStatusView;
use crate::vanity::VanityAction;

/// How long to wait after a member joins before checking their vanity role.
/// Sticky-role bots re-apply roles shortly after the join event.
const JOIN_SETTLE_DELAY: std::time::Duration = std::time::Duration::from_secs(2);

/// Scans a chat message for time expressions and replies with localized
/// timestamps.
pub async fn on_message(
    ctx: &poise::serenity_prelude::Context,
    config: &Config,
    service: &Services,
    message: &Message,
) -> Result<(), Error> {
    if message.author.bot() || !config.features.time_relay {
        return Ok(());
    }

    let matches = extract_times(&message.content);
    if matches.is_empty() {
        return Ok(());
    }

    let author = RelaySubject {
        user_id: message.author.id.get(),
        name: message.author.name.to_string(),
        avatar_url: Some(message.author.face()),
        is_guild_member: message.guild_id.is_some(),
    };

    let mut requests = Vec::with_capacity(matches.len());
    for time in matches {
        let target = match &time.target {
            Some(target_ref) => {
                let Some(guild_id) = message.guild_id else {
                    continue;
                };
                match resolve_target(ctx, guild_id, target_ref).await {
                    Some(subject) => Some(subject),
                    // A named target that is not a member drops the match
                    None => continue,
                }
            }
            None => None,
        };
        requests.push(RelayRequest { time, target });
    }

    let groups = service
        .time_relay
        .build_reply_groups(&author, &requests, Utc::now())
        .await;
    if groups.is_empty() {
        return Ok(());
    }

    let reply_embeds: Vec<_> = groups.iter().map(embeds::time_reply_embed).collect();
    message
        .channel_id
        .send_message(&ctx.http, CreateMessage::new().embeds(reply_embeds))
        .await?;

    Ok(())
}

/// Resolves a `for <someone>` reference to a guild member. Mentions and raw
/// ids fall back to the HTTP API when the member is not cached; names are
/// matched against the cache only.
async fn resolve_target(
    ctx: &poise::serenity_prelude::Context,
    guild_id: GuildId,
    target: &TargetRef,
) -> Option<RelaySubject> {
    let cached = {
        let guild = ctx.cache.guild(guild_id)?;
        match target {
            TargetRef::Mention(id) | TargetRef::Id(id) => guild
                .members
                .get(&UserId::new(*id))
                .map(|m| (m.user.id.get(), m.user.name.to_string(), m.face())),
            TargetRef::Name(name) => guild
                .members
                .iter()
                .find(|m| {
                    m.user.name.eq_ignore_ascii_case(name)
                        || m.display_name().eq_ignore_ascii_case(name)
                })
                .map(|m| (m.user.id.get(), m.user.name.to_string(), m.face())),
        }
    };

    let (user_id, name, avatar_url) = match (cached, target) {
        (Some(found), _) => found,
        (None, TargetRef::Mention(id) | TargetRef::Id(id)) => {
            let member = ctx
                .http
                .get_member(guild_id, UserId::new(*id))
                .await
                .ok()?;
            (member.user.id.get(), member.user.name.to_string(), member.face())
        }
        (None, TargetRef::Name(_)) => return None,
    };

    Some(RelaySubject {
        user_id,
        name: format!("{}'s time", name),
        avatar_url: Some(avatar_url),
        is_guild_member: true,
    })
}

/// Re-evaluates the vanity role whenever a member's presence changes.
pub async fn on_presence_update(
    ctx: &poise::serenity_prelude::Context,
    config: &Config,
    service: &Services,
    presence: &Presence,
) -> Result<(), Error> {
    if !config.features.vanity
        || presence.user.bot().unwrap_or(false)
        || presence.guild_id != Some(GuildId::new(config.guild_id))
    {
        return Ok(());
    }

    let user_id = presence.user.id;
    let vanity_role = RoleId::new(config.vanity_role_id);

    let Some((has_vanity_role, member_name, allow_invite, guild_icon)) =
        member_snapshot(ctx, GuildId::new(config.guild_id), user_id, vanity_role)
    else {
        return Ok(());
    };

    let view = MemberStatusView {
        has_vanity_role,
        is_offline: presence.status == OnlineStatus::Offline,
        custom_status: custom_status_of(presence),
    };

    let action = service.vanity.evaluate_member(user_id.get(), &view, allow_invite);
    apply_vanity_action(ctx, config, action, user_id, &member_name, guild_icon).await
}

/// Posts a clan welcome when a member gains their first clan role.
pub async fn on_member_update(
    ctx: &poise::serenity_prelude::Context,
    config: &Config,
    old: Option<&Member>,
    new: Option<&Member>,
) -> Result<(), Error> {
    if !config.features.clan_welcome {
        return Ok(());
    }
    let (Some(old), Some(new)) = (old, new) else {
        return Ok(());
    };
    if new.user.bot() || new.guild_id != GuildId::new(config.guild_id) {
        return Ok(());
    }

    let before = old.roles.iter().copied().collect();
    let after = new.roles.iter().copied().collect();
    let Some(clan) = clan::detect_clan_join(&config.clans, &before, &after) else {
        return Ok(());
    };

    let (member_count, colour) = {
        let guild = match ctx.cache.guild(new.guild_id) {
            Some(g) => g,
            None => return Ok(()),
        };
        let member_count = guild
            .members
            .iter()
            .filter(|m| m.roles.contains(&clan.role_id))
            .count();
        let colour = guild
            .roles
            .get(&clan.role_id)
            .map(|role| role.colour)
            .unwrap_or(Colour::new(0));
        (member_count, colour)
    };

    info!("Member {} joined clan {}.", new.user.id, clan.name);

    let content = clan::welcome_line(&format!("<@{}>", new.user.id));
    let embed = embeds::clan_welcome_embed(
        clan,
        colour,
        new.display_name(),
        member_count,
        new.face(),
    );

    let welcome = clan
        .channel_id
        .widen()
        .send_message(&ctx.http, CreateMessage::new().content(content).embed(embed))
        .await?;

    let reaction = ReactionType::try_from(clan.emoji.as_str())?;
    welcome.react(&ctx.http, reaction).await?;

    Ok(())
}

/// Strips a stale vanity role from a rejoining member after sticky-role bots
/// have finished re-applying roles.
pub async fn on_member_join(
    ctx: &poise::serenity_prelude::Context,
    config: &Config,
    service: &Services,
    member: &Member,
) -> Result<(), Error> {
    if !config.features.vanity
        || member.user.bot()
        || member.guild_id != GuildId::new(config.guild_id)
    {
        return Ok(());
    }

    tokio::time::sleep(JOIN_SETTLE_DELAY).await;

    let user_id = member.user.id;
    let vanity_role = RoleId::new(config.vanity_role_id);
    let guild_id = GuildId::new(config.guild_id);

    let Some((view, member_name, guild_icon, allow_invite)) =
        presence_view(ctx, guild_id, user_id, vanity_role)
    else {
        return Ok(());
    };
    if !view.has_vanity_role {
        return Ok(());
    }

    let action = service.vanity.evaluate_member(user_id.get(), &view, allow_invite);
    if action == VanityAction::Revoke {
        apply_vanity_action(ctx, config, action, user_id, &member_name, guild_icon).await?;
    }

    Ok(())
}

/// Revokes stale vanity roles across the whole guild. Returns how many
/// members were stripped. Used after restarts, when presence updates missed
/// while offline may have left roles behind.
pub async fn sweep_vanity(
    ctx: &poise::serenity_prelude::Context,
    config: &Config,
    service: &Services,
) -> Result<u32, Error> {
    let guild_id = GuildId::new(config.guild_id);
    let vanity_role = RoleId::new(config.vanity_role_id);

    let (holders, allow_invite, guild_icon) = {
        let guild = match ctx.cache.guild(guild_id) {
            Some(g) => g,
            None => return Ok(0),
        };

        let holders: Vec<(UserId, MemberStatusView, String)> = guild
            .members
            .iter()
            .filter(|m| !m.user.bot() && m.roles.contains(&vanity_role))
            .map(|m| {
                let presence = guild.presences.get(&m.user.id);
                let view = MemberStatusView {
                    has_vanity_role: true,
                    is_offline: presence.is_none_or(|p| p.status == OnlineStatus::Offline),
                    custom_status: presence.and_then(custom_status_of),
                };
                (m.user.id, view, m.user.name.to_string())
            })
            .collect();

        (
            holders,
            guild.premium_tier == PremiumTier::Tier3,
            guild.icon_url(),
        )
    };

    let mut revoked = 0u32;
    for (user_id, view, member_name) in holders {
        let action = service.vanity.evaluate_member(user_id.get(), &view, allow_invite);
        if action == VanityAction::Revoke {
            apply_vanity_action(
                ctx,
                config,
                action,
                user_id,
                &member_name,
                guild_icon.clone(),
            )
            .await?;
            revoked += 1;
        }
    }

    Ok(revoked)
}

/// Applies a grant or revoke to the member and sends the best-effort DM.
async fn apply_vanity_action(
    ctx: &poise::serenity_prelude::Context,
    config: &Config,
    action: VanityAction,
    user_id: UserId,
    member_name: &str,
    guild_icon: Option<String>,
) -> Result<(), Error> {
    let guild_id = GuildId::new(config.guild_id);
    let vanity_role = RoleId::new(config.vanity_role_id);

    match action {
        VanityAction::Grant => {
            ctx.http
                .add_member_role(
                    guild_id,
                    user_id,
                    vanity_role,
                    Some("Community advertised in custom status"),
                )
                .await?;
            info!("Granted vanity role to {} ({}).", member_name, user_id);
            if let Err(e) = notify_vanity_dm(ctx, user_id, member_name, guild_icon, true).await {
                debug!("Vanity grant DM to {} failed: {}", user_id, e);
            }
        }
        VanityAction::Revoke => {
            ctx.http
                .remove_member_role(
                    guild_id,
                    user_id,
                    vanity_role,
                    Some("Community no longer advertised in custom status"),
                )
                .await?;
            info!("Revoked vanity role from {} ({}).", member_name, user_id);
            if let Err(e) = notify_vanity_dm(ctx, user_id, member_name, guild_icon, false).await {
                debug!("Vanity revoke DM to {} failed: {}", user_id, e);
            }
        }
        VanityAction::Keep => {}
    }

    Ok(())
}

/// Edits the most recent ally notification in the member's DM history, or on
/// a grant with no earlier notification, sends a fresh one. A revoke never
/// starts a new DM thread.
async fn notify_vanity_dm(
    ctx: &poise::serenity_prelude::Context,
    user_id: UserId,
    member_name: &str,
    guild_icon: Option<String>,
    granted: bool,
) -> Result<(), Error> {
    let bot_id = ctx.cache.current_user().id;
    let channel = user_id.create_dm_channel(&ctx.http).await?;
    let history = channel
        .id
        .widen()
        .messages(&ctx.http, GetMessages::new().limit(20))
        .await?;

    let embed = embeds::ally_dm_embed(member_name, guild_icon, Utc::now().timestamp(), granted);

    let previous = history.into_iter().find(|message| {
        message.author.id == bot_id
            && message
                .embeds
                .first()
                .and_then(|e| e.title.as_deref())
                .is_some_and(|title| title == embeds::ALLY_DM_TITLE)
    });

    match previous {
        Some(mut message) => {
            message
                .edit(&ctx.http, EditMessage::new().embed(embed))
                .await?;
        }
        None if granted => {
            channel
                .id
                .widen()
                .send_message(&ctx.http, CreateMessage::new().embed(embed))
                .await?;
        }
        None => {}
    }

    Ok(())
}

/// Cache snapshot used by the presence handler.
fn member_snapshot(
    ctx: &poise::serenity_prelude::Context,
    guild_id: GuildId,
    user_id: UserId,
    vanity_role: RoleId,
) -> Option<(bool, String, bool, Option<String>)> {
    let guild = ctx.cache.guild(guild_id)?;
    let member = guild.members.get(&user_id)?;
    Some((
        member.roles.contains(&vanity_role),
        member.user.name.to_string(),
        guild.premium_tier == PremiumTier::Tier3,
        guild.icon_url(),
    ))
}

/// Cache snapshot including the member's cached presence, for paths that
/// have no fresh presence payload of their own.
fn presence_view(
    ctx: &poise::serenity_prelude::Context,
    guild_id: GuildId,
    user_id: UserId,
    vanity_role: RoleId,
) -> Option<(MemberStatusView, String, Option<String>, bool)> {
    let guild = ctx.cache.guild(guild_id)?;
    let member = guild.members.get(&user_id)?;
    let presence = guild.presences.get(&user_id);

    let view = MemberStatusView {
        has_vanity_role: member.roles.contains(&vanity_role),
        is_offline: presence.is_none_or(|p| p.status == OnlineStatus::Offline),
        custom_status: presence.and_then(custom_status_of),
    };

    Some((
        view,
        member.user.name.to_string(),
        guild.icon_url(),
        guild.premium_tier == PremiumTier::Tier3,
    ))
}

/// The text of the member's custom status activity, if one is set.
fn custom_status_of(presence: &Presence) -> Option<String> {
    presence
        .activities
        .iter()
        .find(|activity| activity.kind == ActivityType::Custom)
        .and_then(|activity| activity.state.as_ref())
        .map(|state| state.to_string())
}
