//! Small community commands: coinflip, ally info, booster listing.

use poise::Command;
use poise::CreateReply;
use poise::serenity_prelude::CreateAllowedMentions;
use poise::serenity_prelude::CreateEmbed;
use poise::serenity_prelude::CreateEmbedFooter;
use poise::serenity_prelude::PremiumTier;
use poise::serenity_prelude::RoleId;
use rand::seq::IndexedRandom;

use crate::bot::commands::Cog;
use crate::bot::commands::Context;
use crate::bot::commands::Error;
use crate::bot::embeds;
use crate::bot::error::BotError;

pub struct FunCog;

impl FunCog {
    /// A simple coin flip
    #[poise::command(slash_command, prefix_command, aliases("flip"), user_cooldown = 2)]
    pub async fn coinflip(ctx: Context<'_>) -> Result<(), Error> {
        let outcome = ["heads", "tails"]
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or("heads");

        ctx.send(
            CreateReply::default()
                .content(format!("<@{}> {}", ctx.author().id, outcome))
                .allowed_mentions(CreateAllowedMentions::new()),
        )
        .await?;
        Ok(())
    }

    /// Info on obtaining the vanity role
    #[poise::command(slash_command, prefix_command, aliases("vanity"), channel_cooldown = 2)]
    pub async fn ally(ctx: Context<'_>) -> Result<(), Error> {
        let config = &ctx.data().config;
        let invite_available = ctx
            .guild()
            .map(|guild| guild.premium_tier == PremiumTier::Tier3)
            .unwrap_or(false);

        let mut embed = CreateEmbed::new()
            .colour(embeds::BLURPLE)
            .title("🔥 Arena Rewards!")
            .description(format!(
                "Time limited <@&{}> role\n\n\
                 `Que:` How do I get the role?\n\
                 `Ans:` **Add discord.gg/{} or {} into your 📝custom status** and our \
                 Helper will give you the role, along with a thankyou note 👍\n\n\
                 💖 The ally role is hoisted and will show off higher than level roles ✨\n\
                 ⚠️ It goes away if you take away the status/go offline",
                config.vanity_role_id, config.invite_slug, config.site_host
            ));

        if !invite_available {
            embed = embed.footer(CreateEmbedFooter::new(format!(
                "❌ discord.gg/{} is unavailable until Server reaches level 3 -> see %boost",
                config.invite_slug
            )));
        }

        ctx.send(CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Info of boosters
    #[poise::command(
        slash_command,
        prefix_command,
        aliases("boost"),
        guild_only,
        channel_cooldown = 3
    )]
    pub async fn boosters(ctx: Context<'_>) -> Result<(), Error> {
        let (boosters, tier, booster_role) = {
            let guild = ctx.guild().ok_or(BotError::GuildOnlyCommand)?;
            let boosters: Vec<(String, u64)> = guild
                .members
                .iter()
                .filter(|member| member.premium_since.is_some())
                .map(|member| (member.display_name().to_string(), member.user.id.get()))
                .collect();
            let booster_role: Option<RoleId> = guild
                .roles
                .iter()
                .find(|role| role.tags.premium_subscriber())
                .map(|role| role.id);
            (boosters, guild.premium_tier, booster_role)
        };

        let role_mention = booster_role
            .map(|id| format!("<@&{}>", id))
            .unwrap_or_else(|| "boosters".to_string());

        let embed = if boosters.is_empty() {
            CreateEmbed::new()
                .colour(embeds::PINK)
                .title("❤️‍🔥 Arena Boosters")
                .description(format!(
                    "Boost now to support the community and gain the {} role!",
                    role_mention
                ))
        } else {
            let listing = boosters
                .iter()
                .map(|(name, id)| format!("**{}** (<@{}>)", name, id))
                .collect::<Vec<_>>()
                .join("\n- ");
            CreateEmbed::new()
                .colour(embeds::PINK)
                .title(format!(
                    "❤️‍🔥 {} Arena Boosters | Level {}",
                    boosters.len(),
                    FunCog::tier_level(tier)
                ))
                .description(format!(
                    "👍 Thankful to all {} of arena!\n- {}",
                    role_mention, listing
                ))
        };

        ctx.send(CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    fn tier_level(tier: PremiumTier) -> u8 {
        match tier {
            PremiumTier::Tier1 => 1,
            PremiumTier::Tier2 => 2,
            PremiumTier::Tier3 => 3,
            _ => 0,
        }
    }
}

impl Cog for FunCog {
    fn commands(&self) -> Vec<Command<crate::bot::Data, Error>> {
        vec![Self::coinflip(), Self::ally(), Self::boosters()]
    }
}
