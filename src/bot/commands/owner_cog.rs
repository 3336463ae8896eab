//! Owner-only maintenance commands.

use poise::Command;

use crate::bot::commands::Cog;
use crate::bot::commands::Context;
use crate::bot::commands::Error;
use crate::bot::handlers;

pub struct OwnerCog;

impl OwnerCog {
    /// Revoke stale vanity roles guild-wide, for use after a reboot
    #[poise::command(prefix_command, owners_only, hide_in_help)]
    pub async fn fix_vanity(ctx: Context<'_>) -> Result<(), Error> {
        let data = ctx.data();
        let revoked =
            handlers::sweep_vanity(ctx.serenity_context(), &data.config, &data.service).await?;
        ctx.say(format!("Fixed from {} members.", revoked)).await?;
        Ok(())
    }

    #[poise::command(prefix_command, owners_only, hide_in_help)]
    pub async fn register(ctx: Context<'_>) -> Result<(), Error> {
        poise::builtins::register_application_commands_buttons(ctx).await?;
        Ok(())
    }
}

impl Cog for OwnerCog {
    fn commands(&self) -> Vec<Command<crate::bot::Data, Error>> {
        vec![Self::fix_vanity(), Self::register()]
    }
}
