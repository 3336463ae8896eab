//! The timezone command family: set, clear, on, off, info, help.

use std::time::Duration;

use chrono::Utc;
use futures::StreamExt;
use poise::Command;
use poise::CreateReply;
use poise::serenity_prelude::AutocompleteChoice;
use poise::serenity_prelude::ComponentInteractionCollector;
use poise::serenity_prelude::CreateAutocompleteResponse;
use poise::serenity_prelude::CreateEmbed;
use poise::serenity_prelude::CreateInteractionResponse;

use crate::bot::commands::Cog;
use crate::bot::commands::Context;
use crate::bot::commands::Error;
use crate::bot::embeds;
use crate::bot::views::InteractableComponentView;
use crate::bot::views::ViewProvider;
use crate::bot::views::pagination::PaginationModel;
use crate::bot::views::pagination::PaginationView;
use crate::service::error::ServiceError;
use crate::timezone::catalog;

/// How long the catalog paginator keeps responding to button presses.
const CATALOG_TIMEOUT: Duration = Duration::from_secs(120);

pub struct TimezoneCog;

impl TimezoneCog {
    /// Set your timezone for global times for everyone in chat
    #[poise::command(
        slash_command,
        prefix_command,
        aliases("tz", "mytz", "mytimezone"),
        subcommands(
            "Self::set",
            "Self::clear",
            "Self::on",
            "Self::off",
            "Self::info",
            "Self::help"
        )
    )]
    pub async fn timezone(
        ctx: Context<'_>,
        #[description = "Your IANA timezone, e.g. Asia/Kolkata"]
        #[autocomplete = "Self::autocomplete_timezone"]
        new_timezone: Option<String>,
    ) -> Result<(), Error> {
        // Bare invocation with an argument sets, without one clears.
        match new_timezone {
            Some(name) => TimezoneCog::set_inner(ctx, name).await,
            None => TimezoneCog::clear_inner(ctx).await,
        }
    }

    /// Setup your timezone
    #[poise::command(slash_command, prefix_command)]
    pub async fn set(
        ctx: Context<'_>,
        #[description = "Your IANA timezone, e.g. Asia/Kolkata"]
        #[autocomplete = "Self::autocomplete_timezone"]
        new_timezone: String,
    ) -> Result<(), Error> {
        TimezoneCog::set_inner(ctx, new_timezone).await
    }

    /// Clear your stored timezone
    #[poise::command(slash_command, prefix_command)]
    pub async fn clear(ctx: Context<'_>) -> Result<(), Error> {
        TimezoneCog::clear_inner(ctx).await
    }

    /// Start showing global time for times mentioned by you
    #[poise::command(slash_command, prefix_command)]
    pub async fn on(ctx: Context<'_>) -> Result<(), Error> {
        TimezoneCog::toggle(ctx, true).await
    }

    /// Stop showing global time for times mentioned by you
    #[poise::command(slash_command, prefix_command)]
    pub async fn off(ctx: Context<'_>) -> Result<(), Error> {
        TimezoneCog::toggle(ctx, false).await
    }

    /// Show all available timezones
    #[poise::command(slash_command, prefix_command)]
    pub async fn info(ctx: Context<'_>) -> Result<(), Error> {
        TimezoneCog::send_catalog(
            ctx,
            "All shown timezones are sorted in ascending order for ease of finding your timezone!",
        )
        .await
    }

    /// Guide for the timezone command
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
        let embed = CreateEmbed::new()
            .colour(embeds::BRAND_RED)
            .title("🌐 Global Timezoner")
            .description(
                "Engage in easy time conversations, where each time you mention is \
                 viewable by everyone in their own timezone.\n\
                 Simply specify your timezone in `/timezone set` and enjoy the magic \
                 after turning it on via `/timezone on`!\n\
                 ## Privacy:\n\
                 Your timezone is private and no one can view it directly! The bot \
                 will never specify your timezone.\n\
                 ## Usage:\n\
                 Usage involves specifying time in 12 hour format with am/pm\n\
                 For example:-\n\
                 - let's battle at 6pm my time\n\
                 - does 11am suit you?\n\
                 In-case you don't mention am/pm, the bot will show both times.\n\n\
                 Additionally, you can use our smart syntax `<time> for <@member>` \
                 to view global time according to someone else's time zone\n\
                 For example:-\n\
                 - let's battle when it is 8:15pm for @intenzi\n\
                 - I want to know what time it is for me when it is 3am for @otherperson\n\
                 ## Setup:\n\
                 `/timezone help` -> shows this command\n\
                 `/timezone info` -> view all available timezones\n\
                 `/timezone set <new timezone>` -> setup your timezone\n\
                 `/timezone on` -> turn on global time shower for your time based messages\n\
                 `/timezone off` -> turn off global time shower for your time based messages",
            );

        ctx.send(CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    async fn set_inner(ctx: Context<'_>, name: String) -> Result<(), Error> {
        let result = ctx
            .data()
            .service
            .preferences
            .set_timezone(ctx.author().id.get(), &name)
            .await;

        match result {
            Ok(()) => {
                ctx.send(CreateReply::default().content(format!(
                    "Your timezone has now been set to `{}`. Turn it on via \
                     `/timezone on` and test it out by entering `11am` into the chat! \
                     Use `/timezone help` to know more!!",
                    name
                )))
                .await?;
                Ok(())
            }
            Err(ServiceError::UnknownTimezone { .. }) => {
                Self::send_catalog(
                    ctx,
                    "Unable to find mentioned timezone, please check in the following \
                     list to find your timezone:-\n**All shown timezones are sorted in \
                     ascending order for ease of finding your timezone!**",
                )
                .await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn clear_inner(ctx: Context<'_>) -> Result<(), Error> {
        let result = ctx
            .data()
            .service
            .preferences
            .clear_timezone(ctx.author().id.get())
            .await;

        let content = match result {
            Ok(()) => {
                "Successfully cleared your timezone. Set a new one via `/timezone set`".to_string()
            }
            Err(ServiceError::NoTimezoneSet) => {
                "You have not set any timezone yet for it to be reset. Use `/timezone help` \
                 to know more!!"
                    .to_string()
            }
            Err(e) => return Err(e.into()),
        };

        ctx.send(CreateReply::default().content(content).ephemeral(true))
            .await?;
        Ok(())
    }

    async fn toggle(ctx: Context<'_>, enabled: bool) -> Result<(), Error> {
        let result = ctx
            .data()
            .service
            .preferences
            .set_enabled(ctx.author().id.get(), enabled)
            .await;

        let content = match result {
            Ok(()) if enabled => {
                "Turned ON live universal time response! Test it out by entering `11am` \
                 into the chat!"
                    .to_string()
            }
            Ok(()) => "Turned OFF live universal time response!".to_string(),
            Err(ServiceError::NoTimezoneSet) => {
                "You have not yet set a timezone, use `/timezone set`".to_string()
            }
            Err(e) => return Err(e.into()),
        };

        ctx.send(CreateReply::default().content(content).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Sends the paginated catalog and drives its buttons until timeout.
    async fn send_catalog(ctx: Context<'_>, intro: &str) -> Result<(), Error> {
        let pages = catalog::catalog_pages(Utc::now());
        let mut view = PaginationView {
            state: PaginationModel::new(pages.len() as u32, catalog::PAGE_SIZE as u32, 1),
        };

        let mut reply = CreateReply::default()
            .content(intro.to_string())
            .embed(embeds::catalog_page_embed(pages[0].clone()));
        if pages.len() > 1 {
            reply = reply.components(view.create());
        }

        let handle = ctx.send(reply).await?;
        if pages.len() <= 1 {
            return Ok(());
        }

        let msg = handle.message().await?.into_owned();
        let mut collector = ComponentInteractionCollector::new(ctx.serenity_context())
            .message_id(msg.id)
            .author_id(ctx.author().id)
            .timeout(CATALOG_TIMEOUT)
            .stream();

        while let Some(interaction) = collector.next().await {
            if view.handle(&interaction).await.is_none() {
                continue;
            }
            interaction
                .create_response(ctx.http(), CreateInteractionResponse::Acknowledge)
                .await
                .ok();

            let page = pages[view.state.page_index()].clone();
            handle
                .edit(
                    ctx,
                    CreateReply::default()
                        .content(intro.to_string())
                        .embed(embeds::catalog_page_embed(page))
                        .components(view.create()),
                )
                .await?;
        }

        Ok(())
    }

    async fn autocomplete_timezone<'a>(
        _ctx: Context<'a>,
        partial: &'a str,
    ) -> CreateAutocompleteResponse<'a> {
        let choices: Vec<AutocompleteChoice<'static>> = catalog::search(partial)
            .into_iter()
            .map(|name| AutocompleteChoice::new(name, name))
            .collect();
        CreateAutocompleteResponse::new().set_choices(choices)
    }
}

impl Cog for TimezoneCog {
    fn commands(&self) -> Vec<Command<crate::bot::Data, Error>> {
        vec![Self::timezone()]
    }
}
