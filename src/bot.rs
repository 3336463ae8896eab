//! Discord bot implementation and command handling.

pub mod commands;
pub mod embeds;
pub mod error;
pub mod error_handler;
pub mod handlers;
pub mod views;

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow;
use anyhow::Result;
use async_trait::async_trait;
use futures::lock::Mutex;
use log::error;
use log::info;
use poise::Framework;
use poise::FrameworkOptions;
use poise::serenity_prelude::Client;
use poise::serenity_prelude::ClientBuilder;
use poise::serenity_prelude::FullEvent;
use poise::serenity_prelude::GatewayIntents;
use poise::serenity_prelude::Token;
use poise::serenity_prelude::UserId;

use crate::bot::commands::Cog;
use crate::bot::commands::Cogs;
pub use crate::bot::commands::Error;
use crate::bot::error_handler::ErrorHandler;
use crate::config::Config;
use crate::service::Services;

/// Data shared across bot commands and contexts.
pub struct Data {
    pub config: Arc<Config>,
    pub service: Arc<Services>,
}

/// Discord bot client and framework.
pub struct Bot {
    client_builder: Option<ClientBuilder>,
    client: Arc<Mutex<Option<Client>>>,
}

impl Bot {
    /// Creates a new bot instance with all required components.
    pub async fn new(config: Arc<Config>, service: Arc<Services>) -> Result<Self> {
        info!("Initializing bot...");

        let framework = Self::create_framework(&config)?;
        let data = Arc::new(Data {
            config: config.clone(),
            service: service.clone(),
        });
        let (token, intents) = Self::create_client_config(&config)?;
        let event_handler = Arc::new(BotEventHandler::new(config, service));

        let client_builder = ClientBuilder::new(token, intents)
            .event_handler(event_handler)
            .framework(framework)
            .data(data);

        Ok(Self {
            client_builder: Some(client_builder),
            client: Arc::new(Mutex::new(None)),
        })
    }

    /// Starts the bot client in a background task.
    pub fn start(&mut self) {
        info!("Starting bot client...");
        let client_builder = self.client_builder.take().expect("start() called twice");
        let client = self.client.clone();

        tokio::spawn(async move {
            info!("Connecting bot to Discord...");
            let built_client = client_builder
                .await
                .expect("Failed to build Discord client");

            *client.lock().await = Some(built_client);
            info!("Bot connected to Discord.");

            client
                .lock()
                .await
                .as_mut()
                .unwrap()
                .start()
                .await
                .expect("Bot client crashed");
        });

        info!("Bot client start initiated.");
    }

    /// Creates the Poise framework with commands and configuration.
    fn create_framework(config: &Config) -> Result<Box<Framework<Data, Error>>> {
        let cogs = Cogs;
        let options = FrameworkOptions::<Data, Error> {
            commands: cogs.commands(),
            on_error: |error| Box::pin(Self::on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("%".into()),
                case_insensitive_commands: true,
                edit_tracker: Some(Arc::new(poise::EditTracker::for_timespan(
                    Duration::from_secs(3600),
                ))),
                ..Default::default()
            },
            owners: HashSet::from([UserId::from_str(&config.owner_id)
                .map_err(|_| anyhow::anyhow!("Invalid owner ID"))?]),
            ..Default::default()
        };

        Ok(Box::new(
            poise::Framework::builder().options(options).build(),
        ))
    }

    /// Creates Discord client configuration (token and intents).
    fn create_client_config(config: &Config) -> Result<(Token, GatewayIntents)> {
        let token = Token::from_str(&config.discord_token)?;
        let intents = GatewayIntents::non_privileged()
            | GatewayIntents::MESSAGE_CONTENT
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_PRESENCES;
        Ok((token, intents))
    }

    /// Handles framework errors by delegating to the error handler.
    async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
        ErrorHandler::handle(error).await;
    }
}

/// Event handler for Discord gateway events.
///
/// Every handled event swallows its own errors: a failed callback is logged
/// and the event loop moves on to the next event.
pub struct BotEventHandler {
    config: Arc<Config>,
    service: Arc<Services>,
}

impl BotEventHandler {
    pub fn new(config: Arc<Config>, service: Arc<Services>) -> Self {
        Self { config, service }
    }
}

#[async_trait]
impl poise::serenity_prelude::EventHandler for BotEventHandler {
    async fn dispatch(&self, context: &poise::serenity_prelude::Context, event: &FullEvent) {
        match event {
            FullEvent::Ready { .. } => {
                info!("Bot is ready.");
            }
            FullEvent::Message { new_message, .. } => {
                if let Err(e) =
                    handlers::on_message(context, &self.config, &self.service, new_message).await
                {
                    error!("Error handling message: {}", e);
                }
            }
            FullEvent::PresenceUpdate { new_data, .. } => {
                if let Err(e) =
                    handlers::on_presence_update(context, &self.config, &self.service, new_data)
                        .await
                {
                    error!("Error handling presence update: {}", e);
                }
            }
            FullEvent::GuildMemberUpdate {
                old_if_available,
                new,
                ..
            } => {
                if let Err(e) = handlers::on_member_update(
                    context,
                    &self.config,
                    old_if_available.as_ref(),
                    new.as_ref(),
                )
                .await
                {
                    error!("Error handling member update: {}", e);
                }
            }
            FullEvent::GuildMemberAddition { new_member, .. } => {
                if let Err(e) =
                    handlers::on_member_join(context, &self.config, &self.service, new_member).await
                {
                    error!("Error handling member join: {}", e);
                }
            }
            _ => {}
        };
    }
}
