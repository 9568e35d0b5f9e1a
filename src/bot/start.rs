use dioxus_logger::tracing;
use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;

use crate::{bot::handler::Handler, config::Config, error::AppError, state::BotState};

/// Connects to Discord and processes events until the connection ends.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `state` - Shared services handed to the event handler
///
/// # Returns
/// - `Ok(())` - The client shut down
/// - `Err(AppError::DiscordErr)` - Login or gateway connection failed
pub async fn start_bot(config: &Config, state: Arc<BotState>) -> Result<(), AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(state))
        .await?;

    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
