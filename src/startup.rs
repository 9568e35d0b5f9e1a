use dioxus_logger::tracing;
use std::sync::Arc;

use crate::{
    config::Config,
    data::{
        command::CommandRepository, keyword::KeywordRepository, messages::MessagesRepository,
        quote::QuoteRepository,
    },
    error::AppError,
    model::command::CommandTable,
    service::{
        admission::AdmissionControl,
        dispatch::{CommandDispatcher, DispatchSettings},
        keyword::{Reactor, Responder},
        template::{shell::ShellRunner, TemplateExpander},
    },
    state::BotState,
};

/// Loads every definition file and assembles the shared bot state.
///
/// Files of disabled modules are not read. The command file is required when
/// commands are enabled; every other file may be missing and loads as empty.
///
/// # Arguments
/// - `config` - Application configuration holding file paths and module switches
///
/// # Returns
/// - `Ok(BotState)` - State ready to be handed to the event handler
/// - `Err(AppError::DataErr)` - A definition file is unreadable or malformed
pub async fn load_state(config: &Config) -> Result<BotState, AppError> {
    let modules = config.modules;

    let commands = if modules.commands {
        CommandRepository::new(&config.commands_file).load().await?
    } else {
        CommandTable::new()
    };
    let quotes = if modules.commands && modules.quotes {
        QuoteRepository::new(&config.quotes_file).load().await?
    } else {
        Vec::new()
    };

    let keywords = KeywordRepository::new(&config.responses_file, &config.reactions_file);
    let responses = if modules.responder {
        keywords.load_responses().await?
    } else {
        Vec::new()
    };
    let reactions = if modules.reactor {
        keywords.load_reactions().await?
    } else {
        Vec::new()
    };

    let messages = Arc::new(MessagesRepository::new(&config.messages_file).load().await?);

    if modules.commands && commands.is_empty() {
        tracing::warn!(
            "No custom commands defined in {}, only built-ins will answer",
            config.commands_file.display()
        );
    }

    tracing::info!(
        "Loaded {} commands, {} quotes, {} responses and {} reactions",
        commands.len(),
        quotes.len(),
        responses.len(),
        reactions.len()
    );

    let expander = TemplateExpander::new(ShellRunner::new(config.shell_timeout))
        .with_env_references(config.shell_env_references);

    Ok(BotState {
        modules,
        listen_to_bots: config.listen_to_bots,
        dispatcher: CommandDispatcher::new(
            DispatchSettings::from_config(config),
            commands,
            quotes,
            messages.clone(),
            expander.clone(),
        ),
        responder: Responder::new(
            responses,
            config.responder_cooldown,
            expander,
            config.embed_color,
        ),
        reactor: Reactor::new(reactions),
        messages,
        admission: AdmissionControl::new(config.max_concurrent_events),
    })
}
