//! Message create and update handling.
//!
//! Each accepted message is admitted through the admission gate and processed
//! in its own task: the dispatcher gets the first look, and only messages it
//! leaves alone reach the keyword responder and reactor. Edits are processed
//! exactly like new messages.

use dioxus_logger::tracing;
use serenity::all::{Context, Message, MessageUpdateEvent, UserId};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::{
    bot::context::build_template_context,
    model::context::TemplateContext,
    service::{
        dispatch::fill_message,
        messenger::{Messenger, SerenityMessenger},
    },
    state::BotState,
};

/// Handles a new or edited message.
pub async fn handle_message(state: Arc<BotState>, ctx: Context, message: Message) {
    let bot_id = ctx.cache.current_user().id;
    if !should_handle(&message, bot_id, state.listen_to_bots) {
        return;
    }

    let messenger: Arc<dyn Messenger> = Arc::new(SerenityMessenger::new(ctx.http.clone()));
    spawn_admitted(state, messenger, || {
        build_template_context(&ctx.cache, &message)
    });
}

/// Admits an event and processes it in its own task.
///
/// The context is only snapshotted once the event is admitted. An event
/// arriving while the admission limit is reached is dropped without any
/// response.
///
/// # Returns
/// - `Some(JoinHandle)` - The event was admitted and is being processed
/// - `None` - The event was dropped
pub fn spawn_admitted<F>(
    state: Arc<BotState>,
    messenger: Arc<dyn Messenger>,
    snapshot: F,
) -> Option<JoinHandle<()>>
where
    F: FnOnce() -> TemplateContext,
{
    let permit = state.admission.try_admit()?;
    let ctx = snapshot();

    Some(tokio::spawn(async move {
        let _permit = permit;
        process_message(&state, &messenger, &ctx).await;
    }))
}

/// Handles a message edit, fetching the message when it is not cached.
///
/// Updates without an edit timestamp (such as link previews being attached)
/// are not edits by the author and are skipped.
pub async fn handle_message_update(
    state: Arc<BotState>,
    ctx: Context,
    new: Option<Message>,
    event: MessageUpdateEvent,
) {
    let mut message = match new {
        Some(message) => message,
        None => match event.channel_id.message(&ctx, event.id).await {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!("Failed to fetch edited message {}: {}", event.id, e);
                return;
            }
        },
    };

    if message.edited_timestamp.is_none() {
        return;
    }
    message.guild_id = message.guild_id.or(event.guild_id);

    handle_message(state, ctx, message).await;
}

/// Checks whether a message should be processed at all.
///
/// Direct messages are ignored, as are the bot's own messages. Other bots are
/// ignored unless `listen_to_bots` is set.
pub fn should_handle(message: &Message, bot_id: UserId, listen_to_bots: bool) -> bool {
    if message.guild_id.is_none() || message.author.id == bot_id {
        return false;
    }
    !message.author.bot || listen_to_bots
}

/// Runs the dispatcher, then the keyword modules if the dispatcher passed.
///
/// A failing keyword response is logged and answered with the generic error
/// message, like a failing command.
pub async fn process_message(
    state: &BotState,
    messenger: &Arc<dyn Messenger>,
    ctx: &TemplateContext,
) {
    if state.modules.commands {
        let outcome = state.dispatcher.perform(messenger, ctx).await;
        if outcome.is_handled() {
            return;
        }
    }

    if state.modules.responder {
        if let Err(e) = state.responder.respond(messenger.as_ref(), ctx).await {
            tracing::error!(
                "Failed to send keyword response to {}: {}",
                ctx.author().name,
                e
            );
            send_error(state, messenger.as_ref(), ctx).await;
        }
    }

    if state.modules.reactor {
        state.reactor.react(messenger.as_ref(), ctx).await;
    }
}

async fn send_error(state: &BotState, messenger: &dyn Messenger, ctx: &TemplateContext) {
    let Some(origin) = ctx.origin() else {
        return;
    };

    let text = fill_message(&state.messages.error, ctx);
    if let Err(e) = messenger.send_text(origin.channel_id, &text, None).await {
        tracing::error!("Failed to send error message: {}", e);
    }
}
