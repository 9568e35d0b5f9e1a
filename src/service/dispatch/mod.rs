//! Prefixed command handling.
//!
//! The dispatcher owns the custom command table and the built-in commands.
//! An invocation moves through a fixed sequence:
//!
//! 1. Messages not starting with the prefix are left for the keyword modules.
//! 2. The shared command cooldown is checked; a blocked invocation is told how
//!    long to wait and does not touch the timestamp.
//! 3. The first word is matched against the built-ins (`help`, `quote`,
//!    `file`) and then against the custom commands in table order.
//! 4. A match runs with a typing indicator shown, after which the cooldown
//!    timestamp is set. A prefixed word matching nothing gets the unknown
//!    command message.
//!
//! Errors are logged and answered with the generic error message. Every
//! prefixed message counts as handled so keyword modules stay quiet on it.

pub mod actions;
pub mod builtin;
pub mod cooldown;
pub mod typing;

#[cfg(test)]
mod test;

use dioxus_logger::tracing;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::{
    config::{Config, ModuleSwitches},
    error::AppError,
    model::{
        command::{matches_prefixed, CommandDefinition, CommandTable},
        context::{Origin, TemplateContext},
        messages::Messages,
    },
    service::{
        messenger::Messenger,
        template::{normalize, substitute_identity, TemplateExpander, NEWLINE},
    },
};

use self::{cooldown::Cooldown, typing::TypingIndicator};

/// Dispatcher settings taken from the configuration.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub prefix: String,
    pub command_cooldown: Duration,
    pub quote_cooldown: Duration,
    pub embed_color: u32,
    pub files_dir: PathBuf,
    pub modules: ModuleSwitches,
}

impl DispatchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            prefix: config.command_prefix.clone(),
            command_cooldown: config.command_cooldown,
            quote_cooldown: config.quote_cooldown,
            embed_color: config.embed_color,
            files_dir: config.files_dir.clone(),
            modules: config.modules,
        }
    }
}

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a prefixed message.
    Ignored,
    /// Refused by the command cooldown.
    Blocked,
    /// A built-in command ran.
    Builtin,
    /// A custom command ran.
    Custom,
    /// Prefixed, but no command matched.
    Unknown,
    /// Handling failed and the user was told so.
    Failed,
}

impl DispatchOutcome {
    /// True unless the message was left for other modules.
    pub fn is_handled(self) -> bool {
        self != DispatchOutcome::Ignored
    }
}

/// Command a prefixed word resolved to.
enum Matched<'a> {
    Help,
    Quote,
    File,
    Custom(&'a CommandDefinition),
}

pub struct CommandDispatcher {
    settings: DispatchSettings,
    commands: CommandTable,
    quotes: Vec<String>,
    messages: Arc<Messages>,
    expander: TemplateExpander,
    command_cooldown: Cooldown,
    quote_cooldown: Cooldown,
}

impl CommandDispatcher {
    pub fn new(
        settings: DispatchSettings,
        commands: CommandTable,
        quotes: Vec<String>,
        messages: Arc<Messages>,
        expander: TemplateExpander,
    ) -> Self {
        Self {
            command_cooldown: Cooldown::new(settings.command_cooldown),
            quote_cooldown: Cooldown::new(settings.quote_cooldown),
            settings,
            commands,
            quotes,
            messages,
            expander,
        }
    }

    #[cfg(test)]
    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Handles a message if it starts with the command prefix.
    ///
    /// # Arguments
    /// - `messenger` - Where replies, files and reactions are sent
    /// - `ctx` - Snapshot of the triggering message
    ///
    /// # Returns
    /// - `DispatchOutcome` - `Ignored` for non-command messages, otherwise how
    ///   the command was handled
    pub async fn perform(
        &self,
        messenger: &Arc<dyn Messenger>,
        ctx: &TemplateContext,
    ) -> DispatchOutcome {
        if !starts_with_ignore_case(&ctx.message.content, &self.settings.prefix) {
            return DispatchOutcome::Ignored;
        }

        match self.dispatch(messenger, ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    "Failed to handle command '{}' from {}: {}",
                    command_word(&ctx.message.content),
                    ctx.author().name,
                    e
                );
                if let Some(origin) = ctx.origin() {
                    let text = fill_message(&self.messages.error, ctx);
                    if let Err(e) = messenger.send_text(origin.channel_id, &text, None).await {
                        tracing::error!("Failed to send error message: {}", e);
                    }
                }
                DispatchOutcome::Failed
            }
        }
    }

    async fn dispatch(
        &self,
        messenger: &Arc<dyn Messenger>,
        ctx: &TemplateContext,
    ) -> Result<DispatchOutcome, AppError> {
        let origin = ctx
            .origin()
            .ok_or_else(|| AppError::InternalError("Message has no channel or id".to_string()))?;

        if let Err(remaining) = self.command_cooldown.check(Instant::now()) {
            tracing::debug!(
                "Command from {} blocked by cooldown, {}s left",
                ctx.author().name,
                remaining
            );
            let text = Messages::with_time(&self.messages.command_cooldown, remaining);
            messenger
                .send_text(origin.channel_id, &fill_message(&text, ctx), None)
                .await?;
            return Ok(DispatchOutcome::Blocked);
        }

        let word = command_word(&ctx.message.content);
        let Some(matched) = self.match_command(word) else {
            tracing::debug!("Unknown command '{}' from {}", word, ctx.author().name);
            let text = fill_message(&self.messages.unknown_command, ctx);
            messenger.send_text(origin.channel_id, &text, None).await?;
            return Ok(DispatchOutcome::Unknown);
        };

        let outcome = match matched {
            Matched::Custom(_) => DispatchOutcome::Custom,
            _ => DispatchOutcome::Builtin,
        };

        let result = {
            let _typing = TypingIndicator::start(messenger.clone(), origin.channel_id);
            self.run(matched, messenger.as_ref(), origin, ctx).await
        };
        self.command_cooldown.mark(Instant::now());

        result.map(|_| outcome)
    }

    fn match_command(&self, word: &str) -> Option<Matched<'_>> {
        let prefix = &self.settings.prefix;
        let modules = &self.settings.modules;

        if modules.quotes && matches_prefixed(prefix, &self.messages.quote_command, word) {
            return Some(Matched::Quote);
        }
        if modules.files && matches_prefixed(prefix, &self.messages.file_command, word) {
            return Some(Matched::File);
        }
        if matches_prefixed(prefix, &self.messages.help_command, word) {
            return Some(Matched::Help);
        }

        self.commands.find(prefix, word).map(Matched::Custom)
    }

    async fn run(
        &self,
        matched: Matched<'_>,
        messenger: &dyn Messenger,
        origin: Origin,
        ctx: &TemplateContext,
    ) -> Result<(), AppError> {
        match matched {
            Matched::Help => self.send_help(messenger, origin, ctx).await,
            Matched::Quote => self.send_quote(messenger, origin, ctx).await,
            Matched::File => self.send_file(messenger, origin, ctx).await,
            Matched::Custom(command) => {
                tracing::debug!(
                    "Running custom command '{}' for {}",
                    command.label,
                    ctx.author().name
                );
                let results = self.expander.expand(&command.template, ctx).await?;
                actions::deliver(messenger, origin, &results, ctx, self.settings.embed_color)
                    .await
            }
        }
    }
}

/// First word of a message, split on spaces and line breaks.
pub fn command_word(content: &str) -> &str {
    content.split([' ', '\n']).next().unwrap_or_default()
}

fn starts_with_ignore_case(content: &str, prefix: &str) -> bool {
    content.to_lowercase().starts_with(&prefix.to_lowercase())
}

/// Prepares a user-facing string: line breaks, identity placeholders, spacing.
pub fn fill_message(template: &str, ctx: &TemplateContext) -> String {
    normalize(&substitute_identity(&template.replace(NEWLINE, "\n"), ctx))
}
