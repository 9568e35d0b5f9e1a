//! Built-in commands: help, quote and file.

use dioxus_logger::tracing;
use rand::Rng;
use std::path::Path;
use tokio::time::Instant;

use crate::{
    data::file::{visible_file, FileRepository},
    error::AppError,
    model::{
        context::{Origin, TemplateContext},
        expansion::EmbedSpec,
        messages::Messages,
    },
    service::{
        messenger::Messenger,
        template::{
            environment::content_after_command, parser::parse_segment, render,
            substitute_identity, NEWLINE,
        },
    },
};

use super::{actions::embed_icon, fill_message, CommandDispatcher};

impl CommandDispatcher {
    /// Sends the help embed listing every available command.
    ///
    /// The about text may carry a `$FILE$` directive whose file becomes the
    /// embed image. Built-ins whose module is disabled are not listed.
    pub async fn send_help(
        &self,
        messenger: &dyn Messenger,
        origin: Origin,
        ctx: &TemplateContext,
    ) -> Result<(), AppError> {
        let messages = &self.messages;
        let modules = &self.settings.modules;

        let about = parse_segment(&messages.help_about.replace(NEWLINE, "\n"));
        let file = match &about.file {
            Some(raw) => visible_file(Path::new(&substitute_identity(raw, ctx))).await,
            None => None,
        };

        let mut lines = vec![self.help_line(&messages.help_command, &messages.help_description)];
        if modules.files {
            lines.push(self.help_line(&messages.file_command, &messages.file_description));
        }
        if modules.quotes {
            lines.push(self.help_line(&messages.quote_command, &messages.quote_description));
        }
        for command in self.commands.iter() {
            lines.push(self.help_line(&command.label, &command.description));
        }

        let sections = [
            render(&about, ctx, ""),
            fill_message(&lines.join("\n"), ctx),
            fill_message(&messages.help_footer, ctx),
        ];
        let description = sections
            .iter()
            .filter(|section| !section.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n");

        let embed = EmbedSpec {
            title: fill_message(&messages.help_title, ctx),
            icon_url: (!ctx.bot_avatar.is_empty()).then(|| ctx.bot_avatar.clone()),
            description,
            color: self.settings.embed_color,
        };

        messenger
            .send_embed(origin.channel_id, &embed, file.as_deref(), None)
            .await
    }

    fn help_line(&self, label: &str, description: &str) -> String {
        self.messages
            .help_format
            .replace("$CMD$", &format!("{}{}", self.settings.prefix, label))
            .replace("$DESC$", description)
    }

    /// Sends a random quote as an embed, subject to the quote cooldown.
    pub async fn send_quote(
        &self,
        messenger: &dyn Messenger,
        origin: Origin,
        ctx: &TemplateContext,
    ) -> Result<(), AppError> {
        let now = Instant::now();
        if let Err(remaining) = self.quote_cooldown.check(now) {
            tracing::debug!(
                "Quote for {} blocked by cooldown, {}s left",
                ctx.author().name,
                remaining
            );
            let text = Messages::with_time(&self.messages.quote_cooldown, remaining);
            return messenger
                .send_text(origin.channel_id, &fill_message(&text, ctx), None)
                .await;
        }
        self.quote_cooldown.mark(now);

        if self.quotes.is_empty() {
            let text = fill_message(&self.messages.no_quotes, ctx);
            return messenger.send_text(origin.channel_id, &text, None).await;
        }

        let quote = &self.quotes[rand::rng().random_range(0..self.quotes.len())];
        let title = fill_message(&self.messages.quote_title, ctx);
        let embed = EmbedSpec {
            icon_url: embed_icon(&title, ctx),
            title,
            description: fill_message(quote, ctx),
            color: self.settings.embed_color,
        };

        messenger
            .send_embed(origin.channel_id, &embed, None, None)
            .await
    }

    /// Uploads a file from the files directory.
    ///
    /// With an argument the file whose name or stem matches it is sent,
    /// otherwise a random one.
    pub async fn send_file(
        &self,
        messenger: &dyn Messenger,
        origin: Origin,
        ctx: &TemplateContext,
    ) -> Result<(), AppError> {
        let repo = FileRepository::new(&self.settings.files_dir);
        let name = content_after_command(&ctx.message.content);

        let file = if name.is_empty() {
            repo.random().await?
        } else {
            repo.find(name).await?
        };

        match file {
            Some(path) => {
                messenger
                    .send_file(origin.channel_id, None, &path, None)
                    .await
            }
            None => {
                let text = fill_message(&self.messages.no_files, ctx);
                messenger.send_text(origin.channel_id, &text, None).await
            }
        }
    }
}
