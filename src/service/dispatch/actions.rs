//! Issuing the actions an expanded template asks for.

use dioxus_logger::tracing;

use crate::{
    error::AppError,
    model::{
        context::{Origin, TemplateContext},
        expansion::{EmbedSpec, ExpansionResult},
    },
    service::messenger::Messenger,
};

/// Picks the icon for an embed author line from what its title mentions.
///
/// The invoker's name wins over the bot's name, which wins over the guild's.
pub fn embed_icon(title: &str, ctx: &TemplateContext) -> Option<String> {
    let author = ctx.author();
    if !author.name.is_empty() && title.contains(&author.name) {
        return non_empty(&author.avatar);
    }
    if !ctx.bot_name.is_empty() && title.contains(&ctx.bot_name) {
        return non_empty(&ctx.bot_avatar);
    }
    match &ctx.guild {
        Some(guild) if !guild.name.is_empty() && title.contains(&guild.name) => guild.icon.clone(),
        _ => None,
    }
}

fn non_empty(url: &str) -> Option<String> {
    (!url.is_empty()).then(|| url.to_string())
}

/// Sends every segment's text, file, embed and reaction in order.
///
/// A reaction that Discord rejects is logged and skipped; a failed send
/// aborts the remaining segments.
pub async fn deliver(
    messenger: &dyn Messenger,
    origin: Origin,
    results: &[ExpansionResult],
    ctx: &TemplateContext,
    color: u32,
) -> Result<(), AppError> {
    for result in results {
        if let Some(emoji) = &result.reaction {
            if let Err(e) = messenger
                .add_reaction(origin.channel_id, origin.message_id, emoji)
                .await
            {
                tracing::warn!("Failed to add reaction '{}': {}", emoji, e);
            }
        }

        if result.is_silent() {
            if let Some(command) = &result.shell {
                tracing::debug!("Segment sends nothing after running '{}'", command);
            }
            continue;
        }

        let reply_to = result.reply.then_some(origin.message_id);

        if let Some(title) = &result.embed_title {
            let embed = EmbedSpec {
                title: title.clone(),
                icon_url: embed_icon(title, ctx),
                description: result.text.clone(),
                color,
            };
            messenger
                .send_embed(origin.channel_id, &embed, result.file.as_deref(), reply_to)
                .await?;
        } else if let Some(file) = &result.file {
            let text = (!result.text.is_empty()).then_some(result.text.as_str());
            messenger
                .send_file(origin.channel_id, text, file, reply_to)
                .await?;
        } else {
            messenger
                .send_text(origin.channel_id, &result.text, reply_to)
                .await?;
        }
    }

    Ok(())
}
