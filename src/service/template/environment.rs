//! `BB_` environment variables exported to shell directives.
//!
//! The key set is derived entirely from the [`TemplateContext`]: guild, owner,
//! channel, invoker and message facts, indexed lists for attachments, embed
//! images, URLs and mentions, and the same message facts again under
//! `BB_REPLY_` when the invocation replies to another message. Every indexed
//! family carries a `_COUNT` key, zero when empty.

use std::collections::BTreeMap;

use crate::model::context::{MemberSnapshot, MessageSnapshot, TemplateContext};

pub const ENV_PREFIX: &str = "BB_";

pub type Environment = BTreeMap<String, String>;

/// Builds the environment for a shell directive.
pub fn build_environment(ctx: &TemplateContext) -> Environment {
    let mut env = Environment::new();

    if let Some(guild) = &ctx.guild {
        set(&mut env, "GUILD_NAME", &guild.name);
        set(&mut env, "GUILD_ID", guild.id);
        set(&mut env, "GUILD_ICON", guild.icon.as_deref().unwrap_or_default());
        set(&mut env, "GUILD_MEMBER_COUNT", guild.member_count);
        set(&mut env, "GUILD_ROLE_COUNT", guild.role_count);
        set(&mut env, "GUILD_CHANNEL_COUNT", guild.channel_count);
        set(&mut env, "GUILD_TEXT_CHANNEL_COUNT", guild.text_channel_count);
        set(&mut env, "GUILD_VOICE_CHANNEL_COUNT", guild.voice_channel_count);
        set(&mut env, "GUILD_CATEGORY_COUNT", guild.category_count);
        if let Some(owner) = &guild.owner {
            insert_member(&mut env, "GUILD_OWNER_", owner);
        }
    }

    set(&mut env, "BOT_NAME", &ctx.bot_name);

    set(&mut env, "CHANNEL_MENTION", &ctx.channel.mention);
    set(&mut env, "CHANNEL_NAME", &ctx.channel.name);
    set(&mut env, "CHANNEL_ID", ctx.channel.id);
    set(&mut env, "CHANNEL_TYPE", &ctx.channel.kind);

    set(&mut env, "CONTENT", content_after_command(&ctx.message.content));
    insert_member(&mut env, "", &ctx.message.author);
    insert_message_lists(&mut env, "", &ctx.message);

    if let Some(reply) = &ctx.reply {
        set(&mut env, "REPLY_CONTENT", &reply.content);
        insert_member(&mut env, "REPLY_", &reply.author);
        insert_message_lists(&mut env, "REPLY_", reply);
    }

    env
}

fn set(env: &mut Environment, key: &str, value: impl ToString) {
    env.insert(format!("{}{}", ENV_PREFIX, key), value.to_string());
}

/// Inserts NAME, PING, ID, AVATAR, ROLE_n and ROLE_COUNT under `prefix`.
fn insert_member(env: &mut Environment, prefix: &str, member: &MemberSnapshot) {
    set(env, &format!("{}NAME", prefix), &member.name);
    set(env, &format!("{}PING", prefix), &member.mention);
    set(env, &format!("{}ID", prefix), member.id);
    set(env, &format!("{}AVATAR", prefix), &member.avatar);
    insert_indexed(env, &format!("{}ROLE", prefix), &member.roles);
}

/// Inserts `{key}_n` for each value and `{key}_COUNT`.
fn insert_indexed<T: ToString>(env: &mut Environment, key: &str, values: &[T]) {
    for (index, value) in values.iter().enumerate() {
        set(env, &format!("{}_{}", key, index), value.to_string());
    }
    set(env, &format!("{}_COUNT", key), values.len());
}

fn insert_message_lists(env: &mut Environment, prefix: &str, message: &MessageSnapshot) {
    insert_indexed(env, &format!("{}FILE", prefix), &message.attachments);
    insert_indexed(env, &format!("{}EMBED", prefix), &message.embed_images);
    insert_indexed(env, &format!("{}URL", prefix), &detect_urls(&message.content));

    let mentioned = mentioned_members(message);
    for (index, member) in mentioned.iter().enumerate() {
        insert_member(env, &format!("{}MENTION_{}_", prefix, index), member);
    }
    set(env, &format!("{}MENTION_COUNT", prefix), mentioned.len());
}

/// Text of the message after the command word.
pub fn content_after_command(content: &str) -> &str {
    match content.split_once([' ', '\n']) {
        Some((_, rest)) => rest.trim(),
        None => "",
    }
}

/// Finds words containing `http://` or `https://`, with angle brackets removed.
///
/// Words are separated by spaces and line breaks.
pub fn detect_urls(content: &str) -> Vec<String> {
    content
        .split([' ', '\n'])
        .filter(|word| word.contains("http://") || word.contains("https://"))
        .map(|word| word.replace(['<', '>'], ""))
        .collect()
}

/// Structured mentions whose display name also occurs in the display content.
///
/// Members mentioned only through a reply ping, or whose name does not show
/// up in the text, are left out. A short name that appears elsewhere in the
/// text still counts.
pub fn mentioned_members(message: &MessageSnapshot) -> Vec<&MemberSnapshot> {
    message
        .mentions
        .iter()
        .filter(|member| message.content.contains(&member.name))
        .collect()
}
