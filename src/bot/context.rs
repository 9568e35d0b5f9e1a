//! Snapshotting serenity messages into template contexts.
//!
//! Cache references are not `Send`, so everything a template may need is
//! copied out synchronously before any await point. Members are resolved from
//! the guild cache and fall back to the bare user when not cached.

use serenity::all::{Cache, ChannelId, ChannelType, Guild, GuildChannel, Member, Message, User};
use std::sync::Arc;

use crate::{
    model::context::{
        ChannelSnapshot, GuildSnapshot, MemberSnapshot, MessageSnapshot, TemplateContext,
    },
    util::avatar::sized,
};

/// Builds the template context for a message from the cache.
pub fn build_template_context(cache: &Arc<Cache>, message: &Message) -> TemplateContext {
    let content = message.content_safe(cache);
    let reply_content = message
        .referenced_message
        .as_ref()
        .map(|reply| reply.content_safe(cache));
    let bot = cache.current_user().clone();
    let guild = message.guild_id.and_then(|guild_id| cache.guild(guild_id));

    snapshot_context(message, content, reply_content, &bot, guild.as_deref())
}

/// Builds a template context from already resolved parts.
///
/// # Arguments
/// - `message` - Triggering message
/// - `content` - Display content of the message
/// - `reply_content` - Display content of the replied-to message, if any
/// - `bot` - The bot's own user
/// - `guild` - Cached guild the message was sent in
pub fn snapshot_context(
    message: &Message,
    content: String,
    reply_content: Option<String>,
    bot: &User,
    guild: Option<&Guild>,
) -> TemplateContext {
    let bot_name = guild
        .and_then(|guild| guild.members.get(&bot.id))
        .map(|member| member.display_name().to_string())
        .unwrap_or_else(|| bot.display_name().to_string());

    let reply = message
        .referenced_message
        .as_deref()
        .zip(reply_content)
        .map(|(reply, content)| snapshot_message(reply, content, guild));

    TemplateContext {
        message: snapshot_message(message, content, guild),
        bot_name,
        bot_avatar: sized(&bot.face()),
        guild: guild.map(snapshot_guild),
        channel: snapshot_channel(message.channel_id, guild),
        reply,
    }
}

fn snapshot_message(message: &Message, content: String, guild: Option<&Guild>) -> MessageSnapshot {
    MessageSnapshot {
        id: message.id.get(),
        author: resolve_author(message, guild),
        content,
        attachments: message.attachments.iter().map(|a| a.url.clone()).collect(),
        embed_images: message
            .embeds
            .iter()
            .filter_map(|embed| embed.image.as_ref())
            .map(|image| image.url.clone())
            .collect(),
        mentions: message
            .mentions
            .iter()
            .map(|user| resolve_user(user, guild))
            .collect(),
    }
}

/// Resolves the author, using the partial member sent with the message when
/// the guild cache has no entry.
fn resolve_author(message: &Message, guild: Option<&Guild>) -> MemberSnapshot {
    if let Some(member) = guild.and_then(|guild| guild.members.get(&message.author.id)) {
        return snapshot_member(member);
    }

    let mut snapshot = snapshot_user(&message.author);
    if let Some(partial) = message.member.as_deref() {
        if let Some(nick) = &partial.nick {
            snapshot.name = nick.clone();
        }
        snapshot.roles = partial.roles.iter().map(|role| role.get()).collect();
    }
    snapshot
}

fn resolve_user(user: &User, guild: Option<&Guild>) -> MemberSnapshot {
    guild
        .and_then(|guild| guild.members.get(&user.id))
        .map(snapshot_member)
        .unwrap_or_else(|| snapshot_user(user))
}

pub fn snapshot_member(member: &Member) -> MemberSnapshot {
    MemberSnapshot {
        id: member.user.id.get(),
        name: member.display_name().to_string(),
        mention: format!("<@{}>", member.user.id),
        avatar: sized(&member.face()),
        roles: member.roles.iter().map(|role| role.get()).collect(),
    }
}

pub fn snapshot_user(user: &User) -> MemberSnapshot {
    MemberSnapshot {
        id: user.id.get(),
        name: user.display_name().to_string(),
        mention: format!("<@{}>", user.id),
        avatar: sized(&user.face()),
        roles: Vec::new(),
    }
}

pub fn snapshot_guild(guild: &Guild) -> GuildSnapshot {
    let count = |kind: ChannelType| {
        guild
            .channels
            .values()
            .filter(|channel| channel.kind == kind)
            .count()
    };

    GuildSnapshot {
        id: guild.id.get(),
        name: guild.name.clone(),
        icon: guild.icon_url().map(|url| sized(&url)),
        member_count: guild.member_count,
        role_count: guild.roles.len(),
        channel_count: guild.channels.len(),
        text_channel_count: count(ChannelType::Text),
        voice_channel_count: count(ChannelType::Voice),
        category_count: count(ChannelType::Category),
        owner: guild.members.get(&guild.owner_id).map(snapshot_member),
    }
}

/// Snapshots the channel, looking through threads when it is not a channel.
fn snapshot_channel(channel_id: ChannelId, guild: Option<&Guild>) -> ChannelSnapshot {
    let channel: Option<&GuildChannel> = guild.and_then(|guild| {
        guild
            .channels
            .get(&channel_id)
            .or_else(|| guild.threads.iter().find(|thread| thread.id == channel_id))
    });

    ChannelSnapshot {
        id: channel_id.get(),
        name: channel.map(|c| c.name.clone()).unwrap_or_default(),
        mention: format!("<#{}>", channel_id),
        kind: channel
            .map(|c| c.kind.name().to_uppercase())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::RoleId;
    use test_utils::serenity::{
        create_test_channel, create_test_guild, create_test_member, create_test_message,
        create_test_role, create_test_user, user::create_test_bot,
    };

    fn test_guild() -> Guild {
        let mut guild = create_test_guild(500, "Test Server", 77, Some("abc"));
        guild.member_count = 3;

        for (id, name) in [(500, "@everyone"), (11, "Regular"), (13, "Admin")] {
            guild
                .roles
                .insert(RoleId::new(id), create_test_role(id, name, 0));
        }
        for (id, name, kind) in [(600, "general", 0), (601, "Voice", 2), (602, "Chat", 4)] {
            let channel = create_test_channel(id, 500, name, kind);
            guild.channels.insert(channel.id, channel);
        }
        for member in [
            create_test_member(500, create_test_user(77, "owner", None), Some("Owner"), &[13]),
            create_test_member(500, create_test_user(123, "tester", Some("Tester")), None, &[11]),
            create_test_member(500, create_test_bot(1, "bonebot"), Some("Bone"), &[]),
        ] {
            guild.members.insert(member.user.id, member);
        }

        guild
    }

    /// Tests guild facts, channel counts and owner resolution.
    ///
    /// Expected: counts per channel type, owner with their own roles, sized icon
    #[test]
    fn snapshots_guild() {
        let snapshot = snapshot_guild(&test_guild());

        assert_eq!(snapshot.id, 500);
        assert_eq!(snapshot.name, "Test Server");
        assert_eq!(snapshot.member_count, 3);
        assert_eq!(snapshot.role_count, 3);
        assert_eq!(snapshot.channel_count, 3);
        assert_eq!(snapshot.text_channel_count, 1);
        assert_eq!(snapshot.voice_channel_count, 1);
        assert_eq!(snapshot.category_count, 1);

        let owner = snapshot.owner.unwrap();
        assert_eq!(owner.name, "Owner");
        assert_eq!(owner.roles, vec![13]);

        let icon = snapshot.icon.unwrap();
        assert!(icon.starts_with("https://cdn.discordapp.com/icons/500/"));
        assert!(icon.ends_with("?size=4096"));
    }

    /// Tests a full context with a mention and a reply.
    ///
    /// Expected: cached members resolved with nicknames, uncached mention
    /// falls back to the user, reply snapshotted with its own author
    #[test]
    fn snapshots_message_with_reply() {
        let guild = test_guild();
        let alice = create_test_user(201, "alice", Some("Alice"));
        let mut message = create_test_message(
            900,
            500,
            600,
            create_test_user(123, "tester", Some("Tester")),
            "bbhello <@201>",
        );
        message.mentions.push(alice);
        message.referenced_message = Some(Box::new(create_test_message(
            899,
            500,
            600,
            create_test_user(77, "owner", None),
            "first",
        )));

        let ctx = snapshot_context(
            &message,
            "bbhello @Alice".to_string(),
            Some("first".to_string()),
            &create_test_bot(1, "bonebot"),
            Some(&guild),
        );

        assert_eq!(ctx.author().name, "Tester");
        assert_eq!(ctx.author().mention, "<@123>");
        assert_eq!(ctx.author().roles, vec![11]);
        assert!(ctx.author().avatar.ends_with("?size=4096"));
        assert_eq!(ctx.bot_name, "Bone");
        assert_eq!(ctx.message.content, "bbhello @Alice");

        assert_eq!(ctx.message.mentions.len(), 1);
        assert_eq!(ctx.message.mentions[0].name, "Alice");
        assert!(ctx.message.mentions[0].roles.is_empty());

        assert_eq!(ctx.channel.name, "general");
        assert_eq!(ctx.channel.mention, "<#600>");
        assert_eq!(ctx.channel.kind, "TEXT");

        let reply = ctx.reply.as_ref().unwrap();
        assert_eq!(reply.id, 899);
        assert_eq!(reply.author.name, "Owner");
        assert_eq!(reply.content, "first");

        let origin = ctx.origin().unwrap();
        assert_eq!(origin.channel_id.get(), 600);
        assert_eq!(origin.message_id.get(), 900);
    }

    /// Tests a message without a cached guild.
    ///
    /// Expected: no guild facts, names from the users themselves
    #[test]
    fn snapshots_without_guild() {
        let message = create_test_message(
            900,
            500,
            600,
            create_test_user(123, "tester", None),
            "hi",
        );

        let ctx = snapshot_context(
            &message,
            "hi".to_string(),
            None,
            &create_test_bot(1, "bonebot"),
            None,
        );

        assert!(ctx.guild.is_none());
        assert_eq!(ctx.author().name, "tester");
        assert_eq!(ctx.bot_name, "bonebot");
        assert_eq!(ctx.channel.name, "");
        assert!(ctx.reply.is_none());
    }
}
