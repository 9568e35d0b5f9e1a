//! Snapshot of the event that triggered a template expansion.
//!
//! A `TemplateContext` is built fresh for every invocation from the serenity
//! message and cache, then handed read-only to the expander and the variable
//! exporter. It is dropped once the invocation completes.

use serenity::all::{ChannelId, MessageId};

/// Identity of a guild member as seen by templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub id: u64,
    /// Effective display name (guild nickname, global name, or username).
    pub name: String,
    /// Mention string, `<@id>`.
    pub mention: String,
    /// Avatar URL already sized for export.
    pub avatar: String,
    /// Role ids in the order Discord reports them.
    pub roles: Vec<u64>,
}

/// Guild facts exported to templates and shell commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildSnapshot {
    pub id: u64,
    pub name: String,
    pub icon: Option<String>,
    pub member_count: u64,
    pub role_count: usize,
    pub channel_count: usize,
    pub text_channel_count: usize,
    pub voice_channel_count: usize,
    pub category_count: usize,
    pub owner: Option<MemberSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub id: u64,
    pub name: String,
    /// Mention string, `<#id>`.
    pub mention: String,
    /// Upper-case channel type name such as `TEXT`.
    pub kind: String,
}

/// A message as seen by templates: the triggering one or its reply target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageSnapshot {
    pub id: u64,
    pub author: MemberSnapshot,
    /// Content with mentions rendered as display text.
    pub content: String,
    /// Attachment URLs.
    pub attachments: Vec<String>,
    /// Image URLs of embeds that carry an image.
    pub embed_images: Vec<String>,
    /// Members in the platform's structured mention list.
    pub mentions: Vec<MemberSnapshot>,
}

/// Everything a template may refer to for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    pub message: MessageSnapshot,
    /// Display name of the bot in this guild.
    pub bot_name: String,
    pub bot_avatar: String,
    /// `None` outside of a guild (direct messages).
    pub guild: Option<GuildSnapshot>,
    pub channel: ChannelSnapshot,
    /// The message being replied to, if any.
    pub reply: Option<MessageSnapshot>,
}

impl TemplateContext {
    pub fn author(&self) -> &MemberSnapshot {
        &self.message.author
    }

    /// Channel and message the invocation answers to.
    ///
    /// # Returns
    /// - `Some(Origin)` - Both ids are valid snowflakes
    /// - `None` - The snapshot was built without ids
    pub fn origin(&self) -> Option<Origin> {
        if self.channel.id == 0 || self.message.id == 0 {
            return None;
        }
        Some(Origin {
            channel_id: ChannelId::new(self.channel.id),
            message_id: MessageId::new(self.message.id),
        })
    }
}

/// Where replies, reactions and typing indicators go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Builds a member with predictable fields derived from its id.
    pub fn member(id: u64, name: &str, roles: Vec<u64>) -> MemberSnapshot {
        MemberSnapshot {
            id,
            name: name.to_string(),
            mention: format!("<@{}>", id),
            avatar: format!("https://cdn.discordapp.com/avatars/{}/a.png?size=4096", id),
            roles,
        }
    }

    /// Context for a message sent by `<@123>` in "Test Server".
    pub fn sample_context(content: &str) -> TemplateContext {
        TemplateContext {
            message: MessageSnapshot {
                id: 900,
                author: member(123, "Tester", vec![11, 12]),
                content: content.to_string(),
                attachments: Vec::new(),
                embed_images: Vec::new(),
                mentions: Vec::new(),
            },
            bot_name: "BoneBot".to_string(),
            bot_avatar: "https://cdn.discordapp.com/avatars/1/b.png?size=4096".to_string(),
            guild: Some(GuildSnapshot {
                id: 500,
                name: "Test Server".to_string(),
                icon: Some("https://cdn.discordapp.com/icons/500/i.png?size=4096".to_string()),
                member_count: 42,
                role_count: 3,
                channel_count: 5,
                text_channel_count: 3,
                voice_channel_count: 1,
                category_count: 1,
                owner: Some(member(77, "Owner", vec![13])),
            }),
            channel: ChannelSnapshot {
                id: 600,
                name: "general".to_string(),
                mention: "<#600>".to_string(),
                kind: "TEXT".to_string(),
            },
            reply: None,
        }
    }
}
