//! Outbound Discord actions.
//!
//! Everything the bot sends goes through the `Messenger` trait so dispatch
//! logic can be tested against a recorder instead of a live gateway. The
//! production implementation wraps serenity's shared HTTP client.

use serenity::{
    all::{
        ChannelId, CreateAttachment, CreateEmbed, CreateEmbedAuthor, CreateMessage, MessageId,
        ReactionType,
    },
    async_trait,
    http::Http,
};
use std::path::Path;
use std::sync::Arc;

use crate::{data::file::attachment_name, error::AppError, model::expansion::EmbedSpec};

/// Channel-level actions the bot performs.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a plain text message, optionally as a reply.
    async fn send_text(
        &self,
        channel: ChannelId,
        text: &str,
        reply_to: Option<MessageId>,
    ) -> Result<(), AppError>;

    /// Sends an embed, with the file shown as its image when given.
    async fn send_embed(
        &self,
        channel: ChannelId,
        embed: &EmbedSpec,
        file: Option<&Path>,
        reply_to: Option<MessageId>,
    ) -> Result<(), AppError>;

    /// Uploads a file, with optional accompanying text.
    async fn send_file(
        &self,
        channel: ChannelId,
        text: Option<&str>,
        file: &Path,
        reply_to: Option<MessageId>,
    ) -> Result<(), AppError>;

    /// Reacts to a message with a unicode emoji or `<:name:id>` custom emoji.
    async fn add_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        emoji: &str,
    ) -> Result<(), AppError>;

    /// Shows the typing indicator in a channel for a few seconds.
    async fn broadcast_typing(&self, channel: ChannelId) -> Result<(), AppError>;
}

/// Messenger backed by serenity's HTTP client.
#[derive(Clone)]
pub struct SerenityMessenger {
    http: Arc<Http>,
}

impl SerenityMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    fn with_reply(
        builder: CreateMessage,
        channel: ChannelId,
        reply_to: Option<MessageId>,
    ) -> CreateMessage {
        match reply_to {
            Some(message) => builder.reference_message((channel, message)),
            None => builder,
        }
    }

    async fn attachment(file: &Path) -> Result<CreateAttachment, AppError> {
        let data = tokio::fs::read(file).await?;
        Ok(CreateAttachment::bytes(data, attachment_name(file)))
    }
}

/// Parses an emoji, falling back to treating it as unicode.
pub fn parse_reaction(emoji: &str) -> ReactionType {
    ReactionType::try_from(emoji).unwrap_or_else(|_| ReactionType::Unicode(emoji.to_string()))
}

#[async_trait]
impl Messenger for SerenityMessenger {
    async fn send_text(
        &self,
        channel: ChannelId,
        text: &str,
        reply_to: Option<MessageId>,
    ) -> Result<(), AppError> {
        let builder = Self::with_reply(CreateMessage::new().content(text), channel, reply_to);
        channel.send_message(&*self.http, builder).await?;
        Ok(())
    }

    async fn send_embed(
        &self,
        channel: ChannelId,
        embed: &EmbedSpec,
        file: Option<&Path>,
        reply_to: Option<MessageId>,
    ) -> Result<(), AppError> {
        let mut author = CreateEmbedAuthor::new(&embed.title);
        if let Some(icon_url) = &embed.icon_url {
            author = author.icon_url(icon_url);
        }
        let mut create_embed = CreateEmbed::new()
            .author(author)
            .description(&embed.description)
            .color(embed.color);

        let mut builder = CreateMessage::new();
        if let Some(file) = file {
            create_embed = create_embed.image(format!("attachment://{}", attachment_name(file)));
            builder = builder.add_file(Self::attachment(file).await?);
        }
        let builder = Self::with_reply(builder.embed(create_embed), channel, reply_to);

        channel.send_message(&*self.http, builder).await?;
        Ok(())
    }

    async fn send_file(
        &self,
        channel: ChannelId,
        text: Option<&str>,
        file: &Path,
        reply_to: Option<MessageId>,
    ) -> Result<(), AppError> {
        let mut builder = CreateMessage::new().add_file(Self::attachment(file).await?);
        if let Some(text) = text {
            builder = builder.content(text);
        }
        let builder = Self::with_reply(builder, channel, reply_to);

        channel.send_message(&*self.http, builder).await?;
        Ok(())
    }

    async fn add_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        emoji: &str,
    ) -> Result<(), AppError> {
        self.http
            .create_reaction(channel, message, &parse_reaction(emoji))
            .await?;
        Ok(())
    }

    async fn broadcast_typing(&self, channel: ChannelId) -> Result<(), AppError> {
        self.http.broadcast_typing(channel).await?;
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    //! Recording messenger for dispatcher tests.

    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// One recorded outbound action.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Sent {
        Text {
            channel: ChannelId,
            text: String,
            reply_to: Option<MessageId>,
        },
        Embed {
            channel: ChannelId,
            embed: EmbedSpec,
            file: Option<PathBuf>,
            reply_to: Option<MessageId>,
        },
        File {
            channel: ChannelId,
            text: Option<String>,
            file: PathBuf,
            reply_to: Option<MessageId>,
        },
        Reaction {
            message: MessageId,
            emoji: String,
        },
    }

    /// Messenger that records every action instead of sending it.
    ///
    /// Typing broadcasts are counted separately since their number depends on
    /// timing.
    #[derive(Default)]
    pub struct RecordingMessenger {
        sent: Mutex<Vec<Sent>>,
        typing: Mutex<u32>,
        fail_files: bool,
    }

    impl RecordingMessenger {
        pub fn new() -> Self {
            Self::default()
        }

        /// A messenger whose file uploads fail, to exercise error paths.
        pub fn failing_files() -> Self {
            Self {
                fail_files: true,
                ..Self::default()
            }
        }

        pub fn sent(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().clone()
        }

        pub fn texts(&self) -> Vec<String> {
            self.sent()
                .into_iter()
                .filter_map(|sent| match sent {
                    Sent::Text { text, .. } => Some(text),
                    _ => None,
                })
                .collect()
        }

        pub fn typing_count(&self) -> u32 {
            *self.typing.lock().unwrap()
        }

        fn record(&self, sent: Sent) {
            self.sent.lock().unwrap().push(sent);
        }
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn send_text(
            &self,
            channel: ChannelId,
            text: &str,
            reply_to: Option<MessageId>,
        ) -> Result<(), AppError> {
            self.record(Sent::Text {
                channel,
                text: text.to_string(),
                reply_to,
            });
            Ok(())
        }

        async fn send_embed(
            &self,
            channel: ChannelId,
            embed: &EmbedSpec,
            file: Option<&Path>,
            reply_to: Option<MessageId>,
        ) -> Result<(), AppError> {
            self.record(Sent::Embed {
                channel,
                embed: embed.clone(),
                file: file.map(Path::to_path_buf),
                reply_to,
            });
            Ok(())
        }

        async fn send_file(
            &self,
            channel: ChannelId,
            text: Option<&str>,
            file: &Path,
            reply_to: Option<MessageId>,
        ) -> Result<(), AppError> {
            if self.fail_files {
                return Err(AppError::InternalError("upload failed".to_string()));
            }
            self.record(Sent::File {
                channel,
                text: text.map(str::to_string),
                file: file.to_path_buf(),
                reply_to,
            });
            Ok(())
        }

        async fn add_reaction(
            &self,
            _channel: ChannelId,
            message: MessageId,
            emoji: &str,
        ) -> Result<(), AppError> {
            self.record(Sent::Reaction {
                message,
                emoji: emoji.to_string(),
            });
            Ok(())
        }

        async fn broadcast_typing(&self, _channel: ChannelId) -> Result<(), AppError> {
            *self.typing.lock().unwrap() += 1;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests emoji parsing for unicode and custom emoji.
    ///
    /// Expected: unicode kept as-is, custom emoji parsed with its id
    #[test]
    fn parses_reactions() {
        assert_eq!(parse_reaction("👋"), ReactionType::Unicode("👋".to_string()));

        match parse_reaction("<:buh:123456789012345678>") {
            ReactionType::Custom { id, name, .. } => {
                assert_eq!(id.get(), 123456789012345678);
                assert_eq!(name.as_deref(), Some("buh"));
            }
            other => panic!("expected custom emoji, got {:?}", other),
        }
    }
}
