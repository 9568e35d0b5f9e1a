//! Output of expanding one message segment of a template.

use std::path::PathBuf;

/// Title and presentation of an embed produced by an `$EMBED$` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSpec {
    /// Author line of the embed.
    pub title: String,
    /// Icon shown next to the title.
    pub icon_url: Option<String>,
    pub description: String,
    pub color: u32,
}

/// Text and side-channel directives left after expanding one segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionResult {
    /// Remaining text after every placeholder was consumed.
    pub text: String,
    /// Shell command from `$CMD$...$CMD$`.
    pub shell: Option<String>,
    /// Emoji from `$REACT$...$REACT$`.
    pub reaction: Option<String>,
    /// Existing, visible, regular file from `$FILE$...$FILE$`.
    pub file: Option<PathBuf>,
    /// Embed title from `$EMBED$...$EMBED$`.
    pub embed_title: Option<String>,
    /// Set by `$REPLY$`: answer as a reply to the triggering message.
    pub reply: bool,
}

impl ExpansionResult {
    /// True when delivering this segment would send nothing at all.
    pub fn is_silent(&self) -> bool {
        self.text.is_empty() && self.file.is_none() && self.embed_title.is_none()
    }
}
