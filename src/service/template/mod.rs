//! Custom command template expansion.
//!
//! A template is a small language layered over plain message text:
//!
//! - `$||$` separates alternative variants; one is picked uniformly at random.
//! - `$&&$` splits the chosen variant into messages sent one after another.
//! - `$PING$`, `$NAME$`, `$BOT$` and `$GUILD$` are replaced with the invoker's
//!   mention, the invoker's name, the bot's name and the guild's name.
//! - A literal `\n` becomes a line break.
//! - `$CMD$...$CMD$` runs a shell command with the `BB_` variables from
//!   [`environment`] in its environment; `$CMDOUT$` receives its output
//!   verbatim. Identity placeholders in the command are filled in like
//!   everywhere else.
//! - `$REACT$...$REACT$` reacts to the triggering message with an emoji.
//! - `$FILE$...$FILE$` attaches a file.
//! - `$EMBED$...$EMBED$` sends the text as an embed with the given title.
//! - `$REPLY$` sends the message as a reply to the triggering message.
//!
//! Malformed templates never fail: a marker without its partner is kept as
//! text, and an unusable file path drops the attachment.

pub mod environment;
pub mod parser;
pub mod shell;

#[cfg(test)]
mod test;

use dioxus_logger::tracing;
use rand::Rng;
use std::path::Path;

use crate::{
    data::file::visible_file,
    error::AppError,
    model::{context::TemplateContext, expansion::ExpansionResult},
};

use self::{
    parser::{parse_segment, ParsedSegment, Piece},
    shell::ShellRunner,
};

pub use crate::model::command::VARIANT_SEPARATOR;

pub const SEGMENT_SEPARATOR: &str = "$&&$";

pub const PING: &str = "$PING$";
pub const NAME: &str = "$NAME$";
pub const BOT: &str = "$BOT$";
pub const GUILD: &str = "$GUILD$";
pub const NEWLINE: &str = "\\n";

pub const CMD: &str = "$CMD$";
pub const CMDOUT: &str = "$CMDOUT$";
pub const REACT: &str = "$REACT$";
pub const FILE: &str = "$FILE$";
pub const EMBED: &str = "$EMBED$";
pub const REPLY: &str = "$REPLY$";

/// Picks one `$||$`-separated variant uniformly at random.
pub fn select_variant(template: &str) -> &str {
    let variants: Vec<&str> = template.split(VARIANT_SEPARATOR).collect();
    let index = rand::rng().random_range(0..variants.len());
    variants[index]
}

/// Splits a variant into its `$&&$`-separated message segments.
pub fn split_segments(variant: &str) -> Vec<&str> {
    variant.split(SEGMENT_SEPARATOR).collect()
}

/// Replaces the identity placeholders with values from the context.
///
/// `$GUILD$` is left untouched when the message did not come from a guild.
pub fn substitute_identity(text: &str, ctx: &TemplateContext) -> String {
    let author = ctx.author();
    let text = text
        .replace(PING, &author.mention)
        .replace(NAME, &author.name)
        .replace(BOT, &ctx.bot_name);

    match &ctx.guild {
        Some(guild) => text.replace(GUILD, &guild.name),
        None => text,
    }
}

/// Replaces identity placeholders in a shell command with variable references.
///
/// The command sees the same values through its environment, so names chosen
/// by users never become part of the command line. Only used when the
/// expander is built with env references enabled.
pub fn substitute_shell_identity(command: &str) -> String {
    command
        .replace(PING, &shell_variable("BB_PING"))
        .replace(NAME, &shell_variable("BB_NAME"))
        .replace(BOT, &shell_variable("BB_BOT_NAME"))
        .replace(GUILD, &shell_variable("BB_GUILD_NAME"))
}

#[cfg(not(windows))]
fn shell_variable(name: &str) -> String {
    format!("${{{}}}", name)
}

#[cfg(windows)]
fn shell_variable(name: &str) -> String {
    format!("%{}%", name)
}

/// Collapses runs of spaces into one.
fn collapse_spaces(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut previous_space = false;
    for c in text.chars() {
        if c == ' ' {
            if !previous_space {
                collapsed.push(c);
            }
            previous_space = true;
        } else {
            collapsed.push(c);
            previous_space = false;
        }
    }
    collapsed
}

/// Collapses repeated spaces and trims surrounding whitespace.
pub fn normalize(text: &str) -> String {
    collapse_spaces(text).trim().to_string()
}

/// Fills placeholders into the residual text of a parsed segment.
///
/// Command output is inserted verbatim after the surrounding template text
/// has been normalized.
pub fn render(parsed: &ParsedSegment, ctx: &TemplateContext, output: &str) -> String {
    let last = parsed.pieces.len().saturating_sub(1);
    let mut rendered = String::new();

    for (index, piece) in parsed.pieces.iter().enumerate() {
        match piece {
            Piece::Text(text) => {
                let collapsed = collapse_spaces(&substitute_identity(text, ctx));
                let mut text = collapsed.as_str();
                if index == 0 {
                    text = text.trim_start();
                }
                if index == last {
                    text = text.trim_end();
                }
                rendered.push_str(text);
            }
            Piece::CommandOutput => rendered.push_str(output),
        }
    }

    rendered
}

/// Expands templates against a context and runs their shell directives.
#[derive(Clone)]
pub struct TemplateExpander {
    shell: ShellRunner,
    env_references: bool,
}

impl TemplateExpander {
    pub fn new(shell: ShellRunner) -> Self {
        Self {
            shell,
            env_references: false,
        }
    }

    /// Makes identity placeholders in shell directives expand to `BB_`
    /// variable references instead of their values.
    pub fn with_env_references(mut self, enabled: bool) -> Self {
        self.env_references = enabled;
        self
    }

    /// Expands a full template: picks a variant and expands each segment.
    ///
    /// # Arguments
    /// - `template` - Raw template, possibly with variants and segments
    /// - `ctx` - Snapshot of the triggering message
    ///
    /// # Returns
    /// - `Ok(Vec<ExpansionResult>)` - One result per segment, in order
    /// - `Err(AppError::IoErr)` - A shell directive could not be started
    pub async fn expand(
        &self,
        template: &str,
        ctx: &TemplateContext,
    ) -> Result<Vec<ExpansionResult>, AppError> {
        let variant = select_variant(template);

        let mut results = Vec::new();
        for segment in split_segments(variant) {
            results.push(self.expand_segment(segment, ctx).await?);
        }

        Ok(results)
    }

    /// Expands one segment.
    ///
    /// A shell directive runs with the exported variables. When the text holds
    /// `$CMDOUT$`, expansion waits for the command's output (bounded by the
    /// shell timeout); otherwise the command runs in the background.
    pub async fn expand_segment(
        &self,
        segment: &str,
        ctx: &TemplateContext,
    ) -> Result<ExpansionResult, AppError> {
        let parsed = parse_segment(&segment.replace(NEWLINE, "\n"));

        let shell = parsed.shell.as_deref().map(|command| {
            if self.env_references {
                substitute_shell_identity(command)
            } else {
                substitute_identity(command, ctx)
            }
        });
        let output = match &shell {
            Some(command) => {
                let env = environment::build_environment(ctx);
                if parsed.wants_output() {
                    self.shell.run(command, &env).await?
                } else {
                    self.shell.spawn_detached(command, &env)?;
                    String::new()
                }
            }
            None => String::new(),
        };

        let file = match &parsed.file {
            Some(raw) => {
                let path = substitute_identity(raw, ctx);
                let file = visible_file(Path::new(&path)).await;
                if file.is_none() {
                    tracing::debug!("Dropping file directive, '{}' is not a visible file", path);
                }
                file
            }
            None => None,
        };

        Ok(ExpansionResult {
            text: render(&parsed, ctx, &output),
            shell,
            reaction: parsed
                .reaction
                .as_deref()
                .map(|emoji| normalize(&substitute_identity(emoji, ctx))),
            file,
            embed_title: parsed
                .embed_title
                .as_deref()
                .map(|title| normalize(&substitute_identity(title, ctx))),
            reply: parsed.reply,
        })
    }
}
