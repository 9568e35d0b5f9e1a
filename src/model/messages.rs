//! User-facing strings, overridable from the messages file.

use serde::Deserialize;

/// Every string the bot sends on its own behalf.
///
/// Missing keys in the messages file keep their default value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub help_command: String,
    pub quote_command: String,
    pub file_command: String,

    /// Sent when a prefixed word matches no command.
    pub unknown_command: String,
    /// `$TIME$` is replaced with the remaining seconds.
    pub command_cooldown: String,
    /// `$TIME$` is replaced with the remaining seconds.
    pub quote_cooldown: String,
    pub error: String,
    pub no_quotes: String,
    pub no_files: String,

    pub help_title: String,
    pub help_about: String,
    /// `$CMD$` is the prefixed command word and `$DESC$` its description.
    pub help_format: String,
    pub help_description: String,
    pub quote_description: String,
    pub file_description: String,
    /// Last line of the help listing.
    pub help_footer: String,
    pub quote_title: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            help_command: "help".to_string(),
            quote_command: "quote".to_string(),
            file_command: "file".to_string(),
            unknown_command: "Unknown command! Use the help command to see what I can do."
                .to_string(),
            command_cooldown: "Please wait $TIME$ more second(s) before using another command!"
                .to_string(),
            quote_cooldown: "Please wait $TIME$ more second(s) before asking for another quote!"
                .to_string(),
            error: "Something went wrong while doing that!".to_string(),
            no_quotes: "There are no quotes to send!".to_string(),
            no_files: "There are no files to send!".to_string(),
            help_title: "$BOT$ Help".to_string(),
            help_about: "Here is everything I can do in $GUILD$:".to_string(),
            help_format: "`$CMD$` - $DESC$".to_string(),
            help_description: "Show this list of commands".to_string(),
            quote_description: "Send a random quote".to_string(),
            file_description: "Send a file, random unless a name is given".to_string(),
            help_footer: "[**Source Code**](https://github.com/jeremynoesen/BoneBot)".to_string(),
            quote_title: "Quote".to_string(),
        }
    }
}

impl Messages {
    /// Fills `$TIME$` in a cooldown message.
    pub fn with_time(template: &str, seconds: u64) -> String {
        template.replace("$TIME$", &seconds.to_string())
    }
}
