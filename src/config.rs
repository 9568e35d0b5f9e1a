use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_PREFIX: &str = "bb";
const DEFAULT_EMBED_COLOR: u32 = 0x2F3136;

/// Module switches controlling which features answer messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSwitches {
    pub commands: bool,
    pub quotes: bool,
    pub files: bool,
    pub responder: bool,
    pub reactor: bool,
}

impl Default for ModuleSwitches {
    fn default() -> Self {
        Self {
            commands: true,
            quotes: true,
            files: true,
            responder: true,
            reactor: true,
        }
    }
}

pub struct Config {
    pub discord_bot_token: String,

    pub command_prefix: String,
    pub command_cooldown: Duration,
    pub quote_cooldown: Duration,
    pub responder_cooldown: Duration,

    /// Maximum number of events handled at once, 0 for unlimited.
    pub max_concurrent_events: usize,
    pub listen_to_bots: bool,
    pub embed_color: u32,
    pub shell_timeout: Duration,
    /// Identity placeholders in shell directives become `BB_` variable
    /// references instead of raw values.
    pub shell_env_references: bool,

    pub commands_file: PathBuf,
    pub quotes_file: PathBuf,
    pub responses_file: PathBuf,
    pub reactions_file: PathBuf,
    pub messages_file: PathBuf,
    pub files_dir: PathBuf,

    pub modules: ModuleSwitches,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            command_prefix: std::env::var("COMMAND_PREFIX")
                .unwrap_or_else(|_| DEFAULT_PREFIX.to_string()),
            command_cooldown: Duration::from_secs(env_or("COMMAND_COOLDOWN_SECS", 5)?),
            quote_cooldown: Duration::from_secs(env_or("QUOTE_COOLDOWN_SECS", 5)?),
            responder_cooldown: Duration::from_secs(env_or("RESPONDER_COOLDOWN_SECS", 5)?),
            max_concurrent_events: env_or("MAX_CONCURRENT_EVENTS", 8)?,
            listen_to_bots: env_or("LISTEN_TO_BOTS", false)?,
            embed_color: match std::env::var("EMBED_COLOR") {
                Ok(value) => parse_hex_color(&value).ok_or_else(|| ConfigError::InvalidEnvVar {
                    name: "EMBED_COLOR".to_string(),
                    value: value.clone(),
                    reason: "expected a hex colour such as #2F3136".to_string(),
                })?,
                Err(_) => DEFAULT_EMBED_COLOR,
            },
            shell_timeout: Duration::from_secs(env_or("SHELL_TIMEOUT_SECS", 30)?),
            shell_env_references: env_or("SHELL_ENV_REFERENCES", false)?,
            commands_file: path_or("COMMANDS_FILE", "data/commands.json"),
            quotes_file: path_or("QUOTES_FILE", "data/quotes.json"),
            responses_file: path_or("RESPONSES_FILE", "data/responses.json"),
            reactions_file: path_or("REACTIONS_FILE", "data/reactions.json"),
            messages_file: path_or("MESSAGES_FILE", "data/messages.json"),
            files_dir: path_or("FILES_DIR", "data/files"),
            modules: ModuleSwitches {
                commands: env_or("COMMANDS_ENABLED", true)?,
                quotes: env_or("QUOTES_ENABLED", true)?,
                files: env_or("FILES_ENABLED", true)?,
                responder: env_or("RESPONDER_ENABLED", true)?,
                reactor: env_or("REACTOR_ENABLED", true)?,
            },
        })
    }
}

/// Reads an optional environment variable, falling back to `default` when unset.
///
/// # Returns
/// - `Ok(T)` - Parsed value or the default
/// - `Err(ConfigError::InvalidEnvVar)` - Variable is set but does not parse as `T`
fn env_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => parse_value(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn path_or(name: &str, default: &str) -> PathBuf {
    std::env::var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

/// Parses `RRGGBB` or `#RRGGBB` into an RGB integer.
pub fn parse_hex_color(value: &str) -> Option<u32> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}
