//! Error types for the bot.
//!
//! `AppError` is the top-level error returned by start-up code and by every
//! dispatch path. Start-up errors terminate the process; errors raised while
//! handling an event are logged and answered with the generic error message,
//! so a single failing invocation never takes the listener down.

pub mod config;
pub mod data;

use thiserror::Error;

use crate::error::{config::ConfigError, data::DataError};

/// Top-level application error type.
///
/// Aggregates the domain-specific errors and the errors of the libraries the
/// bot talks to. Most variants use `#[from]` for automatic conversion with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during start-up or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// A definition file (commands, quotes, keywords, messages) could not be
    /// read or parsed.
    #[error(transparent)]
    DataErr(#[from] DataError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Filesystem or subprocess I/O error.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Internal error with custom message.
    ///
    /// # Fields
    /// - Detailed error message for logging
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
