//! Discord gateway integration.
//!
//! The bot connects to the gateway, snapshots every relevant message into a
//! template context and hands it to the services: first the command
//! dispatcher, then, for messages it did not handle, the keyword responder
//! and reactor.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild, channel and role data for the cache
//! - `GUILD_MESSAGES` - Message create and update events in guilds
//! - `GUILD_MEMBERS` - Member data for display names, avatars and roles (privileged)
//! - `MESSAGE_CONTENT` - Access to message text (privileged)
//!
//! Both privileged intents must be enabled in the Discord Developer Portal for
//! the bot application.

pub mod context;
pub mod handler;
pub mod start;
