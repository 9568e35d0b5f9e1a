//! Business logic of the bot.
//!
//! - `template` - Template language: parsing, expansion, `BB_` variables, shell
//! - `dispatch` - Prefixed command handling, built-ins and cooldowns
//! - `keyword` - Keyword responder and reactor
//! - `admission` - Bounded concurrency for incoming events
//! - `messenger` - Outbound Discord actions behind a trait

pub mod admission;
pub mod dispatch;
pub mod keyword;
pub mod messenger;
pub mod template;
