//! Test factories for serenity gateway models.
//!
//! Each factory fills the fields Discord always sends with fixed defaults and
//! exposes the handful of fields the bot actually reads. Collections on the
//! returned structs are public and can be extended after creation, for
//! example inserting members and channels into a guild.
//!
//! # Available Factories
//!
//! - `guild::create_test_guild` - Guild with no members, roles or channels
//! - `role::create_test_role` - Role with no permissions
//! - `user::create_test_user` - User or bot account
//! - `member::create_test_member` - Guild member wrapping a user
//! - `channel::create_test_channel` - Guild channel of a given type
//! - `message::create_test_message` - Guild message without attachments

pub mod channel;
pub mod guild;
pub mod member;
pub mod message;
pub mod role;
pub mod user;

pub use channel::create_test_channel;
pub use guild::create_test_guild;
pub use member::create_test_member;
pub use message::create_test_message;
pub use role::create_test_role;
pub use user::create_test_user;
