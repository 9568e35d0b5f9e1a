//! BoneBot Test Utils
//!
//! Factories for serenity models used by the bot's unit tests. Serenity's
//! gateway models are `#[non_exhaustive]` and cannot be built with struct
//! literals outside of serenity, so every factory deserializes a JSON payload
//! shaped like what Discord sends over the gateway.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_guild, create_test_member, create_test_user};
//!
//! let mut guild = create_test_guild(500, "Test Server", 77, None);
//! let member = create_test_member(500, create_test_user(77, "owner", None), Some("Owner"), &[13]);
//! guild.members.insert(member.user.id, member);
//! ```

pub mod serenity;
