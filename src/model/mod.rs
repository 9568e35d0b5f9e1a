//! Plain domain models shared by the data, service, and bot layers.
//!
//! Nothing in here talks to Discord: serenity types are converted into these
//! snapshots at the edge (`bot::context`) so the template and dispatch logic can
//! be exercised without a gateway connection.

pub mod command;
pub mod context;
pub mod expansion;
pub mod keyword;
pub mod messages;
