//! Bot state shared by every event handler.
//!
//! Built once during start-up from the configuration and the loaded
//! definition files, then shared behind an `Arc` for the lifetime of the
//! gateway connection. Nothing in it is reloaded at runtime; the cooldowns
//! and admission counters carry their own interior mutability.

use std::sync::Arc;

use crate::{
    config::ModuleSwitches,
    model::messages::Messages,
    service::{
        admission::AdmissionControl,
        dispatch::CommandDispatcher,
        keyword::{Reactor, Responder},
    },
};

pub struct BotState {
    /// Which modules answer messages.
    pub modules: ModuleSwitches,

    /// Whether messages from other bots are processed.
    pub listen_to_bots: bool,

    /// Prefixed command handling, including the built-ins.
    pub dispatcher: CommandDispatcher,

    /// Keyword responder, consulted for messages the dispatcher ignored.
    pub responder: Responder,

    /// Keyword reactor, consulted for messages the dispatcher ignored.
    pub reactor: Reactor,

    /// User-facing strings, shared with the dispatcher.
    pub messages: Arc<Messages>,

    /// Bound on concurrently handled events.
    pub admission: AdmissionControl,
}
