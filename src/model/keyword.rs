//! Keyword rules for the responder and reactor.

use serde::Deserialize;

/// A rule that fires when all of its triggers occur in a message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseRule {
    pub triggers: Vec<String>,
    /// Template sent back when the rule fires.
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactionRule {
    pub triggers: Vec<String>,
    /// Unicode emoji or custom emoji in `<:name:id>` form.
    pub emoji: String,
}

/// Checks that every trigger occurs in `content`, ignoring case.
///
/// A rule with no triggers never fires.
pub fn triggers_match(triggers: &[String], content: &str) -> bool {
    if triggers.is_empty() {
        return false;
    }
    let content = content.to_lowercase();
    triggers
        .iter()
        .all(|trigger| content.contains(&trigger.to_lowercase()))
}

impl ResponseRule {
    pub fn matches(&self, content: &str) -> bool {
        triggers_match(&self.triggers, content)
    }
}

impl ReactionRule {
    pub fn matches(&self, content: &str) -> bool {
        triggers_match(&self.triggers, content)
    }
}
