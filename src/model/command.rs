//! Custom command definitions and the ordered table they are matched against.

use dioxus_logger::tracing;

/// Separator between randomized variants of a command template.
pub const VARIANT_SEPARATOR: &str = "$||$";

/// A custom command loaded from the command definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    /// Command word without the prefix, matched case-insensitively.
    pub label: String,
    /// Description shown in the help listing.
    pub description: String,
    /// Raw template, possibly holding several `$||$`-separated variants.
    pub template: String,
}

impl CommandDefinition {
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            template: template.into(),
        }
    }
}

/// Ordered table of custom commands with case-insensitively unique labels.
///
/// Loaded once at start-up and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTable {
    commands: Vec<CommandDefinition>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from definitions in load order.
    ///
    /// When two definitions share a label (ignoring case) the later one replaces
    /// the earlier one but keeps the earlier one's position in the table.
    pub fn from_definitions(definitions: impl IntoIterator<Item = CommandDefinition>) -> Self {
        let mut table = Self::new();
        for definition in definitions {
            table.insert(definition);
        }
        table
    }

    fn insert(&mut self, definition: CommandDefinition) {
        let label = definition.label.to_lowercase();
        match self
            .commands
            .iter_mut()
            .find(|existing| existing.label.to_lowercase() == label)
        {
            Some(existing) => {
                tracing::warn!(
                    "Duplicate command label '{}', replacing earlier definition",
                    definition.label
                );
                *existing = definition;
            }
            None => self.commands.push(definition),
        }
    }

    /// Finds the command whose prefixed label equals `word`, ignoring case.
    pub fn find(&self, prefix: &str, word: &str) -> Option<&CommandDefinition> {
        self.commands
            .iter()
            .find(|command| matches_prefixed(prefix, &command.label, word))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Checks whether `word` equals `prefix + label`, ignoring case.
pub fn matches_prefixed(prefix: &str, label: &str, word: &str) -> bool {
    word.to_lowercase() == format!("{}{}", prefix, label).to_lowercase()
}
