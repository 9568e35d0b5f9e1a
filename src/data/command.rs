use serde::Deserialize;
use std::path::Path;

use crate::{
    data::read_json,
    error::AppError,
    model::command::{CommandDefinition, CommandTable},
};

/// One entry of the command definition file.
#[derive(Debug, Deserialize)]
struct CommandRecord {
    label: String,
    #[serde(default)]
    description: String,
    template: String,
}

pub struct CommandRepository<'a> {
    path: &'a Path,
}

impl<'a> CommandRepository<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Loads the command table in file order.
    ///
    /// # Returns
    /// - `Ok(CommandTable)` - Commands keyed case-insensitively, last duplicate wins
    /// - `Err(AppError::DataErr)` - File is missing, unreadable, or malformed
    pub async fn load(&self) -> Result<CommandTable, AppError> {
        let records: Vec<CommandRecord> = read_json(self.path).await?;

        Ok(CommandTable::from_definitions(records.into_iter().map(
            |record| CommandDefinition::new(record.label, record.description, record.template),
        )))
    }
}
