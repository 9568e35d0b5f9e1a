use std::path::Path;

use crate::{data::read_json_or_default, error::AppError, model::messages::Messages};

pub struct MessagesRepository<'a> {
    path: &'a Path,
}

impl<'a> MessagesRepository<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Loads the user-facing strings, keeping defaults for absent keys.
    pub async fn load(&self) -> Result<Messages, AppError> {
        read_json_or_default(self.path).await
    }
}
