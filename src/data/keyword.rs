use std::path::Path;

use crate::{
    data::read_json_or_default,
    error::AppError,
    model::keyword::{ReactionRule, ResponseRule},
};

/// Loads the keyword responder and reactor rule files.
pub struct KeywordRepository<'a> {
    responses: &'a Path,
    reactions: &'a Path,
}

impl<'a> KeywordRepository<'a> {
    pub fn new(responses: &'a Path, reactions: &'a Path) -> Self {
        Self {
            responses,
            reactions,
        }
    }

    pub async fn load_responses(&self) -> Result<Vec<ResponseRule>, AppError> {
        read_json_or_default(self.responses).await
    }

    pub async fn load_reactions(&self) -> Result<Vec<ReactionRule>, AppError> {
        read_json_or_default(self.reactions).await
    }
}
