use std::path::Path;

use crate::{data::read_json_or_default, error::AppError};

pub struct QuoteRepository<'a> {
    path: &'a Path,
}

impl<'a> QuoteRepository<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Loads the quote list, empty when the file does not exist.
    pub async fn load(&self) -> Result<Vec<String>, AppError> {
        read_json_or_default(self.path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::scratch_dir;

    /// Tests that a missing quote file yields no quotes.
    ///
    /// Expected: Ok with empty list
    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = scratch_dir("quotes-missing");

        let quotes = QuoteRepository::new(&dir.join("quotes.json"))
            .load()
            .await
            .unwrap();

        assert!(quotes.is_empty());
    }

    /// Tests loading quotes.
    ///
    /// Expected: Ok with quotes in file order
    #[tokio::test]
    async fn loads_quotes() {
        let dir = scratch_dir("quotes-load");
        let path = dir.join("quotes.json");
        std::fs::write(&path, r#"["first", "second\\nline"]"#).unwrap();

        let quotes = QuoteRepository::new(&path).load().await.unwrap();

        assert_eq!(quotes, vec!["first".to_string(), "second\\nline".to_string()]);
    }
}
