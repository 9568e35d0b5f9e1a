//! Access to files the bot may attach to messages.

use rand::Rng;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Returns the path back when it names an existing, visible, regular file.
///
/// Hidden files are those whose name starts with a dot.
pub async fn visible_file(path: &Path) -> Option<PathBuf> {
    if is_hidden(path) {
        return None;
    }
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => Some(path.to_path_buf()),
        _ => None,
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Name used when uploading a file: spaces become underscores.
pub fn attachment_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().replace(' ', "_"))
        .unwrap_or_else(|| "file".to_string())
}

/// Directory of files served by the file command.
pub struct FileRepository<'a> {
    dir: &'a Path,
}

impl<'a> FileRepository<'a> {
    pub fn new(dir: &'a Path) -> Self {
        Self { dir }
    }

    /// Lists visible regular files in the directory, sorted by path.
    ///
    /// # Returns
    /// - `Ok(Vec<PathBuf>)` - Files found, empty when the directory is missing
    /// - `Err(AppError::IoErr)` - Directory exists but could not be read
    pub async fn list(&self) -> Result<Vec<PathBuf>, AppError> {
        let mut entries = match tokio::fs::read_dir(self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(path) = visible_file(&entry.path()).await {
                files.push(path);
            }
        }
        files.sort();

        Ok(files)
    }

    /// Finds a file whose name or stem equals `name`, ignoring case.
    pub async fn find(&self, name: &str) -> Result<Option<PathBuf>, AppError> {
        let name = name.trim().to_lowercase();
        let found = self.list().await?.into_iter().find(|path| {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase());
            let stem = path.file_stem().map(|n| n.to_string_lossy().to_lowercase());
            file_name.as_deref() == Some(name.as_str()) || stem.as_deref() == Some(name.as_str())
        });

        Ok(found)
    }

    /// Picks a file uniformly at random.
    pub async fn random(&self) -> Result<Option<PathBuf>, AppError> {
        let mut files = self.list().await?;
        if files.is_empty() {
            return Ok(None);
        }
        let index = rand::rng().random_range(0..files.len());

        Ok(Some(files.swap_remove(index)))
    }
}
