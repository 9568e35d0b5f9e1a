//! Loading of definition files into domain models.
//!
//! Each repository wraps one file or directory named in the configuration and
//! converts its JSON content into the models in `crate::model`. Everything is
//! loaded once during start-up; nothing here is written back.

pub mod command;
pub mod file;
pub mod keyword;
pub mod messages;
pub mod quote;

use serde::de::DeserializeOwned;
use std::path::Path;

use dioxus_logger::tracing;

use crate::error::{data::DataError, AppError};

/// Reads and deserializes a JSON file.
///
/// # Arguments
/// - `path` - File to read
///
/// # Returns
/// - `Ok(T)` - Parsed content
/// - `Err(DataError::Read)` - File could not be read
/// - `Err(DataError::Parse)` - Content is not valid JSON for `T`
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let value = serde_json::from_str(&raw).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(value)
}

/// Reads a JSON file that may be absent, using `T::default()` when it is.
///
/// A file that exists but is unreadable or malformed is still an error.
async fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, AppError> {
    match tokio::fs::try_exists(path).await {
        Ok(true) => read_json(path).await,
        Ok(false) => {
            tracing::warn!("{} not found, using defaults", path.display());
            Ok(T::default())
        }
        Err(source) => Err(DataError::Read {
            path: path.to_path_buf(),
            source,
        }
        .into()),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    /// Creates an empty scratch directory unique to one test.
    pub fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bonebot-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
