use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading definition files at start-up.
#[derive(Error, Debug)]
pub enum DataError {
    /// The file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path of the file that failed to read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its JSON content does not match the expected shape.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// Path of the file that failed to parse
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}
