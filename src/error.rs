// Error kinds for loading source tables and writing the static API tree

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a generation run.
///
/// Only `Removal` is recoverable: the generator logs it while clearing the
/// output directory and carries on.
#[derive(Debug, Error)]
pub enum WilayahError {
    /// A source table could not be opened or read
    #[error("File '{file}' doesn't exist in data directory")]
    SourceNotFound {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// The table opened but the CSV reader rejected its contents
    #[error("File '{file}' could not be parsed as CSV")]
    SourceParse {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// An odd number of `"` characters: some quoted field never closes
    #[error("File '{file}' has an unterminated quoted field")]
    UnterminatedQuote { file: String },

    /// An artifact path built from an id would land outside the output directory
    #[error("Refusing to write '{0}' outside the output directory")]
    UnsafeArtifactPath(String),

    #[error("Cannot write '{}'", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot remove file or directory '{}'", .path.display())]
    Removal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot serialize payload for '{}'", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid table schema: {0}")]
    InvalidSchema(String),
}

pub type Result<T> = std::result::Result<T, WilayahError>;
