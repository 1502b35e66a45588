//! Error types for rust-procmap

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while cataloguing and mapping procedures
#[derive(Error, Debug)]
pub enum ProcMapError {
    #[error("Malformed procedure definition in {source_label}: {message}")]
    MalformedDefinition {
        source_label: String,
        message: String,
    },

    #[error("Malformed EXEC reference in {source_label}: {reference}")]
    MalformedReference {
        source_label: String,
        reference: String,
    },

    #[error("Procedure {procedure} is defined more than once ({})", .sources.join(", "))]
    AmbiguousProcedure {
        procedure: String,
        sources: Vec<String>,
    },

    #[error("Failed to read SQL file: {path}")]
    SqlFileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk procedure folder: {path}")]
    DirectoryReadError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidExcludePattern { pattern: String, message: String },
}
