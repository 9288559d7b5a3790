//! Source loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Error while loading a Go package
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: crate::parser::ParseError,
    },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("No Go source files in {0}")]
    NoGoFiles(PathBuf),

    #[error("Found packages {first} and {second} in {dir}")]
    PackageMismatch {
        dir: PathBuf,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, SourceError>;
