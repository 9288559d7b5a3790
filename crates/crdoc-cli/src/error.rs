//! CLI error types with exit code handling
//!
//! Every library error is mapped onto a `CliError`, which knows the exit
//! code the process ends with.

use std::path::Path;

use crdoc_core::CoreError;
use crdoc_engine::{EngineError, TemplateError};
use crdoc_source::SourceError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Template parsing or rendering failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),

    /// The Go package could not be read, parsed or modeled
    #[error("Source error: {message}")]
    #[diagnostic(code(crdoc::cli::source))]
    Source {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(crdoc::cli::io))]
    Io { message: String },

    /// Anything else
    #[error("{message}")]
    #[diagnostic(code(crdoc::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Template(_) => exit_codes::TEMPLATE_ERROR,
            CliError::Source { .. } => exit_codes::SOURCE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Create a source error with help text
    pub fn source_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create an IO error naming the file involved
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{}: {}", path.display(), err),
        }
    }
}

impl From<SourceError> for CliError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Io { path, source } => CliError::io(&path, source),
            SourceError::DirectoryNotFound(ref path) => CliError::Io {
                message: format!("Directory not found: {}", path.display()),
            },
            SourceError::NoGoFiles(ref dir) => CliError::source_with_help(
                err.to_string(),
                format!("Point crdoc at the directory of an API version, e.g. {}/v1", dir.display()),
            ),
            other => CliError::Source {
                message: other.to_string(),
                help: None,
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let help = match err {
            CoreError::MissingTag { .. } => {
                Some("Every exported field needs a json struct tag, e.g. `json:\"name,omitempty\"`".to_string())
            }
            CoreError::UnsupportedType { .. } => {
                Some("Declare the field type as a named type of the package".to_string())
            }
            _ => None,
        };
        CliError::Source {
            message: err.to_string(),
            help,
        }
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Template(err) => CliError::Template(err),
            other => CliError::Other {
                message: other.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other {
            message: format!("Failed to serialize the model: {}", err),
        }
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::Other {
            message: format!("Failed to serialize the model: {}", err),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
