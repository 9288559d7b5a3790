//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Field `{field}` of type `{type_name}` has no json tag")]
    MissingTag { type_name: String, field: String },

    #[error("Field `{field}` of type `{type_name}` has an unhandled type expression: {expr}")]
    UnsupportedType {
        type_name: String,
        field: String,
        expr: String,
    },

    #[error("Failed to build example for {kind}: {source}")]
    Example {
        kind: String,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
