//! crdoc Engine - Jinja2 templating for API group documentation
//!
//! This crate renders an `ApiGroup` model with MiniJinja:
//! - Filters for serialization, quoting, indentation and heading anchors
//! - A built-in Markdown template
//! - Source-mapped error messages with suggestions

pub mod engine;
pub mod error;
pub mod filters;
pub mod functions;
pub mod suggestions;

pub use engine::{DEFAULT_TEMPLATE, DEFAULT_TEMPLATE_NAME, Engine, EngineBuilder};
pub use error::{EngineError, Result, TemplateError, TemplateErrorKind};
pub use suggestions::{AVAILABLE_FILTERS, AVAILABLE_FUNCTIONS};
