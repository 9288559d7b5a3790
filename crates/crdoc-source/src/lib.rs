//! crdoc Source - Go API package reader
//!
//! Reads the Go package that declares a Kubernetes API group version and
//! hands its exported types to `crdoc-core` as declarations.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let package = crdoc_source::load_package(Path::new("./api/v1")).unwrap();
//! let group = crdoc_core::build_api_group(&package).unwrap();
//!
//! for cr in &group.crs {
//!     println!("{}", cr.kind());
//! }
//! ```

pub mod ast;
pub mod error;
pub mod package;
pub mod parser;

pub use ast::SourceFile;
pub use error::{Result, SourceError};
pub use package::load_package;
pub use parser::{ParseError, parse};
