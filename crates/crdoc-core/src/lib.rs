//! crdoc Core - Documentation model for Kubernetes API groups
//!
//! This crate turns declared API types into the model the documentation
//! templates are rendered from:
//! - `DocumentationBlock`: doc comments split into prose and annotations
//! - `CustomResource` / `SubObject`: resources and the types they are built from
//! - `ApiGroup`: the model root, built by `ModelBuilder`
//! - `ExampleSynthesizer`: example YAML for each resource

pub mod annotations;
pub mod builder;
pub mod classify;
pub mod decl;
pub mod error;
pub mod example;
pub mod fields;
pub mod model;
pub mod resolve;
pub mod tag;

pub use builder::{ModelBuilder, build_api_group};
pub use decl::{FieldDecl, PackageDecl, TypeDecl, TypeExpr};
pub use error::{CoreError, Result};
pub use example::{ExampleSynthesizer, WordCursor, PLACEHOLDER_WORDS};
pub use model::{
    ApiGroup, CustomResource, DocumentationBlock, Field, FieldType, GroupVersion,
    GroupVersionKind, Scope, SubObject,
};
