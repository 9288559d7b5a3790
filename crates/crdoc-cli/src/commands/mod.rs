//! CLI commands

pub mod generate;
pub mod model;

use std::path::Path;

use crdoc_core::{ApiGroup, ModelBuilder};

use crate::error::Result;

/// Load the package in `dir` and build its documentation model
pub(crate) fn load_model(dir: &Path, word_offset: usize) -> Result<ApiGroup> {
    let package = crdoc_source::load_package(dir)?;
    tracing::debug!(
        package = %package.name,
        types = package.types.len(),
        "loaded package"
    );

    let group = ModelBuilder::new().word_offset(word_offset).build(&package)?;
    Ok(group)
}
