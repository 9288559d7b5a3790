//! Model command - dump the documentation model

use std::path::Path;

use crate::error::Result;

pub fn run(dir: &Path, json: bool, word_offset: usize) -> Result<()> {
    let group = super::load_model(dir, word_offset)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&group)?);
    } else {
        print!("{}", serde_yaml::to_string(&group)?);
    }

    Ok(())
}
