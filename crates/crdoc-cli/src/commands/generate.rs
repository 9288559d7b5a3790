//! Generate command - render documentation for an API package

use console::style;
use crdoc_engine::Engine;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{CliError, Result};

/// Flags of `crdoc generate`
pub struct GenerateOptions<'a> {
    pub dir: &'a Path,
    pub template: Option<&'a Path>,
    pub output: Option<&'a Path>,
    /// Fail on undefined template variables
    pub strict: bool,
    pub word_offset: usize,
}

pub fn run(opts: &GenerateOptions) -> Result<()> {
    let group = super::load_model(opts.dir, opts.word_offset)?;
    let engine = Engine::builder().strict(opts.strict).build();

    let rendered = match opts.template {
        Some(path) => {
            let source = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
            engine.render(&group, &path.display().to_string(), &source)?
        }
        None => engine.render_default(&group)?,
    };

    match opts.output {
        Some(path) => {
            fs::write(path, format!("{rendered}\n")).map_err(|e| CliError::io(path, e))?;
            eprintln!(
                "{} Wrote {} ({} resources, {} types)",
                style("✓").green().bold(),
                path.display(),
                group.crs.len(),
                group.sub_objects.len()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}").map_err(|e| CliError::io(Path::new("<stdout>"), e))?;
        }
    }

    Ok(())
}
