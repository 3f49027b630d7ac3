//! Readme command - write the README index of a repository

use console::style;
use std::path::{Path, PathBuf};
use tmpldoc_core::Catalog;
use tmpldoc_engine::{Engine, EngineBuilder};
use tmpldoc_extract::{Batch, BatchResult};

use super::{load_config, output_dir, write_file};
use crate::error::Result;

/// File name of the index, written at the top of the output directory
pub const README_FILE: &str = "README.adoc";

pub fn run(root: &Path, output: Option<&Path>, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(root, config_path)?;
    let catalog = Catalog::from_config(&config);
    let engine = EngineBuilder::from_config(&config, root)?.build()?;
    let out_dir = output_dir(&config, root, output);

    let result = Batch::new(&config, &catalog)
        .exclude_output(&out_dir)
        .run(root)?;
    let path = write_readme(&engine, &result, &out_dir, false)?;

    println!(
        "{} {} ({} families, {} templates)",
        style("wrote").green(),
        path.display(),
        result.families.len(),
        result.document_count()
    );

    Ok(())
}

/// Render the index of a batch and write it, unless `dry_run`
pub(crate) fn write_readme(
    engine: &Engine,
    result: &BatchResult,
    out_dir: &Path,
    dry_run: bool,
) -> Result<PathBuf> {
    let content = engine.render_readme(&result.index())?;
    let path = out_dir.join(README_FILE);

    if !dry_run {
        write_file(&path, &content)?;
    }

    Ok(path)
}
