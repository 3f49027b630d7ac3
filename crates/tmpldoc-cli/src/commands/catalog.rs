//! Catalog command - show the effective lookup tables

use console::style;
use indexmap::IndexMap;
use std::path::Path;
use tmpldoc_core::{Catalog, Config};

use crate::error::{CliError, Result};

pub fn run(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::from_file(path).map_err(|e| CliError::config(path, e))?,
        None => Config::default(),
    };
    let catalog = Catalog::from_config(&config);

    if json {
        let output = serde_json::to_string_pretty(&catalog)
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", output);
        return Ok(());
    }

    print_section("Image links", &catalog.image_links);
    print_section("Parameter defaults", &catalog.parameter_defaults);
    print_section("Families", &catalog.families);

    Ok(())
}

fn print_section(title: &str, entries: &IndexMap<String, String>) {
    println!("{} ({})", style(title).bold(), entries.len());
    for (key, value) in entries {
        println!("  {} {} {}", style(key).cyan(), style("→").dim(), value);
    }
    println!();
}
