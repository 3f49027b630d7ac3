//! Extract command - print the documentation tables of one template

use console::style;
use std::path::Path;
use tmpldoc_core::{Catalog, Config, Descriptor, SourceContext};
use tmpldoc_extract::{ExtractError, ExtractedTable, Extractor};

use crate::error::{CliError, Result};

pub fn run(file: &Path, dir: Option<&str>, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::from_file(path).map_err(|e| CliError::config(path, e))?,
        None => Config::default(),
    };
    let catalog = Catalog::from_config(&config);

    let mut source = SourceContext::for_file(file);
    if let Some(dir) = dir {
        source = source.with_family(dir);
    }

    let descriptor = Descriptor::from_file(file).map_err(ExtractError::from)?;
    let document = Extractor::new(&catalog).extract(&descriptor, &source)?;

    if json {
        let output = serde_json::to_string_pretty(&document)
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", output);
        return Ok(());
    }

    println!(
        "{} {} ({})",
        style("→").blue(),
        style(&document.template).bold(),
        source.family
    );
    if let Some(description) = &document.description {
        println!("  {}", style(description).dim());
    }

    if let Some(table) = &document.parameters {
        print_table(table);
    }
    for table in document.objects.iter().flatten() {
        print_table(table);
    }

    if !document.sections.is_empty() {
        let sections: Vec<&str> = document.sections.iter().map(|s| s.label()).collect();
        println!();
        println!("{} {}", style("sections:").bold(), sections.join(", "));
    }

    Ok(())
}

fn print_table(table: &ExtractedTable) {
    if table.is_empty() {
        return;
    }

    println!();
    println!("{}", style(table.category.key()).cyan().bold());
    println!("{}", table.render().trim_start_matches('\n'));
}
