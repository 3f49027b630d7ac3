//! Generate command - document every template of a repository

use console::style;
use std::path::Path;
use tmpldoc_core::Catalog;
use tmpldoc_engine::EngineBuilder;
use tmpldoc_extract::{Batch, BatchIssue, IssueSeverity};
use tracing::debug;

use super::{load_config, output_dir, readme, write_file};
use crate::error::Result;

pub fn run(
    root: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let config = load_config(root, config_path)?;
    let catalog = Catalog::from_config(&config);
    let engine = EngineBuilder::from_config(&config, root)?.build()?;
    let out_dir = output_dir(&config, root, output);

    println!(
        "{} Documenting templates in {}",
        style("→").blue(),
        root.display()
    );

    let mut result = Batch::new(&config, &catalog)
        .exclude_output(&out_dir)
        .run(root)?;
    let action = if dry_run { "would write" } else { "wrote" };
    let mut written = 0;

    for family in &mut result.families {
        let mut failed = Vec::new();

        for document in &family.documents {
            let target = out_dir
                .join(&family.directory)
                .join(format!("{}.adoc", document.template));

            match engine.render_document(document) {
                Ok(page) => {
                    if !dry_run {
                        write_file(&target, &page)?;
                    }
                    debug!(file = %target.display(), "page written");
                    println!("  {} {}", style(action).green(), target.display());
                    written += 1;
                }
                Err(err) => {
                    debug!(template = %document.template, "rendering failed: {}", err);
                    failed.push(document.template.clone());
                    result
                        .issues
                        .push(BatchIssue::failed(document.source.path.clone(), err.to_string()));
                }
            }
        }

        // Only rendered pages are linked from the README
        family.documents.retain(|d| !failed.contains(&d.template));
    }

    for issue in &result.issues {
        print_issue(issue);
    }

    let readme_path = readme::write_readme(&engine, &result, &out_dir, dry_run)?;
    println!("  {} {}", style(action).green(), readme_path.display());

    let skipped = result.count(IssueSeverity::Skipped);
    let failed = result.count(IssueSeverity::Failed);
    let icon = if failed == 0 {
        style("✓").green()
    } else {
        style("⚠").yellow()
    };

    println!();
    println!(
        "{} {} written, {} skipped, {} failed",
        icon, written, skipped, failed
    );

    Ok(())
}

fn print_issue(issue: &BatchIssue) {
    let icon = match issue.severity {
        IssueSeverity::Skipped => style(issue.severity.icon()).yellow(),
        IssueSeverity::Failed => style(issue.severity.icon()).red(),
    };

    println!(
        "  {} {} {}: {}",
        icon,
        issue.severity.label(),
        issue.file.display(),
        issue.message
    );
    if let Some(help) = &issue.help {
        println!("      {} {}", style("→").blue(), help);
    }
}
