//! tmpldoc CLI - AsciiDoc documentation for OpenShift application templates

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod exit_codes;

#[derive(Parser)]
#[command(name = "tmpldoc")]
#[command(author = "tmpldoc Contributors")]
#[command(version)]
#[command(about = "Generate AsciiDoc documentation for OpenShift application templates", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Document every template of a repository and write the README index
    Generate {
        /// Repository root (one directory per product family)
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output directory (default: `outputDir` from tmpldoc.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (default: ROOT/tmpldoc.yaml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report what would be written without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Extract the documentation tables of a single template
    Extract {
        /// Template JSON file
        file: PathBuf,

        /// Family directory name (default: the file's parent directory)
        #[arg(short, long)]
        dir: Option<String>,

        /// Configuration file providing extra catalog entries
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write only the README index of a repository
    Readme {
        /// Repository root
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output directory (default: `outputDir` from tmpldoc.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (default: ROOT/tmpldoc.yaml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the effective image links, parameter defaults and family names
    Catalog {
        /// Configuration file providing extra catalog entries
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(debug: bool) {
    let default = if debug { "tmpldoc=debug" } else { "tmpldoc=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Generate {
            root,
            output,
            config,
            dry_run,
        } => commands::generate::run(&root, output.as_deref(), config.as_deref(), dry_run),

        Commands::Extract {
            file,
            dir,
            config,
            json,
        } => commands::extract::run(&file, dir.as_deref(), config.as_deref(), json),

        Commands::Readme {
            root,
            output,
            config,
        } => commands::readme::run(&root, output.as_deref(), config.as_deref()),

        Commands::Catalog { config, json } => commands::catalog::run(config.as_deref(), json),
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
