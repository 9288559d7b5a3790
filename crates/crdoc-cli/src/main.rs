//! crdoc CLI - Reference documentation for Kubernetes API groups

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod exit_codes;

use commands::generate::GenerateOptions;

#[derive(Parser)]
#[command(name = "crdoc")]
#[command(author = "crdoc Contributors")]
#[command(version)]
#[command(about = "Reference documentation generator for Kubernetes API groups", long_about = None)]
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
    /// Render documentation for a Go API package
    Generate {
        /// Directory of the API version package (e.g. api/v1)
        dir: PathBuf,

        /// Template file (default: built-in Markdown template)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output file (if not set, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render undefined template variables as empty instead of failing
        #[arg(long)]
        lenient: bool,

        /// Position of the first placeholder word in example values
        #[arg(long, default_value_t = 0)]
        word_offset: usize,
    },

    /// Print the documentation model handed to templates
    Model {
        /// Directory of the API version package (e.g. api/v1)
        dir: PathBuf,

        /// Output as JSON instead of YAML
        #[arg(long)]
        json: bool,

        /// Position of the first placeholder word in example values
        #[arg(long, default_value_t = 0)]
        word_offset: usize,
    },
}

/// Log to stderr, filtered by `CRDOC_LOG` (default `warn`)
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("CRDOC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .init();
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_logging(cli.debug);

    let result = match cli.command {
        Commands::Generate {
            dir,
            template,
            output,
            lenient,
            word_offset,
        } => commands::generate::run(&GenerateOptions {
            dir: &dir,
            template: template.as_deref(),
            output: output.as_deref(),
            strict: !lenient,
            word_offset,
        }),

        Commands::Model {
            dir,
            json,
            word_offset,
        } => commands::model::run(&dir, json, word_offset),
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
