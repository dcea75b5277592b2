mod classifier;
mod commands;
mod config;
mod corpus;
mod diagnostics;
mod error;
mod resolver;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Level;

/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "adoc-xref",
    version,
    about = "Turn published documentation links into AsciiDoc xrefs",
    long_about = None
)]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Log resolution steps (-v) or every file skipped (-vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the shape and captured fields of a link
    Classify {
        /// Published documentation link
        link: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List documents declaring an anchor id
    Find {
        /// Anchor id to search for
        anchor: String,
        /// Corpus root (defaults to the config file's `root`, then `.`)
        #[arg(long)]
        root: Option<PathBuf>,
        /// List every declaring document, not just the first
        #[arg(long)]
        all: bool,
    },
    /// Convert a link into an xref (prompts when no link is given)
    Resolve {
        /// Published documentation link
        link: Option<String>,
        /// Corpus root (defaults to the config file's `root`, then `.`)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Use the target document's title as the link text
        #[arg(long)]
        label: bool,
        /// Output the full resolution as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the title of a document
    Title {
        /// Document to read
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match &cli.command {
        Commands::Classify { link, json } => commands::classify(link, *json),
        Commands::Find { anchor, root, all } => commands::find(anchor, root.as_deref(), *all),
        Commands::Resolve { link, root, label, json } => {
            commands::resolve(link.as_deref(), root.as_deref(), *label, *json)
        },
        Commands::Title { file } => commands::title(file),
    };

    return match result {
        Ok(()) => ExitCode::SUCCESS,
        // Exit code: unresolved link (1), anything else (2).
        Err(e) => {
            diagnostics::print_error(&e);
            if e.is_unresolved_link() { ExitCode::from(1) } else { ExitCode::from(2) }
        },
    };
}

/// Install the stderr log subscriber. Stdout is reserved for command output.
fn init_logging(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, _) => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
