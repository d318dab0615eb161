//! ENML CLI - note markup conversions.
//!
//! Provides commands for:
//! - `html`: Render a note to HTML
//! - `todos`: List the checklist items of a note
//! - `toggle`: Check or uncheck one checklist item
//! - `text`: Strip a note down to plain text
//! - `from-text`: Wrap plain text in a note
//! - `url`: Build the URL of a resource

mod commands;
mod error;
mod input;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{FromTextArgs, HtmlArgs, TextArgs, TodosArgs, ToggleArgs, UrlArgs};
use output::Output;

/// ENML - note markup toolkit.
#[derive(Parser)]
#[command(name = "enml", version, about)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a note to HTML.
    Html(HtmlArgs),
    /// List the checklist items of a note.
    Todos(TodosArgs),
    /// Check or uncheck a checklist item.
    Toggle(ToggleArgs),
    /// Convert a note to plain text.
    Text(TextArgs),
    /// Convert plain text to a note.
    FromText(FromTextArgs),
    /// Print the URL of a resource.
    Url(UrlArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Html(args) => args.execute(&output),
        Commands::Todos(args) => args.execute(&output),
        Commands::Toggle(args) => args.execute(&output),
        Commands::Text(args) => args.execute(&output),
        Commands::FromText(args) => args.execute(&output),
        Commands::Url(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
