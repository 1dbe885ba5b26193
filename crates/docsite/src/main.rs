//! Docsite CLI - documentation build orchestrator.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

use commands::build::BuildOptions;

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Builds the HTML documentation from reStructuredText sources")]
#[command(after_help = "Run 'docsite' to build everything.\n\
                        Run 'docsite view' to build and then preview in a web browser.")]
#[command(version)]
pub struct Cli {
    /// Build targets; any combination performs a single build
    #[arg(value_enum)]
    targets: Vec<Target>,

    /// Path to docsite.toml config file
    #[arg(short, long, default_value = "docsite.toml")]
    config: PathBuf,

    /// Output directory (defaults to config or the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Target {
    /// Build the HTML site from the source tree
    Rst,

    /// Build, then open index.html in the default browser
    View,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = BuildOptions {
        base_dir: std::env::current_dir().context("Failed to resolve working directory")?,
        config_file: cli.config,
        output: cli.output,
        view: cli.targets.contains(&Target::View),
    };

    commands::build::run(&options)
}
