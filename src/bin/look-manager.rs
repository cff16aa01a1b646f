//! look-manager CLI - inspect and validate pending-assignment queue files
//!
//! ## Example Usage
//!
//! ```bash
//! # Show what a saved queue would assign
//! look-manager inspect shot010_queue.json
//!
//! # Check a queue file before handing it to another artist
//! look-manager validate shot010_queue.json
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use look_manager::error::Result;
use look_manager::queue::load_queue;
use std::path::{Path, PathBuf};
use std::process;

/// look-manager: inspect queued look assignments
#[derive(Parser)]
#[command(name = "look-manager")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and validate look-assignment queue files", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the pending assignments in a queue file
    Inspect {
        /// Path to a queue JSON file
        #[arg(value_name = "QUEUE_FILE")]
        file: PathBuf,
    },
    /// Check that a queue file parses and all ids are valid
    Validate {
        /// Path to a queue JSON file
        #[arg(value_name = "QUEUE_FILE")]
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match &cli.command {
        Commands::Inspect { file } => inspect(file),
        Commands::Validate { file } => validate(file),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn inspect(file: &Path) -> Result<()> {
    let items = load_queue(file)?;
    println!("{} queued item(s)", items.len().to_string().bold());
    for (index, item) in items.iter().enumerate() {
        println!(
            "{} {}  {} {}  ({} node(s))",
            format!("[{index}]").dimmed(),
            item.label.bold(),
            item.subset.cyan(),
            item.version_name.green(),
            item.nodes.len()
        );
        for node in &item.nodes {
            println!("      {}", node.dimmed());
        }
    }
    Ok(())
}

fn validate(file: &Path) -> Result<()> {
    let items = load_queue(file)?;
    println!(
        "{} {} item(s), all ids valid",
        "ok:".green().bold(),
        items.len()
    );
    Ok(())
}
