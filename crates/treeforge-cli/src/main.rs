//! treeforge CLI - materialize directory trees from structure files
//!
//! Provides `treeforge check` and `treeforge apply`.

use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use treeforge_core::{load_structure, summarize, Materializer, NamePolicy};

#[derive(Parser)]
#[command(name = "treeforge")]
#[command(about = "treeforge - create directory trees from JSON/YAML structure files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a structure file and report the expected directory count
    Check {
        /// Structure file (.json, .yaml, or .yml)
        config: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create the directories a structure file describes
    Apply {
        /// Structure file (.json, .yaml, or .yml)
        config: PathBuf,

        /// Target directory to create the tree under
        target: PathBuf,

        /// Prefix to prepend to every directory name
        #[arg(short, long)]
        prefix: Option<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,

        /// Output the run summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config, json } => {
            if let Err(e) = run_check(&config, json) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Apply {
            config,
            target,
            prefix,
            force,
            json,
        } => {
            if let Err(e) = run_apply(&config, &target, prefix.as_deref(), force, json) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn run_check(config: &Path, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_structure(config)?;
    let count = tree.count_nodes();

    if as_json {
        let output = json!({
            "config": config.display().to_string(),
            "directories": count,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Structure file OK: {}", config.display());
        println!("Expected directories: {count}");
    }

    Ok(())
}

fn run_apply(
    config: &Path,
    target: &Path,
    prefix: Option<&str>,
    force: bool,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_structure(config)?;

    let policy = match prefix {
        Some(p) if !p.is_empty() => NamePolicy::prefixed(p),
        _ => NamePolicy::disabled(),
    };

    if !as_json {
        println!("Target: {}", target.display());
        println!("Expected directories: {}", tree.count_nodes());
        if policy.enabled {
            println!("Prefix: \"{}\" on every directory name", policy.prefix);
        }
    }

    if !force {
        print!("Create the tree under {}? [y/N] ", target.display());
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let log = Materializer::new().materialize(target, &tree, &policy);
    let summary = summarize(&log);

    if as_json {
        let mut output = serde_json::to_value(summary)?;
        output["target"] = json!(target.display().to_string());
        output["log"] = json!(log.iter().map(ToString::to_string).collect::<Vec<_>>());
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    for entry in &log {
        println!("{entry}");
    }

    println!("\n========== Run complete ==========");
    println!("Created: {} directories", summary.created);
    if !summary.is_clean() {
        println!("Skipped/failed: {} directories", summary.skipped_or_failed);
    }
    println!("==================================");

    Ok(())
}
