//! Validate a catalog document against the shipped schema and typed model.
//!
//! Usage:
//!   shelf-validate --file client/public/mindmap_data.json
//!   shelf-validate < document.json

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;
use toolshelf::decode_catalog;

#[derive(Parser, Debug)]
#[command(name = "shelf-validate")]
#[command(about = "Validate a catalog document")]
struct Cli {
    /// Optional input file; reads stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
}

fn read_input(file: Option<PathBuf>) -> Result<(Value, String)> {
    let mut buf = String::new();
    let origin = if let Some(path) = file {
        File::open(&path)
            .with_context(|| format!("opening input file {}", path.display()))?
            .read_to_string(&mut buf)
            .with_context(|| format!("reading input file {}", path.display()))?;
        path.display().to_string()
    } else {
        stdin()
            .read_to_string(&mut buf)
            .context("reading stdin for input JSON")?;
        "<stdin>".to_string()
    };
    let value: Value = serde_json::from_str(&buf).context("parsing input JSON")?;
    Ok((value, origin))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (value, origin) = read_input(cli.file)?;
    let catalog = decode_catalog(value, &origin)?;
    let stats = catalog.computed_stats();
    println!(
        "{origin}: ok ({} categories, {} tools, {} gems)",
        stats.total_categories, stats.total_tools, stats.hidden_gems
    );
    Ok(())
}
