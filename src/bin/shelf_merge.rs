//! Merge a batch of candidate tools into the catalog document.
//!
//! Usage:
//!   shelf-merge --catalog client/public/mindmap_data.json --batch new_tools.json
//!   shelf-merge --catalog data.json --floor 308 < candidates.ndjson
//!
//! One outcome line is printed per candidate; duplicates and unknown paths
//! are skips, not failures, so re-running a batch is always safe. The
//! document is rewritten only after the whole batch has been processed.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::fs;
use std::io::{Read, stdin};
use std::path::PathBuf;
use toolshelf::{MergeOutcome, load_catalog, merge_batch, parse_candidate_stream, save_catalog};

#[derive(Parser, Debug)]
#[command(name = "shelf-merge")]
#[command(about = "Merge candidate tools into the catalog document")]
struct Cli {
    /// Catalog document to update.
    #[arg(long)]
    catalog: PathBuf,
    /// Candidate batch (JSON array, single object, or NDJSON); reads stdin
    /// when omitted.
    #[arg(long)]
    batch: Option<PathBuf>,
    /// Minimum id baseline; allocation always lands above this value.
    #[arg(long)]
    floor: Option<u64>,
    /// Print the merge report as JSON instead of per-line text.
    #[arg(long)]
    json: bool,
    /// Report what would change without rewriting the document.
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let input = match &cli.batch {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading batch file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            stdin()
                .read_to_string(&mut buf)
                .context("reading candidates from stdin")?;
            buf
        }
    };
    let candidates = parse_candidate_stream(&input)?;

    let mut catalog = load_catalog(&cli.catalog)?;
    let report = merge_batch(&mut catalog, &candidates, cli.floor);

    if cli.json {
        let output = json!({
            "records": report.records,
            "summary": {
                "added": report.added(),
                "duplicate": report.duplicates(),
                "path-not-found": report.path_not_found(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for record in &report.records {
            match &record.outcome {
                MergeOutcome::Added { id } => println!(
                    "added: {} -> {} / {} (id {})",
                    record.name, record.category, record.subcategory, id
                ),
                MergeOutcome::Duplicate => println!(
                    "skipped duplicate: {} -> {} / {}",
                    record.name, record.category, record.subcategory
                ),
                MergeOutcome::PathNotFound => println!(
                    "skipped path-not-found: {} / {}",
                    record.category, record.subcategory
                ),
            }
        }
        println!(
            "{} added, {} duplicate, {} path-not-found",
            report.added(),
            report.duplicates(),
            report.path_not_found()
        );
    }

    if !cli.dry_run {
        save_catalog(&cli.catalog, &catalog)?;
    }
    Ok(())
}
