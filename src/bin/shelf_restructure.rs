//! Replace a category's subcategory list wholesale.
//!
//! Usage:
//!   shelf-restructure --catalog data.json --category "Audio & Music" --subcategories music.json
//!   shelf-restructure --catalog data.json --category-id audio < music.json
//!
//! The replacement is validated before installation: pre-assigned tool ids
//! must not collide with the rest of the catalog, and replacement names must
//! stay unique. A rejected replacement leaves the document untouched.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::fs;
use std::io::{Read, stdin};
use std::path::PathBuf;
use toolshelf::{Subcategory, load_catalog, replace_subcategories, save_catalog};

#[derive(Parser, Debug)]
#[command(name = "shelf-restructure")]
#[command(about = "Replace a category's subcategories with a new list")]
struct Cli {
    /// Catalog document to update.
    #[arg(long)]
    catalog: PathBuf,
    /// Target category display name.
    #[arg(long, conflicts_with = "category_id")]
    category: Option<String>,
    /// Target category slug id (e.g. `audio`).
    #[arg(long)]
    category_id: Option<String>,
    /// Replacement subcategory list (JSON array); reads stdin when omitted.
    #[arg(long)]
    subcategories: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut catalog = load_catalog(&cli.catalog)?;

    let target = match (&cli.category, &cli.category_id) {
        (Some(name), None) => name.clone(),
        (None, Some(id)) => catalog
            .find_category_by_id(id)
            .map(|category| category.name.clone())
            .ok_or_else(|| anyhow!("no category with id '{id}'"))?,
        _ => bail!("exactly one of --category or --category-id is required"),
    };

    let input = match &cli.subcategories {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading subcategory file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            stdin()
                .read_to_string(&mut buf)
                .context("reading replacement subcategories from stdin")?;
            buf
        }
    };
    let replacement: Vec<Subcategory> =
        serde_json::from_str(&input).context("parsing replacement subcategory list")?;

    let subcategory_count = replacement.len();
    let tool_count: usize = replacement.iter().map(|sub| sub.tools.len()).sum();

    replace_subcategories(&mut catalog, &target, replacement)?;
    save_catalog(&cli.catalog, &catalog)?;

    println!("installed {subcategory_count} subcategories ({tool_count} tools) under {target}");
    Ok(())
}
