//! Catalog merge engine for a curated AI tool directory.
//!
//! The directory lives in a single JSON document (categories →
//! subcategories → tool listings) that used to be updated by ad hoc one-shot
//! scripts. This crate is the shared logic behind those updates: load the
//! document, fold a batch of candidate tools into it without violating
//! identity, uniqueness, or ordering invariants, and write the result back
//! deterministically. Public functions here form the contract the helper
//! binaries depend on: candidate stream parsing plus the model, allocator,
//! resolver, merge engine, and store re-exported from `catalog`.

use anyhow::{Context, Result, bail};
use serde_json::Value;

pub mod catalog;

pub use catalog::{
    Catalog, CatalogStats, Category, CategoryId, MergeError, MergeOutcome, MergeRecord,
    MergeReport, PathNotFound, Pricing, StoreError, Subcategory, SubcategoryId, Tool,
    ToolCandidate, ToolId, decode_catalog, load_catalog, merge_batch, next_tool_id,
    replace_subcategories, resolve_path, resolve_path_mut, save_catalog,
};

/// Parse a candidate batch, accepting a JSON array, a single object, or
/// NDJSON.
///
/// The parser mirrors the batch-file contract: empty input is an error,
/// single candidates and arrays are accepted, and NDJSON streams are parsed
/// line-by-line so a malformed line is reported with its position.
pub fn parse_candidate_stream(input: &str) -> Result<Vec<ToolCandidate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("No candidates provided");
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<_>, _>>()
                .context("Unable to parse JSON array of candidates"),
            Value::Object(_) => serde_json::from_value(value)
                .map(|candidate| vec![candidate])
                .context("Unable to parse candidate object"),
            _ => bail!("Unsupported JSON input; expected object or array"),
        };
    }

    let mut candidates = Vec::new();
    for (idx, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let candidate: ToolCandidate = serde_json::from_str(line)
            .with_context(|| format!("Unable to parse candidate from line {}", idx + 1))?;
        candidates.push(candidate);
    }

    if candidates.is_empty() {
        bail!("No candidates found in input stream");
    }

    Ok(candidates)
}
