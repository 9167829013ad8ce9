//! Load/save adapter for the catalog document.
//!
//! Loading validates the raw JSON against the embedded document schema before
//! decoding, so malformed state is rejected ahead of any mutation. Saving is
//! deterministic (declaration key order, two-space indent, trailing newline)
//! and atomic: the document is written to a sibling temp file and renamed
//! into place. The engine never saves mid-batch; callers load once, mutate in
//! memory, and save once.

use crate::catalog::model::Catalog;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::NamedTempFile;
use thiserror::Error;

const CATALOG_SCHEMA_SRC: &str = include_str!("../../schema/catalog.schema.json");

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to read catalog document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("corrupt catalog document {origin}: {reason}")]
    Corrupt { origin: String, reason: String },
    #[error("unable to write catalog document {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn catalog_schema() -> &'static JSONSchema {
    static SCHEMA: OnceLock<JSONSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        // Leaked once per process; the compiled validator borrows the schema
        // document for its lifetime.
        let raw: &'static Value = Box::leak(Box::new(
            serde_json::from_str(CATALOG_SCHEMA_SRC).expect("embedded catalog schema is valid JSON"),
        ));
        JSONSchema::compile(raw).expect("embedded catalog schema compiles")
    })
}

/// Decode an already-parsed document, naming `origin` in any error.
///
/// Schema validation runs first so decode failures carry the schema's
/// diagnostics rather than serde's.
pub fn decode_catalog(value: Value, origin: &str) -> Result<Catalog, StoreError> {
    if let Err(errors) = catalog_schema().validate(&value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(StoreError::Corrupt {
            origin: origin.to_string(),
            reason: details,
        });
    }
    serde_json::from_value(value).map_err(|err| StoreError::Corrupt {
        origin: origin.to_string(),
        reason: err.to_string(),
    })
}

/// Read and validate the document at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let origin = path.display().to_string();
    let value: Value = serde_json::from_str(&raw).map_err(|err| StoreError::Corrupt {
        origin: origin.clone(),
        reason: err.to_string(),
    })?;
    decode_catalog(value, &origin)
}

/// Write the document atomically, replacing `path`.
///
/// The rename happens only after the full serialization succeeds, so a
/// failed save never leaves a partial document behind.
pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<(), StoreError> {
    let write_err = |source: io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut bytes =
        serde_json::to_vec_pretty(catalog).map_err(|err| write_err(io::Error::other(err)))?;
    bytes.push(b'\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&bytes).map_err(write_err)?;
    tmp.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_accepts_a_minimal_document() {
        let catalog = decode_catalog(json!({ "categories": [] }), "test").unwrap();
        assert!(catalog.categories.is_empty());
        assert!(catalog.stats.is_none());
    }

    #[test]
    fn decode_rejects_schema_violations() {
        let missing = decode_catalog(json!({}), "test").unwrap_err();
        assert!(matches!(missing, StoreError::Corrupt { .. }));

        let wrong_shape = decode_catalog(json!({ "categories": "nope" }), "test").unwrap_err();
        assert!(matches!(wrong_shape, StoreError::Corrupt { .. }));

        let bad_id = decode_catalog(
            json!({
                "categories": [{
                    "id": "audio",
                    "name": "Audio",
                    "subcategories": [{
                        "id": "voice",
                        "name": "Voice",
                        "tools": [{
                            "id": "gadget-7",
                            "name": "Murf",
                            "url": "https://murf.ai",
                            "description": "x",
                            "pricing": "Free"
                        }]
                    }]
                }]
            }),
            "test",
        )
        .unwrap_err();
        assert!(matches!(bad_id, StoreError::Corrupt { .. }));
    }

    #[test]
    fn load_reports_missing_files_as_read_errors() {
        let err = load_catalog(Path::new("/nonexistent/mindmap_data.json")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
