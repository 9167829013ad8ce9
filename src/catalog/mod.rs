//! Tool catalog wiring.
//!
//! This module wraps the directory document (categories → subcategories →
//! tools) behind typed components: `model` for the tree and its lookups,
//! `alloc` for id allocation, `resolve` for path targeting, `merge` for the
//! batch upsert and restructure operations, and `store` for validated,
//! atomic persistence.

pub mod alloc;
pub mod identity;
pub mod merge;
pub mod model;
pub mod resolve;
pub mod store;

pub use alloc::next_tool_id;
pub use identity::{CategoryId, Pricing, SubcategoryId, ToolId};
pub use merge::{
    MergeError, MergeOutcome, MergeRecord, MergeReport, ToolCandidate, merge_batch,
    replace_subcategories,
};
pub use model::{Catalog, CatalogStats, Category, Subcategory, Tool};
pub use resolve::{PathNotFound, resolve_path, resolve_path_mut};
pub use store::{StoreError, decode_catalog, load_catalog, save_catalog};
