//! Upsert, dedup, and restructure operations over the catalog.
//!
//! `merge_batch` folds a batch of candidate tools into the tree with
//! insert-if-absent semantics: an existing listing is never overwritten, even
//! when the candidate's other fields differ, so re-running a batch is always
//! safe. Candidates that name a missing path are recorded as skips; only the
//! store layer produces fatal errors. `replace_subcategories` is the
//! wholesale-restructure entry point and validates the replacement before
//! touching the catalog.

use crate::catalog::alloc::next_tool_id;
use crate::catalog::identity::{Pricing, ToolId};
use crate::catalog::model::{Catalog, Subcategory, Tool};
use crate::catalog::resolve::{self, PathNotFound};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// A proposed tool listing, addressed by category and subcategory name.
///
/// Candidates never carry an id; the engine is the only component that
/// assigns identifiers.
#[derive(Clone, Debug, Deserialize)]
pub struct ToolCandidate {
    pub category: String,
    pub subcategory: String,
    pub name: String,
    pub url: String,
    pub description: String,
    pub pricing: Pricing,
    #[serde(rename = "isGem", alias = "gem", default)]
    pub gem: bool,
    #[serde(rename = "isNew", default)]
    pub new: bool,
    #[serde(default)]
    pub featured: bool,
}

impl ToolCandidate {
    /// Materialize the candidate as a stored listing.
    ///
    /// New listings are written in the `isGem` dialect; `isNew` and
    /// `featured` appear only when set, matching how merged entries have
    /// always been written.
    fn to_tool(&self, id: ToolId) -> Tool {
        Tool {
            id: Some(id),
            name: self.name.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
            pricing: self.pricing.clone(),
            featured: self.featured.then_some(true),
            gem: None,
            is_gem: Some(self.gem),
            is_new: self.new.then_some(true),
        }
    }
}

/// Per-candidate merge result.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum MergeOutcome {
    Added { id: ToolId },
    Duplicate,
    PathNotFound,
}

impl MergeOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            MergeOutcome::Added { .. } => "added",
            MergeOutcome::Duplicate => "duplicate",
            MergeOutcome::PathNotFound => "path-not-found",
        }
    }
}

/// One candidate's identity plus its outcome, in batch order.
#[derive(Clone, Debug, Serialize)]
pub struct MergeRecord {
    pub name: String,
    pub category: String,
    pub subcategory: String,
    #[serde(flatten)]
    pub outcome: MergeOutcome,
}

/// Outcome of a whole batch, one record per candidate in input order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MergeReport {
    pub records: Vec<MergeRecord>,
}

impl MergeReport {
    pub fn added(&self) -> usize {
        self.count(|outcome| matches!(outcome, MergeOutcome::Added { .. }))
    }

    pub fn duplicates(&self) -> usize {
        self.count(|outcome| matches!(outcome, MergeOutcome::Duplicate))
    }

    pub fn path_not_found(&self) -> usize {
        self.count(|outcome| matches!(outcome, MergeOutcome::PathNotFound))
    }

    /// True when the batch changed nothing.
    pub fn is_noop(&self) -> bool {
        self.added() == 0
    }

    fn count(&self, matches: impl Fn(&MergeOutcome) -> bool) -> usize {
        self.records
            .iter()
            .filter(|record| matches(&record.outcome))
            .count()
    }
}

/// Restructure rejected before any mutation.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    Path(#[from] PathNotFound),
    #[error("tool id {id} is already used elsewhere in the catalog")]
    IdCollision { id: ToolId },
    #[error("replacement lists subcategory '{name}' more than once")]
    DuplicateSubcategory { name: String },
    #[error("replacement subcategory '{subcategory}' lists tool '{name}' more than once")]
    DuplicateTool { subcategory: String, name: String },
}

/// Fold a batch of candidates into the catalog, in input order.
///
/// Each candidate resolves its target path, is deduped case-insensitively
/// against the target's existing tools, and on a miss gets a freshly
/// allocated id and is appended. `floor` seeds a minimum id baseline for
/// callers that need forward progress past a possibly stale maximum.
pub fn merge_batch(
    catalog: &mut Catalog,
    candidates: &[ToolCandidate],
    floor: Option<u64>,
) -> MergeReport {
    let mut records = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let outcome = apply(catalog, candidate, floor);
        records.push(MergeRecord {
            name: candidate.name.clone(),
            category: candidate.category.clone(),
            subcategory: candidate.subcategory.clone(),
            outcome,
        });
    }
    catalog.refresh_stats();
    MergeReport { records }
}

fn apply(catalog: &mut Catalog, candidate: &ToolCandidate, floor: Option<u64>) -> MergeOutcome {
    let Ok((category_index, subcategory_index)) =
        resolve::locate(catalog, &candidate.category, &candidate.subcategory)
    else {
        return MergeOutcome::PathNotFound;
    };
    if catalog.categories[category_index].subcategories[subcategory_index]
        .contains_tool_named(&candidate.name)
    {
        return MergeOutcome::Duplicate;
    }
    // Rescanning here sees ids appended earlier in this batch, keeping
    // allocation gap-free across the whole run.
    let id = ToolId::new(next_tool_id(catalog, floor));
    catalog.categories[category_index].subcategories[subcategory_index]
        .push_tool(candidate.to_tool(id));
    MergeOutcome::Added { id }
}

/// Replace the named category's subcategory list wholesale.
///
/// The replacement may carry pre-assigned tool ids; they must not collide
/// with any id elsewhere in the catalog or within the replacement itself,
/// and replacement names must stay unique (subcategory names exactly, tool
/// names case-insensitively per subcategory). Any violation rejects the
/// whole replacement and leaves the catalog untouched.
pub fn replace_subcategories(
    catalog: &mut Catalog,
    category: &str,
    replacement: Vec<Subcategory>,
) -> Result<(), MergeError> {
    let position = catalog
        .categories
        .iter()
        .position(|candidate| candidate.name == category)
        .ok_or_else(|| PathNotFound::Category(category.to_string()))?;
    validate_replacement(catalog, position, &replacement)?;
    catalog.categories[position].subcategories = replacement;
    catalog.refresh_stats();
    Ok(())
}

fn validate_replacement(
    catalog: &Catalog,
    position: usize,
    replacement: &[Subcategory],
) -> Result<(), MergeError> {
    let mut ids: BTreeSet<u64> = catalog
        .categories
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != position)
        .flat_map(|(_, category)| category.subcategories.iter())
        .flat_map(|subcategory| subcategory.tools.iter())
        .filter_map(|tool| tool.id.map(|id| id.value()))
        .collect();

    let mut names = BTreeSet::new();
    for subcategory in replacement {
        if !names.insert(subcategory.name.clone()) {
            return Err(MergeError::DuplicateSubcategory {
                name: subcategory.name.clone(),
            });
        }
        let mut tool_names = BTreeSet::new();
        for tool in &subcategory.tools {
            if !tool_names.insert(tool.name.to_lowercase()) {
                return Err(MergeError::DuplicateTool {
                    subcategory: subcategory.name.clone(),
                    name: tool.name.clone(),
                });
            }
            if let Some(id) = tool.id {
                if !ids.insert(id.value()) {
                    return Err(MergeError::IdCollision { id });
                }
            }
        }
    }
    Ok(())
}
