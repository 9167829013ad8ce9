//! Path resolution from (category name, subcategory name) to the target node.
//!
//! Resolution never creates structure: categories and subcategories are fixed
//! scaffolding established before any merge runs. A candidate that names a
//! missing path is skipped by the merge engine rather than failing the batch.

use crate::catalog::model::{Catalog, Subcategory};
use thiserror::Error;

/// A candidate named a category or subcategory that does not exist.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PathNotFound {
    #[error("no such category: {0}")]
    Category(String),
    #[error("no such subcategory: {category} / {subcategory}")]
    Subcategory {
        category: String,
        subcategory: String,
    },
}

/// Resolve a path to the subcategory it names.
pub fn resolve_path<'a>(
    catalog: &'a Catalog,
    category: &str,
    subcategory: &str,
) -> Result<&'a Subcategory, PathNotFound> {
    let (category_index, subcategory_index) = locate(catalog, category, subcategory)?;
    Ok(&catalog.categories[category_index].subcategories[subcategory_index])
}

/// Mutable variant of [`resolve_path`].
pub fn resolve_path_mut<'a>(
    catalog: &'a mut Catalog,
    category: &str,
    subcategory: &str,
) -> Result<&'a mut Subcategory, PathNotFound> {
    let (category_index, subcategory_index) = locate(catalog, category, subcategory)?;
    Ok(&mut catalog.categories[category_index].subcategories[subcategory_index])
}

/// Positional form used by the merge engine, which must release the borrow
/// before scanning the whole catalog for id allocation.
pub(crate) fn locate(
    catalog: &Catalog,
    category: &str,
    subcategory: &str,
) -> Result<(usize, usize), PathNotFound> {
    let category_index = catalog
        .categories
        .iter()
        .position(|candidate| candidate.name == category)
        .ok_or_else(|| PathNotFound::Category(category.to_string()))?;
    let subcategory_index = catalog.categories[category_index]
        .subcategories
        .iter()
        .position(|candidate| candidate.name == subcategory)
        .ok_or_else(|| PathNotFound::Subcategory {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
        })?;
    Ok((category_index, subcategory_index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Catalog {
        serde_json::from_value(json!({
            "categories": [{
                "id": "audio",
                "name": "Audio & Music",
                "subcategories": [{ "id": "voice", "name": "Voice & Speech" }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn resolves_existing_paths() {
        let catalog = catalog();
        let subcategory = resolve_path(&catalog, "Audio & Music", "Voice & Speech").unwrap();
        assert_eq!(subcategory.id.0, "voice");
    }

    #[test]
    fn reports_which_level_is_missing() {
        let catalog = catalog();
        assert_eq!(
            resolve_path(&catalog, "Video", "Voice & Speech").unwrap_err(),
            PathNotFound::Category("Video".to_string())
        );
        assert_eq!(
            resolve_path(&catalog, "Audio & Music", "Nonexistent").unwrap_err(),
            PathNotFound::Subcategory {
                category: "Audio & Music".to_string(),
                subcategory: "Nonexistent".to_string(),
            }
        );
    }

    #[test]
    fn never_creates_missing_structure() {
        let mut catalog = catalog();
        let _ = resolve_path_mut(&mut catalog, "Video", "Video Generation");
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].subcategories.len(), 1);
    }
}
