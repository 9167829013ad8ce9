//! Identifier allocation for newly merged tools.

use crate::catalog::model::Catalog;

/// Next globally unique tool id: one past the highest id present anywhere in
/// the catalog, or past `floor` when the caller seeds a higher baseline.
///
/// The maximum is always derived from the live catalog, never from a cached
/// constant, so ids appended earlier in a batch raise the baseline for later
/// candidates. Both id forms count; comparison is by numeric value.
pub fn next_tool_id(catalog: &Catalog, floor: Option<u64>) -> u64 {
    let observed = catalog
        .tools()
        .filter_map(|tool| tool.id.map(|id| id.value()))
        .max()
        .unwrap_or(0);
    observed.max(floor.unwrap_or(0)) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::identity::ToolId;
    use serde_json::json;

    fn catalog_with_ids(ids: &[serde_json::Value]) -> Catalog {
        let tools: Vec<_> = ids
            .iter()
            .enumerate()
            .map(|(index, id)| {
                json!({
                    "id": id,
                    "name": format!("Tool {index}"),
                    "url": "https://example.com",
                    "description": "fixture",
                    "pricing": "Free"
                })
            })
            .collect();
        serde_json::from_value(json!({
            "categories": [{
                "id": "cat",
                "name": "Category",
                "subcategories": [{ "id": "sub", "name": "Subcategory", "tools": tools }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn empty_catalog_starts_at_one() {
        let catalog = catalog_with_ids(&[]);
        assert_eq!(next_tool_id(&catalog, None), 1);
        assert_eq!(next_tool_id(&catalog, Some(308)), 309);
    }

    #[test]
    fn maximum_spans_both_id_forms() {
        let catalog = catalog_with_ids(&[json!("tool-12"), json!(40)]);
        assert_eq!(next_tool_id(&catalog, None), 41);
    }

    #[test]
    fn floor_only_raises_the_baseline() {
        let catalog = catalog_with_ids(&[json!(350)]);
        assert_eq!(next_tool_id(&catalog, Some(308)), 351);
    }

    #[test]
    fn allocation_advances_by_one_after_append() {
        let mut catalog = catalog_with_ids(&[json!(10)]);
        let next = next_tool_id(&catalog, None);
        assert_eq!(next, 11);
        let mut tool = catalog.categories[0].subcategories[0].tools[0].clone();
        tool.id = Some(ToolId::new(next));
        tool.name = "Appended".to_string();
        catalog.categories[0].subcategories[0].push_tool(tool);
        assert_eq!(next_tool_id(&catalog, None), 12);
    }
}
