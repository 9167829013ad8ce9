//! In-memory representation of the tool catalog document.
//!
//! The types mirror the persisted JSON shape (categories → subcategories →
//! tools) so the merge engine and tests can reason about the directory
//! without ad-hoc JSON handling. Category and subcategory lookups are exact
//! name matches; tool-name comparisons are case-insensitive because that is
//! the dedup key for merges. All mutation goes through the owning
//! `Subcategory` so a tool value is attached to exactly one place.

use crate::catalog::identity::{CategoryId, Pricing, SubcategoryId, ToolId};
use serde::{Deserialize, Serialize};

/// Full catalog document as stored on disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<CatalogStats>,
}

/// Derived counters some documents carry alongside the tree.
///
/// The counters are denormalized display data; `Catalog::refresh_stats`
/// recomputes them after every mutation so they cannot drift from the tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    #[serde(rename = "totalTools")]
    pub total_tools: u64,
    #[serde(rename = "totalCategories")]
    pub total_categories: u64,
    #[serde(rename = "hiddenGems")]
    pub hidden_gems: u64,
}

/// Top-level grouping with presentation hints used by the front end.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

/// Second-level grouping owning an ordered list of tools.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    #[serde(default)]
    pub tools: Vec<Tool>,
}

/// One cataloged tool listing.
///
/// Ids may be absent on listings installed through a wholesale restructure.
/// The boolean flags come in two dialects (`featured`/`gem` and
/// `isGem`/`isNew`) because different document generations wrote different
/// keys; both are kept verbatim and unified through the accessors below.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ToolId>,
    pub name: String,
    pub url: String,
    pub description: String,
    pub pricing: Pricing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gem: Option<bool>,
    #[serde(rename = "isGem", default, skip_serializing_if = "Option::is_none")]
    pub is_gem: Option<bool>,
    #[serde(rename = "isNew", default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
}

impl Catalog {
    /// Look up a category by display name (exact match).
    pub fn find_category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Look up a category by slug id.
    pub fn find_category_by_id(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id.0 == id)
    }

    /// Resolve a (category name, subcategory name) pair, if present.
    pub fn find_subcategory(&self, category: &str, subcategory: &str) -> Option<&Subcategory> {
        self.find_category(category)?.find_subcategory(subcategory)
    }

    /// Iterate every tool in stored order: categories, then subcategories,
    /// then tools.
    pub fn tools(&self) -> impl Iterator<Item = &Tool> {
        self.categories
            .iter()
            .flat_map(|category| category.subcategories.iter())
            .flat_map(|subcategory| subcategory.tools.iter())
    }

    /// Counters derived from the current tree.
    pub fn computed_stats(&self) -> CatalogStats {
        CatalogStats {
            total_tools: self.tools().count() as u64,
            total_categories: self.categories.len() as u64,
            hidden_gems: self.tools().filter(|tool| tool.is_hidden_gem()).count() as u64,
        }
    }

    /// Recompute the `stats` block when the document carries one.
    ///
    /// Documents without a stats block never gain one.
    pub fn refresh_stats(&mut self) {
        if self.stats.is_some() {
            self.stats = Some(self.computed_stats());
        }
    }
}

impl Category {
    /// Look up a subcategory by display name (exact match).
    pub fn find_subcategory(&self, name: &str) -> Option<&Subcategory> {
        self.subcategories
            .iter()
            .find(|subcategory| subcategory.name == name)
    }
}

impl Subcategory {
    /// Case-insensitive tool lookup; this is the merge dedup key.
    pub fn find_tool(&self, name: &str) -> Option<&Tool> {
        let needle = name.to_lowercase();
        self.tools
            .iter()
            .find(|tool| tool.name.to_lowercase() == needle)
    }

    pub fn contains_tool_named(&self, name: &str) -> bool {
        self.find_tool(name).is_some()
    }

    /// Append a tool, leaving the existing order untouched.
    pub fn push_tool(&mut self, tool: Tool) {
        self.tools.push(tool);
    }

    /// Swap in a new tool list wholesale, dropping the current one.
    pub fn replace_tools(&mut self, tools: Vec<Tool>) {
        self.tools = tools;
    }
}

impl Tool {
    /// Notable-pick flag, whichever dialect the entry was written in.
    pub fn is_hidden_gem(&self) -> bool {
        self.is_gem.or(self.gem).unwrap_or(false)
    }

    pub fn is_new_listing(&self) -> bool {
        self.is_new.unwrap_or(false)
    }

    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Catalog {
        serde_json::from_value(json!({
            "name": "AI LIBRARY",
            "categories": [
                {
                    "id": "audio",
                    "name": "Audio & Music",
                    "icon": "Music",
                    "subcategories": [
                        {
                            "id": "voice",
                            "name": "Voice & Speech",
                            "tools": [
                                {
                                    "id": 10,
                                    "name": "Murf",
                                    "url": "https://murf.ai",
                                    "description": "AI voice generator",
                                    "pricing": "Free / Paid",
                                    "isGem": false
                                },
                                {
                                    "id": "tool-11",
                                    "name": "Typecast",
                                    "url": "https://typecast.ai",
                                    "description": "AI voice actors",
                                    "pricing": "Freemium",
                                    "gem": true
                                }
                            ]
                        }
                    ]
                },
                {
                    "id": "video",
                    "name": "Video & Animation",
                    "subcategories": [
                        { "id": "video-gen", "name": "Video Generation" }
                    ]
                }
            ],
            "stats": { "totalTools": 0, "totalCategories": 0, "hiddenGems": 0 }
        }))
        .unwrap()
    }

    #[test]
    fn lookups_are_exact_for_structure() {
        let catalog = sample();
        assert!(catalog.find_category("Audio & Music").is_some());
        assert!(catalog.find_category("audio & music").is_none());
        assert!(catalog.find_category_by_id("video").is_some());
        assert!(
            catalog
                .find_subcategory("Audio & Music", "Voice & Speech")
                .is_some()
        );
        assert!(catalog.find_subcategory("Audio & Music", "voice").is_none());
    }

    #[test]
    fn tool_lookup_is_case_insensitive() {
        let catalog = sample();
        let voice = catalog
            .find_subcategory("Audio & Music", "Voice & Speech")
            .unwrap();
        assert!(voice.contains_tool_named("MURF"));
        assert!(voice.contains_tool_named("murf"));
        assert!(!voice.contains_tool_named("Resemble"));
    }

    #[test]
    fn tools_iterates_in_stored_order() {
        let catalog = sample();
        let names: Vec<&str> = catalog.tools().map(|tool| tool.name.as_str()).collect();
        assert_eq!(names, ["Murf", "Typecast"]);
        // Restartable: a second pass sees the same sequence.
        assert_eq!(catalog.tools().count(), 2);
    }

    #[test]
    fn gem_accessor_unifies_both_dialects() {
        let catalog = sample();
        let voice = catalog
            .find_subcategory("Audio & Music", "Voice & Speech")
            .unwrap();
        assert!(!voice.tools[0].is_hidden_gem());
        assert!(voice.tools[1].is_hidden_gem());
    }

    #[test]
    fn replace_tools_discards_the_previous_list() {
        let mut catalog = sample();
        let replacement = vec![catalog.tools().next().unwrap().clone()];
        let voice = &mut catalog.categories[0].subcategories[0];
        voice.replace_tools(replacement);
        assert_eq!(voice.tools.len(), 1);
        assert_eq!(voice.tools[0].name, "Murf");
    }

    #[test]
    fn refresh_stats_recounts_the_tree() {
        let mut catalog = sample();
        catalog.refresh_stats();
        assert_eq!(
            catalog.stats,
            Some(CatalogStats {
                total_tools: 2,
                total_categories: 2,
                hidden_gems: 1,
            })
        );

        catalog.stats = None;
        catalog.refresh_stats();
        assert_eq!(catalog.stats, None);
    }
}
