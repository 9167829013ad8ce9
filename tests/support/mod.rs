// Shared fixtures for the integration suite.

use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use toolshelf::{Catalog, Pricing, ToolCandidate, decode_catalog};

/// Minimal two-category document: Audio & Music holding one voice tool
/// (Murf, id 10) and an empty Video Generation subcategory, plus a stats
/// block so refresh behavior is observable end to end.
pub fn fixture_value() -> Value {
    json!({
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
                                "description": "AI voice generator with 120+ voices",
                                "pricing": "Free / Paid",
                                "isGem": false
                            }
                        ]
                    }
                ]
            },
            {
                "id": "video",
                "name": "Video & Animation",
                "subcategories": [
                    { "id": "video-gen", "name": "Video Generation", "tools": [] }
                ]
            }
        ],
        "stats": { "totalTools": 1, "totalCategories": 2, "hiddenGems": 0 }
    })
}

pub fn fixture_catalog() -> Catalog {
    decode_catalog(fixture_value(), "fixture").expect("fixture document decodes")
}

pub fn write_document(dir: &Path, value: &Value) -> PathBuf {
    let path = dir.join("mindmap_data.json");
    let raw = serde_json::to_string_pretty(value).expect("fixture serializes");
    fs::write(&path, raw).expect("fixture document write");
    path
}

pub fn candidate(category: &str, subcategory: &str, name: &str) -> ToolCandidate {
    ToolCandidate {
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        name: name.to_string(),
        url: format!(
            "https://example.com/{}",
            name.to_lowercase().replace(' ', "-")
        ),
        description: format!("{name} fixture listing"),
        pricing: Pricing::Freemium,
        gem: false,
        new: false,
        featured: false,
    }
}
