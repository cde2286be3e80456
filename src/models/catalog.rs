//! Catalog categories and listing pages.

use std::fmt;

use serde::Deserialize;

/// A listing category exposed by the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    People,
    Films,
    Starships,
    Vehicles,
    Species,
    Planets,
}

impl Category {
    /// Every category in the order the catalog lists them.
    pub const ALL: [Category; 6] = [
        Category::People,
        Category::Films,
        Category::Starships,
        Category::Vehicles,
        Category::Species,
        Category::Planets,
    ];

    /// Path segment appended to the API base URL.
    pub fn segment(&self) -> &'static str {
        match self {
            Category::People => "people",
            Category::Films => "films",
            Category::Starships => "starships",
            Category::Vehicles => "vehicles",
            Category::Species => "species",
            Category::Planets => "planets",
        }
    }

    /// First page URL for this category under `base_url`.
    pub fn root_url(&self, base_url: &str) -> String {
        format!("{}/{}/", base_url.trim_end_matches('/'), self.segment())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// One page of a paginated listing.
///
/// Items are kept as raw JSON so a single malformed entry does not sink the
/// whole page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub count: Option<u64>,

    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

impl CatalogPage {
    /// Next page link, ignoring blank strings.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref().filter(|n| !n.trim().is_empty())
    }
}
