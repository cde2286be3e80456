//! Character records before and after reference resolution.

use serde::{Deserialize, Serialize};

/// Related resource kinds a character points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Films,
    Species,
    Starships,
    Vehicles,
    Homeworld,
}

impl ReferenceKind {
    /// JSON field holding the human-readable name of the referenced resource.
    pub fn display_field(&self) -> &'static str {
        match self {
            ReferenceKind::Films => "title",
            _ => "name",
        }
    }
}

/// A character as returned by the `people` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub birth_year: String,
    pub eye_color: String,
    pub gender: String,
    pub hair_color: String,
    pub height: String,
    pub mass: String,
    pub skin_color: String,

    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub homeworld: Option<String>,

    /// Self URL, e.g. `https://swapi.dev/api/people/1/`
    pub url: String,
}

impl CharacterRecord {
    /// Reference URLs of the given kind.
    pub fn references(&self, kind: ReferenceKind) -> Vec<&str> {
        let urls: &[String] = match kind {
            ReferenceKind::Films => &self.films,
            ReferenceKind::Species => &self.species,
            ReferenceKind::Starships => &self.starships,
            ReferenceKind::Vehicles => &self.vehicles,
            ReferenceKind::Homeworld => {
                return self
                    .homeworld
                    .as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .into_iter()
                    .collect();
            }
        };
        urls.iter().map(String::as_str).collect()
    }
}

/// Joined display names for each reference kind of one character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedReferences {
    pub films: String,
    pub species: String,
    pub starships: String,
    pub vehicles: String,
    pub homeworld: String,
}

/// Flat row ready for insertion into the `people` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCharacter {
    pub id: i32,
    pub birth_year: String,
    pub eye_color: String,
    pub films: String,
    pub gender: String,
    pub hair_color: String,
    pub height: String,
    pub homeworld: String,
    pub mass: String,
    pub name: String,
    pub skin_color: String,
    pub species: String,
    pub starships: String,
    pub vehicles: String,
}
