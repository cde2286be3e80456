// src/utils/url.rs

//! URL helpers for catalog resources.

use std::sync::OnceLock;

use regex::Regex;

fn people_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"people/(\d+)/").expect("valid people id pattern"))
}

/// Extract the numeric character identifier from a self URL.
///
/// The identifier is the path segment right after `people/`. Returns `None`
/// when the marker is missing, the segment is not numeric, or the value is not
/// a positive `i32`.
///
/// # Examples
/// ```
/// use catalog_loader::utils::url::extract_character_id;
///
/// assert_eq!(extract_character_id("https://swapi.dev/api/people/1/"), Some(1));
/// assert_eq!(extract_character_id("https://swapi.dev/api/planets/1/"), None);
/// ```
pub fn extract_character_id(url: &str) -> Option<i32> {
    let caps = people_id_pattern().captures(url)?;
    let id: i32 = caps.get(1)?.as_str().parse().ok()?;
    (id > 0).then_some(id)
}
