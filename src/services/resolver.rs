// src/services/resolver.rs

//! Reference resolver.
//!
//! Turns a character's related-resource URLs into comma-joined display names.

use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::error::{AppError, Result};
use crate::models::{CharacterRecord, ReferenceKind, ResolvedReferences};
use crate::services::ResourceFetcher;

/// Separator between names in a resolved reference string.
pub const NAME_SEPARATOR: &str = ", ";

/// Resolves reference URLs through a shared fetcher.
///
/// Every fetch made through one resolver holds a permit from a single
/// semaphore, so `max_concurrent` bounds in-flight requests across all lists
/// and all characters using it.
pub struct ReferenceResolver<'a> {
    fetcher: &'a dyn ResourceFetcher,
    permits: Semaphore,
    max_concurrent: usize,
}

impl<'a> ReferenceResolver<'a> {
    /// Create a resolver that keeps at most `max_concurrent` fetches in flight.
    pub fn new(fetcher: &'a dyn ResourceFetcher, max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            fetcher,
            permits: Semaphore::new(max_concurrent),
            max_concurrent,
        }
    }

    /// Fetch every URL and join the display names of the ones that resolved.
    ///
    /// Names keep the order of `urls`. Failed fetches are skipped, so an empty
    /// list or a list where every fetch failed yields `""`. A fetched resource
    /// without the display field is an error.
    pub async fn resolve_list(&self, urls: &[&str], kind: ReferenceKind) -> Result<String> {
        if urls.is_empty() {
            return Ok(String::new());
        }

        let field = kind.display_field();
        let names: Vec<Option<String>> = stream::iter(urls.iter().copied())
            .map(|url| async move {
                let _permit = self
                    .permits
                    .acquire()
                    .await
                    .map_err(|e| AppError::resolve(url, e))?;
                let resource = self.fetcher.fetch(url).await?;
                resource
                    .map(|value| display_name(&value, field, url))
                    .transpose()
            })
            .buffered(self.max_concurrent)
            .try_collect()
            .await?;

        Ok(names
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(NAME_SEPARATOR))
    }

    /// Resolve all five reference kinds of a character.
    ///
    /// Kinds are resolved one after another (films, species, starships,
    /// vehicles, homeworld); the first hard failure aborts the whole character.
    pub async fn resolve_character(&self, record: &CharacterRecord) -> Result<ResolvedReferences> {
        let resolve = |kind| self.resolve_list_of(record, kind);

        Ok(ResolvedReferences {
            films: resolve(ReferenceKind::Films).await?,
            species: resolve(ReferenceKind::Species).await?,
            starships: resolve(ReferenceKind::Starships).await?,
            vehicles: resolve(ReferenceKind::Vehicles).await?,
            homeworld: resolve(ReferenceKind::Homeworld).await?,
        })
    }

    async fn resolve_list_of(&self, record: &CharacterRecord, kind: ReferenceKind) -> Result<String> {
        let urls = record.references(kind);
        self.resolve_list(&urls, kind).await
    }
}

fn display_name(resource: &Value, field: &str, url: &str) -> Result<String> {
    resource
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AppError::resolve(url, format!("missing string field '{field}'")))
}
