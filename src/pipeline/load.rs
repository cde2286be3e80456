// src/pipeline/load.rs

//! Catalog loading pipeline.
//!
//! Walks the `people` listing and, for every page, resolves and stores each
//! character concurrently before moving on to the next page.

use futures::stream::{self, StreamExt};
use serde_json::Value;

use crate::error::AppError;
use crate::models::{
    AbortedCategory, Category, CharacterOutcome, CharacterRecord, Config, LoadStats,
};
use crate::pipeline::paginate::{PageWalk, Paginator};
use crate::services::{ReferenceResolver, ResourceFetcher, assemble};
use crate::storage::CharacterSink;
use crate::utils::url::extract_character_id;

/// Drives one loader run against a fetcher and a sink.
pub struct Loader<'a> {
    config: &'a Config,
    fetcher: &'a dyn ResourceFetcher,
    sink: &'a dyn CharacterSink,
    resolver: ReferenceResolver<'a>,
}

impl<'a> Loader<'a> {
    pub fn new(
        config: &'a Config,
        fetcher: &'a dyn ResourceFetcher,
        sink: &'a dyn CharacterSink,
    ) -> Self {
        Self {
            config,
            fetcher,
            sink,
            resolver: ReferenceResolver::new(fetcher, config.api.max_concurrent_fetches),
        }
    }

    /// Categories this run walks.
    fn categories(&self) -> Vec<Category> {
        if self.config.loader.walk_auxiliary_categories {
            Category::ALL.to_vec()
        } else {
            vec![Category::People]
        }
    }

    /// Walk every configured category and return the run summary.
    pub async fn run(&self) -> LoadStats {
        let mut stats = LoadStats::new();

        for category in self.categories() {
            let walk = self.walk_category(category, &mut stats).await;
            stats.pages += walk.pages();

            match walk {
                PageWalk::Exhausted { pages } => {
                    log::debug!("Finished {} after {} page(s)", category, pages);
                }
                PageWalk::Limited { pages } => {
                    log::info!("Stopped {} at the {}-page cap", category, pages);
                }
                PageWalk::Aborted { pages, url, reason } => {
                    log::error!(
                        "Pagination of {} aborted after {} page(s) at {}: {}",
                        category,
                        pages,
                        url,
                        reason
                    );
                    stats.aborted_categories.push(AbortedCategory {
                        category,
                        url,
                        reason,
                    });
                }
            }
        }

        stats.finish();
        stats
    }

    async fn walk_category(&self, category: Category, stats: &mut LoadStats) -> PageWalk {
        let root = category.root_url(&self.config.api.base_url);
        let mut paginator =
            Paginator::new(self.fetcher, root).with_max_pages(self.config.loader.max_pages);

        loop {
            match paginator.next_page().await {
                Ok(Some((url, page))) => {
                    log::info!("Fetched data from: {}", url);
                    if category == Category::People {
                        self.load_page(page.results, stats).await;
                    } else {
                        log::debug!("{} entries on {} (not persisted)", page.results.len(), url);
                    }
                }
                Ok(None) if paginator.is_limited() => {
                    return PageWalk::Limited {
                        pages: paginator.pages(),
                    };
                }
                Ok(None) => {
                    return PageWalk::Exhausted {
                        pages: paginator.pages(),
                    };
                }
                Err(e) => {
                    let (url, reason) = match e {
                        AppError::Pagination { url, message } => (url, message),
                        other => (String::new(), other.to_string()),
                    };
                    return PageWalk::Aborted {
                        pages: paginator.pages(),
                        url,
                        reason,
                    };
                }
            }
        }
    }

    /// Process one page of characters, waiting for every task to finish.
    async fn load_page(&self, results: Vec<Value>, stats: &mut LoadStats) {
        let concurrency = self.config.api.max_concurrent_characters.max(1);
        let mut tasks = stream::iter(results)
            .map(|entry| self.load_character(entry))
            .buffer_unordered(concurrency);

        while let Some(outcome) = tasks.next().await {
            stats.record(outcome);
        }
    }

    /// Resolve, assemble and store a single listing entry.
    async fn load_character(&self, entry: Value) -> CharacterOutcome {
        let record: CharacterRecord = match serde_json::from_value(entry) {
            Ok(record) => record,
            Err(e) => {
                log::error!("Skipping malformed character entry: {}", e);
                return CharacterOutcome::Malformed;
            }
        };

        let Some(id) = extract_character_id(&record.url) else {
            log::warn!(
                "Skipping person {}: no numeric id in {}",
                record.name,
                record.url
            );
            return CharacterOutcome::MissingId;
        };

        let references = match self.resolver.resolve_character(&record).await {
            Ok(references) => references,
            Err(e) => {
                log::error!(
                    "Failed to fetch additional data for person: {}. Error: {}",
                    record.name,
                    e
                );
                return CharacterOutcome::ResolveFailed;
            }
        };

        let row = assemble(record, references, id);
        match self.sink.insert(&row).await {
            Ok(()) => {
                log::info!("Inserted person: {}", row.name);
                CharacterOutcome::Inserted
            }
            Err(e) => {
                log::error!("Failed to insert person: {}. Error: {}", row.name, e);
                CharacterOutcome::InsertFailed
            }
        }
    }
}

/// Run the loader and log a summary.
pub async fn run_loader(
    config: &Config,
    fetcher: &dyn ResourceFetcher,
    sink: &dyn CharacterSink,
) -> LoadStats {
    log::info!("Loading catalog from {}", config.api.base_url);

    let stats = Loader::new(config, fetcher, sink).run().await;

    log::info!(
        "Load summary: {} page(s), {} character(s), {} inserted, {} insert failure(s), {} resolve failure(s), {} skipped, {} malformed",
        stats.pages,
        stats.characters_seen,
        stats.inserted,
        stats.insert_failures,
        stats.resolve_failures,
        stats.skipped,
        stats.malformed
    );
    if let Some(secs) = stats.elapsed_secs() {
        log::info!("Elapsed: {:.1}s", secs);
    }
    if !stats.aborted_categories.is_empty() {
        log::warn!(
            "{} categor(ies) stopped early because of fetch errors",
            stats.aborted_categories.len()
        );
    }

    stats
}
