//! Run statistics.

use chrono::{DateTime, Utc};

use super::Category;

/// How a single character task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterOutcome {
    /// Row handed to the sink successfully
    Inserted,
    /// The sink rejected the row
    InsertFailed,
    /// A reference lookup failed hard; nothing was written
    ResolveFailed,
    /// Self URL carried no usable identifier
    MissingId,
    /// Listing entry did not decode as a character
    Malformed,
}

/// A category whose pagination stopped on an error rather than at the last page.
#[derive(Debug, Clone)]
pub struct AbortedCategory {
    pub category: Category,
    pub url: String,
    pub reason: String,
}

/// Summary of a loader run.
#[derive(Debug, Clone)]
pub struct LoadStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub pages: usize,
    pub characters_seen: usize,
    pub inserted: usize,
    pub insert_failures: usize,
    pub resolve_failures: usize,
    pub skipped: usize,
    pub malformed: usize,
    pub aborted_categories: Vec<AbortedCategory>,
}

impl LoadStats {
    pub fn new() -> Self {
        Self {
            start_time: Utc::now(),
            end_time: None,
            pages: 0,
            characters_seen: 0,
            inserted: 0,
            insert_failures: 0,
            resolve_failures: 0,
            skipped: 0,
            malformed: 0,
            aborted_categories: Vec::new(),
        }
    }

    /// Count one finished character task.
    pub fn record(&mut self, outcome: CharacterOutcome) {
        self.characters_seen += 1;
        match outcome {
            CharacterOutcome::Inserted => self.inserted += 1,
            CharacterOutcome::InsertFailed => self.insert_failures += 1,
            CharacterOutcome::ResolveFailed => self.resolve_failures += 1,
            CharacterOutcome::MissingId => self.skipped += 1,
            CharacterOutcome::Malformed => self.malformed += 1,
        }
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Utc::now());
    }

    /// Wall-clock duration in seconds, once finished.
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.end_time
            .map(|end| (end - self.start_time).num_milliseconds() as f64 / 1000.0)
    }
}

impl Default for LoadStats {
    fn default() -> Self {
        Self::new()
    }
}
