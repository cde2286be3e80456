//! Sinks for resolved character rows.
//!
//! - `PostgresWriter`: one parameterized insert per row into `people`
//! - `JsonLinesSink`: one JSON document per line, for dry runs

pub mod jsonl;
pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ResolvedCharacter;

// Re-export for convenience
pub use jsonl::JsonLinesSink;
pub use postgres::PostgresWriter;

/// Destination for resolved characters.
///
/// Each call is independent: a failed insert never affects other rows and is
/// never retried.
#[async_trait]
pub trait CharacterSink: Send + Sync {
    /// Persist a single row.
    async fn insert(&self, record: &ResolvedCharacter) -> Result<()>;
}
