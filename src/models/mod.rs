// src/models/mod.rs

//! Domain models for the loader.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod catalog;
mod character;
mod config;
mod stats;

// Re-export all public types
pub use catalog::{CatalogPage, Category};
pub use character::{CharacterRecord, ReferenceKind, ResolvedCharacter, ResolvedReferences};
pub use config::{ApiConfig, Config, DatabaseConfig, LoaderConfig, LoggingConfig};
pub use stats::{AbortedCategory, CharacterOutcome, LoadStats};
