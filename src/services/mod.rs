//! Service layer for the loader.
//!
//! This module contains the business logic for:
//! - Resource fetching (`ResourceFetcher`, `HttpFetcher`)
//! - Reference resolution (`ReferenceResolver`)
//! - Record assembly (`assemble`)

mod assembler;
mod fetcher;
mod resolver;

pub use assembler::assemble;
pub use fetcher::{HttpFetcher, ResourceFetcher};
pub use resolver::{NAME_SEPARATOR, ReferenceResolver};
