//! Pipeline entry points for loader operations.
//!
//! - `run_loader`: Walk the catalog and store every character
//! - `run_validate`: Check configuration without touching the network

pub mod load;
pub mod paginate;
pub mod validate;

pub use load::{Loader, run_loader};
pub use paginate::{PageWalk, Paginator};
pub use validate::run_validate;
