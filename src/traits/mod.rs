//! Trait definitions for search operations.
//!
//! The pagination loop lives here as provided methods, so entity types
//! only supply the single-page fetch.

mod list;

pub use list::{List, DEFAULT_PAGE_SIZE};
