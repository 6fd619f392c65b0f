//! openFDA 510(k) clearance search library.
//!
//! A Rust library (and CLI) for querying the openFDA device clearance
//! endpoint by product code, paginating through the REST API with a
//! skip/limit cursor and collecting or streaming the matching records.
//!
//! # Quick Start
//!
//! ```no_run
//! use openfda_510k::{ClearanceQuery, DeviceClearance, FdaClient, List};
//!
//! #[tokio::main]
//! async fn main() -> openfda_510k::Result<()> {
//!     // Create client from environment variables
//!     let client = FdaClient::from_env()?;
//!
//!     // Fetch every clearance for a product code, capped at 25 records
//!     let query = ClearanceQuery::new("KJZ")?;
//!     let records = DeviceClearance::list_all(&client, &query, 100, Some(25)).await?;
//!     println!("Found {} clearances", records.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around the [`List`] trait: the clearance
//! model supplies the single-page fetch, and the trait's provided
//! methods drive the offset cursor across pages, handle the result cap,
//! and either buffer ([`List::list_all`]) or stream
//! ([`List::list_with`]) the records.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `OPENFDA_API_URL` (optional) - Base URL (defaults to `https://api.fda.gov`)
//! - `OPENFDA_API_KEY` (optional) - API key for a higher rate limit

pub mod cli;
mod client;
mod error;
mod models;
pub mod output;
mod pagination;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::FdaClient;
pub use error::{FdaError, Result};
pub use pagination::Page;

// Re-export traits
pub use traits::{List, DEFAULT_PAGE_SIZE};

// Re-export models
pub use models::{ClearanceQuery, DeviceClearance};

// Re-export convenience functions
pub use models::search_clearances;
