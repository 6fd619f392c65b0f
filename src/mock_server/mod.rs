//! Mock openFDA API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! openFDA 510(k) endpoint for integration and end-to-end testing.
//! Unlike wiremock which mocks at the HTTP level per-test, this server
//! slices a fixture data set with real skip/limit semantics, enabling
//! realistic multi-page workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use openfda_510k::mock_server::MockServer;
//! use openfda_510k::{ClearanceQuery, DeviceClearance, FdaClient, List};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = FdaClient::new(server.url()).unwrap();
//!
//!     // Server comes with default fixtures under product code "KJZ"
//!     let query = ClearanceQuery::new("KJZ").unwrap();
//!     let records = DeviceClearance::list_all(&client, &query, 100, None).await.unwrap();
//!     assert!(!records.is_empty());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
