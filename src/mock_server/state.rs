//! Mock server state management.
//!
//! Provides the in-memory data store for the mock openFDA server.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

/// Shared state for the mock server.
///
/// Raw record objects are stored per product code, in the order the
/// server will return them. Records are plain JSON values so fixtures
/// can carry fields the client ignores, like a real openFDA response.
#[derive(Debug, Default)]
pub struct MockState {
    /// Clearance records indexed by product code.
    pub records: HashMap<String, Vec<Value>>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add records under a product code.
    pub fn with_records(mut self, product_code: &str, records: Vec<Value>) -> Self {
        self.records.insert(product_code.to_string(), records);
        self
    }

    /// Records for a product code, in insertion order.
    pub fn records_for(&self, product_code: &str) -> Option<&Vec<Value>> {
        self.records.get(product_code)
    }
}
