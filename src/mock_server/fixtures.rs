//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic 510(k) records.

use serde_json::{json, Value};

/// Product code used by the default scenario.
pub const DEFAULT_PRODUCT_CODE: &str = "KJZ";

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Create a fully-populated clearance record.
    pub fn clearance(k_number: &str, device_name: &str, applicant: &str) -> Value {
        json!({
            "k_number": k_number,
            "device_name": device_name,
            "applicant": applicant,
            "indications_for_use": format!("Indications for use of {device_name}."),
            "summary_of_technology": format!("Technological summary of {device_name}."),
            // Fields the client ignores, as present in real responses
            "decision_code": "SESE",
            "decision_date": "2019-06-14",
            "clearance_type": "Traditional"
        })
    }

    /// Create a clearance that predates summary_of_technology, carrying
    /// a device_description instead.
    pub fn legacy_clearance(k_number: &str, device_name: &str, applicant: &str) -> Value {
        json!({
            "k_number": k_number,
            "device_name": device_name,
            "applicant": applicant,
            "indications_for_use": format!("Indications for use of {device_name}."),
            "device_description": format!("Description of {device_name}."),
            "decision_code": "SESE"
        })
    }

    /// Create `count` sequential records for bulk pagination tests.
    pub fn clearances(count: usize) -> Vec<Value> {
        (1..=count)
            .map(|i| {
                Self::clearance(
                    &format!("K{i:06}"),
                    &format!("Device {i}"),
                    "Acme Medical Inc.",
                )
            })
            .collect()
    }

    /// Default scenario: a handful of records under [`DEFAULT_PRODUCT_CODE`].
    pub fn default_records() -> Vec<Value> {
        vec![
            Self::clearance("K190001", "Infusion Pump", "Acme Medical Inc."),
            Self::clearance("K190002", "Syringe Pump", "Beta Devices LLC"),
            Self::legacy_clearance("K900003", "Gravity Infusion Set", "Gamma Health Corp."),
        ]
    }
}
