//! 510(k) clearance model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::FdaClient;
use crate::error::{FdaError, Result};
use crate::pagination::Page;
use crate::traits::List;

/// Endpoint path under the openFDA base URL.
const ENDPOINT: &str = "device/510k.json";

/// One 510(k) premarket notification clearance.
///
/// Field contents are passed through from the service as-is; a field
/// the service omits maps to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceClearance {
    /// The 510(k) clearance number (e.g., "K123456").
    pub k_number: String,

    /// Device trade name.
    pub device_name: String,

    /// The applicant that submitted the notification.
    pub manufacturer: String,

    /// Free-text indications for use.
    pub indications_for_use: String,

    /// Free-text summary of the device technology.
    pub summary_of_technology: String,
}

/// Search filter for clearance queries.
///
/// Immutable once constructed; the product code is matched exactly by
/// the service.
#[derive(Debug, Clone)]
pub struct ClearanceQuery {
    product_code: String,
}

impl ClearanceQuery {
    /// Create a query for an exact product-code match.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Rejects a blank product code before any request is made.
    pub fn new(product_code: &str) -> Result<Self> {
        let code = product_code.trim();
        if code.is_empty() {
            return Err(FdaError::InvalidQuery(
                "product code must not be empty".to_string(),
            ));
        }
        Ok(Self {
            product_code: code.to_string(),
        })
    }

    /// The product code this query filters on.
    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    /// openFDA search expression, e.g. `product_code:KJZ`.
    fn search_expr(&self) -> String {
        format!("product_code:{}", self.product_code)
    }
}

/// Raw record shape returned by the endpoint.
///
/// Only the fields the collector passes through are deserialized;
/// anything else the service sends is ignored.
#[derive(Debug, Deserialize)]
struct RawClearance {
    #[serde(default)]
    k_number: String,
    #[serde(default)]
    device_name: String,
    #[serde(default)]
    applicant: String,
    #[serde(default)]
    indications_for_use: String,
    #[serde(default)]
    summary_of_technology: String,
    #[serde(default)]
    device_description: String,
}

impl From<RawClearance> for DeviceClearance {
    fn from(raw: RawClearance) -> Self {
        // Older filings carry device_description instead of a summary
        let summary = if raw.summary_of_technology.is_empty() {
            raw.device_description
        } else {
            raw.summary_of_technology
        };

        Self {
            k_number: raw.k_number,
            device_name: raw.device_name,
            manufacturer: raw.applicant,
            indications_for_use: raw.indications_for_use,
            summary_of_technology: summary,
        }
    }
}

/// API response envelope for the search endpoint.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    meta: Meta,
    #[serde(default)]
    results: Vec<RawClearance>,
}

#[derive(Debug, Default, Deserialize)]
struct Meta {
    #[serde(default)]
    results: MetaResults,
}

#[derive(Debug, Default, Deserialize)]
struct MetaResults {
    #[serde(default)]
    total: Option<u64>,
}

#[async_trait]
impl List for DeviceClearance {
    type Query = ClearanceQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &FdaClient,
        query: &Self::Query,
        skip: u64,
        limit: u32,
    ) -> Result<Page<Self>> {
        #[derive(Serialize)]
        struct RequestParams {
            search: String,
            limit: u32,
            skip: u64,
        }

        let params = RequestParams {
            search: query.search_expr(),
            limit,
            skip,
        };

        let response = match client.get_with_query(ENDPOINT, &params).await {
            Ok(response) => response,
            // openFDA reports an empty match set as 404/NOT_FOUND rather
            // than an empty results array.
            Err(FdaError::Api {
                status: 404,
                ref code,
                ..
            }) if code.as_deref() == Some("NOT_FOUND") => {
                return Ok(Page::new(Vec::new(), skip, limit, Some(0)));
            }
            Err(e) => return Err(e),
        };

        let data: SearchResponse = response.json().await.map_err(FdaError::Http)?;
        let records = data
            .results
            .into_iter()
            .map(DeviceClearance::from)
            .collect();

        Ok(Page::new(records, skip, limit, data.meta.results.total))
    }
}

/// Fetch every clearance matching `query`, honoring an optional cap.
///
/// Convenience wrapper over [`List::list_all`] with the given page size.
///
/// # Errors
///
/// Returns an error if any page request fails.
pub async fn search_clearances(
    client: &FdaClient,
    query: &ClearanceQuery,
    page_size: u32,
    cap: Option<u64>,
) -> Result<Vec<DeviceClearance>> {
    DeviceClearance::list_all(client, query, page_size, cap).await
}
