//! List trait for paginated record search.

use std::time::Duration;

use async_trait::async_trait;

use crate::client::FdaClient;
use crate::error::Result;
use crate::pagination::Page;

/// Default number of records requested per page (openFDA caps at 100).
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// Pause between consecutive page requests, as rate courtesy to openFDA.
const PAGE_DELAY: Duration = Duration::from_millis(100);

/// Paginated search over a skip/limit endpoint.
///
/// Implementors supply [`list_page`](List::list_page); the provided
/// methods drive the offset cursor across pages, stopping on a short
/// page, on the reported total, or once an optional cap is reached.
///
/// # Example
///
/// ```ignore
/// use openfda_510k::{ClearanceQuery, DeviceClearance, FdaClient, List};
///
/// let client = FdaClient::from_env()?;
/// let query = ClearanceQuery::new("KJZ")?;
///
/// // Fetch a single page
/// let page = DeviceClearance::list_page(&client, &query, 0, 100).await?;
///
/// // Fetch everything, capped at 25 records
/// let records = DeviceClearance::list_all(&client, &query, 100, Some(25)).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Filter parameters for the search.
    type Query: Send + Sync;

    /// Fetch a single page of up to `limit` records starting at `skip`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &FdaClient,
        query: &Self::Query,
        skip: u64,
        limit: u32,
    ) -> Result<Page<Self>>;

    /// Stream matching records through `on_record` as pages arrive.
    ///
    /// Records are emitted in service order across contiguous,
    /// non-overlapping pages. When `cap` is set, emission stops at
    /// exactly `cap` records even mid-page and no further requests are
    /// issued. Returns the number of records emitted.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails or `on_record`
    /// reports a failure; records emitted before the failure are not
    /// rolled back.
    async fn list_with<F>(
        client: &FdaClient,
        query: &Self::Query,
        page_size: u32,
        cap: Option<u64>,
        mut on_record: F,
    ) -> Result<u64>
    where
        F: FnMut(Self) -> Result<()> + Send,
    {
        let mut skip: u64 = 0;
        let mut emitted: u64 = 0;
        let mut pages: u32 = 0;

        loop {
            let page = Self::list_page(client, query, skip, page_size).await?;
            let fetched = page.items.len();
            let total = page.total;

            for record in page {
                on_record(record)?;
                emitted += 1;
                if cap.is_some_and(|c| emitted >= c) {
                    return Ok(emitted);
                }
            }

            skip += fetched as u64;

            // A short (or empty) page signals end of data.
            if fetched < page_size as usize {
                break;
            }
            if total.is_some_and(|t| skip >= t) {
                break;
            }

            pages += 1;
            // Safety limit to prevent infinite loops
            if pages >= MAX_PAGES {
                tracing::warn!("reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }

            tokio::time::sleep(PAGE_DELAY).await;
        }

        Ok(emitted)
    }

    /// Fetch all matching records into memory.
    ///
    /// Convenience over [`list_with`](List::list_with) for callers that
    /// want the buffered result set.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(
        client: &FdaClient,
        query: &Self::Query,
        page_size: u32,
        cap: Option<u64>,
    ) -> Result<Vec<Self>> {
        let mut records = Vec::new();
        Self::list_with(client, query, page_size, cap, |record| {
            records.push(record);
            Ok(())
        })
        .await?;
        Ok(records)
    }
}
