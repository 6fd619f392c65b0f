//! Pagination utilities for openFDA skip/limit responses.

use serde::Serialize;

/// A page of results from the openFDA API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The records on this page.
    pub items: Vec<T>,
    /// Total number of matching records across all pages (if reported).
    pub total: Option<u64>,
    /// Offset of the first record on this page.
    pub skip: u64,
    /// Number of records that were requested.
    pub limit: u32,
    /// Whether more records remain after this page.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page from records and pagination info.
    ///
    /// When the envelope reports a total, `has_more` is exact; otherwise
    /// a full page is taken as a signal that more records remain.
    #[must_use]
    pub fn new(items: Vec<T>, skip: u64, limit: u32, total: Option<u64>) -> Self {
        let has_more = match total {
            Some(t) => skip + (items.len() as u64) < t,
            None => items.len() >= limit as usize,
        };
        Self {
            items,
            total,
            skip,
            limit,
            has_more,
        }
    }

    /// Map the records to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            skip: self.skip,
            limit: self.limit,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of records on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the records in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
