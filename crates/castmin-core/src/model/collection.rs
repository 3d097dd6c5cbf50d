// ── Paged result sets ──

use serde::{Deserialize, Serialize};

/// One page of records plus the server's paging counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    /// Items matching the filter across all pages.
    pub total: usize,
    /// Items in this page.
    pub count: usize,
    pub offset: usize,
    pub limit: usize,
    pub results: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            total: 0,
            count: 0,
            offset: 0,
            limit: 0,
            results: Vec::new(),
        }
    }
}

impl<T> Collection<T> {
    /// Convert every record, keeping the counters.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Collection<U> {
        Collection {
            total: self.total,
            count: self.count,
            offset: self.offset,
            limit: self.limit,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
