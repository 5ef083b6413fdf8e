//! Search result types.
//!
//! This module defines the page returned from every search operation.

use serde::{Deserialize, Serialize};

/// A bounded slice of search results plus the total match count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultPage<T> {
    /// Documents of the requested page, in engine order.
    pub items: Vec<T>,

    /// Total number of matching documents.
    /// May be greater than the number of returned items due to pagination.
    pub total: u64,
}

impl<T> SearchResultPage<T> {
    /// Create an empty page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Returns true if the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
