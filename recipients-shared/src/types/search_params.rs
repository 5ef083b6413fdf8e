//! Search parameter types.
//!
//! This module defines the user-facing search inputs: an optional free-text term,
//! a status filter, a list scope and pagination.

use serde::{Deserialize, Serialize};

use super::recipient::RecipientStatus;

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

fn default_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// A page request: skip `from` results and return at most `size`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default)]
    pub from: usize,
    #[serde(default = "default_size")]
    pub size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            from: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(from: usize, size: usize) -> Self {
        Self { from, size }
    }

    /// Index one past the last requested result.
    pub fn end(&self) -> usize {
        self.from.saturating_add(self.size)
    }
}

/// Status filter: a single status or a set of statuses matched with OR.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusFilter {
    One(String),
    Many(Vec<String>),
}

impl StatusFilter {
    /// The statuses to match, a single status being a one-element set.
    /// Empty values are dropped.
    pub fn values(&self) -> Vec<String> {
        match self {
            StatusFilter::One(status) => vec![status.clone()],
            StatusFilter::Many(statuses) => statuses.clone(),
        }
        .into_iter()
        .filter(|status| !status.is_empty())
        .collect()
    }
}

impl From<&str> for StatusFilter {
    fn from(status: &str) -> Self {
        StatusFilter::One(status.to_string())
    }
}

impl From<RecipientStatus> for StatusFilter {
    fn from(status: RecipientStatus) -> Self {
        StatusFilter::One(status.as_str().to_string())
    }
}

impl From<&[RecipientStatus]> for StatusFilter {
    fn from(statuses: &[RecipientStatus]) -> Self {
        StatusFilter::Many(statuses.iter().map(|s| s.as_str().to_string()).collect())
    }
}

impl From<Vec<String>> for StatusFilter {
    fn from(statuses: Vec<String>) -> Self {
        StatusFilter::Many(statuses)
    }
}

/// Parameters of a recipient search.
///
/// Every criterion is optional; a request without any criterion matches every
/// recipient in the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text term matched against email, name and surname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusFilter>,

    /// Restrict results to a single list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,

    #[serde(default)]
    pub from: usize,

    #[serde(default = "default_size")]
    pub size: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            q: None,
            status: None,
            list_id: None,
            from: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text term.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Set the status filter.
    ///
    /// # Example
    ///
    /// ```
    /// use recipients_shared::{RecipientStatus, SearchParams};
    ///
    /// let params = SearchParams::new()
    ///     .with_status(RecipientStatus::Bounced)
    ///     .in_list("L1");
    /// ```
    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn in_list(mut self, list_id: impl Into<String>) -> Self {
        self.list_id = Some(list_id.into());
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.from = pagination.from;
        self.size = pagination.size;
        self
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.from, self.size)
    }
}
