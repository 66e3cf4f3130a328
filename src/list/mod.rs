//! List views over row collections.
//!
//! A page owns a [`ListController`] and a [`ListSource`]. The source is either
//! an in-memory collection ([`LocalSource`]) or a backend list endpoint
//! ([`RemoteSource`]); the controller does not care which.

pub mod local;
pub mod remote;
pub mod state;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pagination::Cursor;
use crate::table::Row;

pub use local::LocalSource;
pub use remote::RemoteSource;
pub use state::{
    Completion, FetchOutcome, FetchState, LOAD_ERROR_MESSAGE, ListController, NO_RESULTS_MESSAGE,
    RequestToken,
};

/// Parameters of one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    /// Active server-side filters
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, param: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((param.into(), value.into()));
        self
    }

    /// `page`, `limit` and then the filters, in that order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

/// The backend's paginated envelope: `{items, total, page, pages}`.
///
/// Release and review listings name the item array after the entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(alias = "releases", alias = "reviews")]
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            pages: self.pages,
        }
    }

    pub fn cursor(&self, page_size: u32) -> Cursor {
        Cursor::new(self.page, page_size, self.total)
    }
}

/// Where a list view gets its rows from.
pub trait ListSource: Send + Sync {
    fn load(&self, query: &ListQuery) -> impl Future<Output = Result<Page<Row>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_order() {
        let query = ListQuery::new(2, 20).with_filter("competitor", "uber");
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "20".to_string()),
                ("competitor".to_string(), "uber".to_string()),
            ]
        );
    }

    #[test]
    fn test_envelope_deserializes() {
        let page: Page<serde_json::Value> =
            serde_json::from_str(r#"{"items":[],"total":0,"page":1,"pages":1}"#).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.cursor(20).total_pages(), 1);
    }

    #[test]
    fn test_entity_named_envelope_deserializes() {
        let page: Page<serde_json::Value> = serde_json::from_str(
            r#"{"releases":[{"id":"1"}],"total":41,"page":2,"pages":3}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.cursor(20).page(), 2);
    }
}
