use std::collections::HashMap;

use crate::error::Result;
use crate::pagination::Cursor;
use crate::table::Row;

use super::{ListQuery, ListSource, Page};

/// In-memory list source: applies query filters as predicates, then slices
/// the requested page.
#[derive(Debug, Clone, Default)]
pub struct LocalSource {
    rows: Vec<Row>,
    /// Query parameter name -> row field, for parameters that differ
    fields: HashMap<String, String>,
}

impl LocalSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            fields: HashMap::new(),
        }
    }

    /// Match query parameter `param` against row field `field`.
    pub fn map_param(mut self, param: impl Into<String>, field: impl Into<String>) -> Self {
        self.fields.insert(param.into(), field.into());
        self
    }

    fn field_for<'a>(&'a self, param: &'a str) -> &'a str {
        self.fields.get(param).map(String::as_str).unwrap_or(param)
    }

    fn page_of(&self, query: &ListQuery) -> Page<Row> {
        let matching: Vec<&Row> = self
            .rows
            .iter()
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|(param, value)| row.get(self.field_for(param)).matches(value))
            })
            .collect();

        let cursor = Cursor::new(query.page, query.limit, matching.len() as u64);
        Page {
            items: matching[cursor.item_range()].iter().map(|r| (*r).clone()).collect(),
            total: cursor.total_items(),
            page: cursor.page(),
            pages: cursor.total_pages(),
        }
    }
}

impl ListSource for LocalSource {
    async fn load(&self, query: &ListQuery) -> Result<Page<Row>> {
        Ok(self.page_of(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> LocalSource {
        let rows = (1..=5)
            .map(|i| {
                let competitor = if i % 2 == 0 { "uber" } else { "didi" };
                Row::new()
                    .with("id", f64::from(i))
                    .with("competitors_mentioned", vec![competitor.to_string()])
            })
            .collect();
        LocalSource::new(rows).map_param("competitor", "competitors_mentioned")
    }

    #[tokio::test]
    async fn test_pages_are_sliced() {
        let page = source().load(&ListQuery::new(2, 2)).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.pages, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].get("id").as_number(), Some(3.0));
    }

    #[tokio::test]
    async fn test_filters_use_mapped_field() {
        let query = ListQuery::new(1, 10).with_filter("competitor", "uber");
        let page = source().load(&query).await.unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_clamped() {
        let page = source().load(&ListQuery::new(99, 2)).await.unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 1);
    }
}
