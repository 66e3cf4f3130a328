//! News feed: a server-paginated list with a backend search box.

use crate::error::Result;
use crate::filter::{Filter, FilterSet};
use crate::formatting;
use crate::list::LocalSource;
use crate::models::NewsItem;
use crate::sample;
use crate::table::{Column, Row, Schema, ToRow, Value};

/// Server-side: changing it refetches page 1.
pub const COMPETITOR_FILTER: &str = "competitor";
pub const SENTIMENT_FILTER: &str = "sentiment";

pub fn schema() -> Result<Schema> {
    Schema::new(vec![
        Column::new("published_date", "Published").format_with(formatting::date()),
        Column::new("title", "Title"),
        Column::new("source_name", "Source"),
        Column::new("competitors_mentioned", "Competitors")
            .unsortable()
            .format_with(formatting::labels()),
        Column::new("sentiment", "Sentiment"),
        Column::new("relevance_score", "Relevance").format_with(
            |value: &Value, _: &Row| match value.as_number() {
                Some(score) => format!("{:.0}%", score * 100.0),
                None => value.raw_text(),
            },
        ),
    ])
}

pub fn filters() -> FilterSet {
    FilterSet::new(vec![
        Filter::server(COMPETITOR_FILTER, "competitors_mentioned"),
        Filter::client(SENTIMENT_FILTER, "sentiment"),
    ])
}

/// The built-in articles behind the same query interface as the backend.
pub fn sample_source() -> LocalSource {
    LocalSource::new(sample::news().iter().map(NewsItem::to_row).collect())
        .map_param(COMPETITOR_FILTER, "competitors_mentioned")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Selection;
    use crate::list::{FetchState, ListController};

    #[tokio::test]
    async fn test_sample_feed_paginates() {
        let source = sample_source();
        let mut list = ListController::new(10, filters());
        list.fetch_page(&source, 1).await;
        assert_eq!(list.cursor().total_pages(), 3);
        assert_eq!(list.visible_items().len(), 10);

        list.fetch_page(&source, 9).await;
        assert_eq!(list.cursor().page(), 3);
        assert_eq!(list.visible_items().len(), 5);
    }

    #[tokio::test]
    async fn test_competitor_filter_refetches_first_page() {
        let source = sample_source();
        let mut list = ListController::new(10, filters());
        list.fetch_page(&source, 2).await;

        list.apply_filter(&source, COMPETITOR_FILTER, Selection::Value("uber".to_string()))
            .await;
        assert_eq!(list.cursor().page(), 1);
        assert!(matches!(list.state(), FetchState::Success { .. }));
        assert!(list
            .visible_items()
            .iter()
            .all(|row| row.get("competitors_mentioned").matches("uber")));
    }

    #[test]
    fn test_relevance_as_percentage() {
        let schema = schema().unwrap();
        let row = Row::new().with("relevance_score", 0.85);
        assert_eq!(schema.column("relevance_score").unwrap().display(&row), "85%");
    }
}
