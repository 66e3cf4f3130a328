//! App-store reviews: a server-paginated list with a sentiment breakdown.

use serde::Serialize;

use crate::error::Result;
use crate::filter::{Filter, FilterSet};
use crate::formatting;
use crate::list::LocalSource;
use crate::models::{Review, ReviewStats};
use crate::sample;
use crate::table::{Column, Row, Schema, ToRow, Value};
use crate::types::Sentiment;

pub const COMPETITOR_FILTER: &str = "competitor";
pub const PLATFORM_FILTER: &str = "platform";
pub const ROLE_FILTER: &str = "role";
pub const SENTIMENT_FILTER: &str = "sentiment";
pub const CATEGORY_FILTER: &str = "category";

pub fn schema() -> Result<Schema> {
    Schema::new(vec![
        Column::new("review_date", "Date").format_with(formatting::date()),
        Column::new("competitor", "Competitor"),
        Column::new("platform", "Platform"),
        Column::new("rating", "Rating").format_with(|value: &Value, _: &Row| {
            match value.as_number() {
                Some(stars) => "★".repeat(stars.clamp(0.0, 5.0) as usize),
                None => value.raw_text(),
            }
        }),
        Column::new("role", "Role"),
        Column::new("sentiment", "Sentiment"),
        Column::new("categories", "Categories")
            .unsortable()
            .format_with(formatting::labels()),
        Column::new("text", "Review").unsortable(),
    ])
}

pub fn filters() -> FilterSet {
    FilterSet::new(vec![
        Filter::server(COMPETITOR_FILTER, "competitor_id").with_param("competitor_id"),
        Filter::server(PLATFORM_FILTER, "platform"),
        Filter::server(ROLE_FILTER, "role"),
        Filter::server(SENTIMENT_FILTER, "sentiment"),
        Filter::server(CATEGORY_FILTER, "categories"),
    ])
}

/// The built-in reviews behind the backend's query parameters.
pub fn sample_source() -> LocalSource {
    LocalSource::new(sample::reviews().iter().map(Review::to_row).collect())
        .map_param(CATEGORY_FILTER, "categories")
}

/// Sentiment counts and mean rating over the visible reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// `None` when no review carries a rating
    pub average_rating: Option<f64>,
}

impl SentimentBreakdown {
    pub fn of<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Self {
        let mut breakdown = Self::default();
        let mut ratings = Vec::new();
        for row in rows {
            match row.get("sentiment").raw_text().parse::<Sentiment>() {
                Ok(Sentiment::Positive) => breakdown.positive += 1,
                Ok(Sentiment::Neutral) => breakdown.neutral += 1,
                Ok(Sentiment::Negative) => breakdown.negative += 1,
                Err(_) => {}
            }
            if let Some(rating) = row.get("rating").as_number() {
                ratings.push(rating);
            }
        }
        if !ratings.is_empty() {
            breakdown.average_rating = Some(ratings.iter().sum::<f64>() / ratings.len() as f64);
        }
        breakdown
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

impl From<&ReviewStats> for SentimentBreakdown {
    /// Period-wide counts; the mean rating is weighted by each competitor's total.
    fn from(stats: &ReviewStats) -> Self {
        let (weighted, rated) = stats
            .by_competitor
            .iter()
            .filter_map(|c| c.avg_rating.map(|avg| (avg * c.total as f64, c.total)))
            .fold((0.0, 0u64), |(sum, n), (w, t)| (sum + w, n + t));
        Self {
            positive: stats.by_sentiment.positive as usize,
            neutral: stats.by_sentiment.neutral as usize,
            negative: stats.by_sentiment.negative as usize,
            average_rating: (rated > 0).then(|| weighted / rated as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Selection;
    use crate::list::ListController;

    fn rows() -> Vec<Row> {
        sample::reviews().iter().map(Review::to_row).collect()
    }

    #[test]
    fn test_breakdown_over_sample() {
        let rows = rows();
        let breakdown = SentimentBreakdown::of(&rows);
        assert_eq!((breakdown.positive, breakdown.neutral, breakdown.negative), (2, 1, 2));
        assert_eq!(breakdown.total(), 5);
        assert_eq!(breakdown.average_rating, Some(3.4));
    }

    #[test]
    fn test_breakdown_of_nothing() {
        let breakdown = SentimentBreakdown::of(&Vec::<Row>::new());
        assert_eq!(breakdown.total(), 0);
        assert_eq!(breakdown.average_rating, None);
    }

    #[tokio::test]
    async fn test_role_and_sentiment_filters() {
        let source = sample_source();
        let mut list = ListController::new(20, filters());
        list.set_filter(ROLE_FILTER, Selection::Value("driver".to_string()));
        list.set_filter(SENTIMENT_FILTER, Selection::Value("negative".to_string()));
        list.fetch_page(&source, 1).await;

        let visible = list.visible_items();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].get("author").raw_text(), "Pedro L.");
        assert_eq!(list.cursor().total_items(), 1);
    }

    #[test]
    fn test_filters_become_query_params() {
        let mut filters = filters();
        filters.set(COMPETITOR_FILTER, Selection::Value("4".to_string()));
        filters.set(CATEGORY_FILTER, Selection::Value("support".to_string()));
        assert_eq!(
            filters.query_params(),
            vec![
                ("competitor_id".to_string(), "4".to_string()),
                ("category".to_string(), "support".to_string()),
            ]
        );
    }

    #[test]
    fn test_breakdown_from_backend_stats() {
        let stats: ReviewStats = serde_json::from_str(
            r#"{
                "total": 40,
                "by_sentiment": {"positive": 20, "neutral": 8, "negative": 12},
                "by_competitor": [
                    {"competitor": "Uber", "competitor_id": "2", "total": 30,
                     "positive": 15, "neutral": 6, "negative": 9, "avg_rating": 4.0},
                    {"competitor": "Didi", "competitor_id": "3", "total": 10,
                     "positive": 5, "neutral": 2, "negative": 3, "avg_rating": 2.0},
                    {"competitor": "Cabify", "competitor_id": "4", "total": 0,
                     "positive": 0, "neutral": 0, "negative": 0, "avg_rating": null}
                ],
                "trending_categories": []
            }"#,
        )
        .unwrap();
        let breakdown = SentimentBreakdown::from(&stats);
        assert_eq!((breakdown.positive, breakdown.neutral, breakdown.negative), (20, 8, 12));
        assert_eq!(breakdown.average_rating, Some(3.5));
    }

    #[test]
    fn test_rating_renders_as_stars() {
        let schema = schema().unwrap();
        let rating = schema.column("rating").unwrap();
        assert_eq!(rating.display(&rows()[1]), "★★");
    }
}
