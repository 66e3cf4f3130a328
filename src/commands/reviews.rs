use serde_json::json;

use super::{
    CommandOutput, Context, heading, list_footer, load_list, rows_json, table_text, use_color,
};
use crate::api::{ApiClient, REVIEWS_PATH};
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::filter::Selection;
use crate::list::RemoteSource;
use crate::models::{Review, ReviewStats};
use crate::pages::PageId;
use crate::pages::reviews::{self, SentimentBreakdown};
use crate::table::{ComparisonTable, Row};
use crate::types::{Platform, Role, Sentiment};

/// Window of the backend's review statistics.
const STATS_WINDOW_DAYS: u32 = 30;

pub struct ReviewOptions {
    pub competitor: Option<String>,
    pub platform: Option<Platform>,
    pub role: Option<Role>,
    pub sentiment: Option<Sentiment>,
    pub category: Option<String>,
    pub page: u32,
}

fn selection<T: ToString>(value: Option<T>) -> Selection {
    value
        .map(|v| Selection::Value(v.to_string()))
        .unwrap_or_default()
}

/// Statistics are an extra; a failure leaves the per-page breakdown in place.
async fn period_stats(client: &ApiClient, competitor_id: Option<&str>) -> Option<ReviewStats> {
    match client.review_stats(competitor_id, STATS_WINDOW_DAYS).await {
        Ok(stats) => Some(stats),
        Err(err) => {
            tracing::warn!(error = %err, "review statistics unavailable");
            None
        }
    }
}

/// List app-store reviews with a sentiment breakdown
pub async fn cmd_reviews(ctx: &Context, options: ReviewOptions, output: OutputOptions) -> Result<()> {
    ctx.enter(PageId::Reviews)?;

    // The statistics endpoint only narrows by competitor.
    let narrowed = options.platform.is_some()
        || options.role.is_some()
        || options.sentiment.is_some()
        || options.category.is_some();
    let competitor = ctx.competitor_selection(options.competitor.as_deref()).await?;
    let mut filters = reviews::filters();
    filters.set(reviews::COMPETITOR_FILTER, competitor.clone());
    filters.set(reviews::PLATFORM_FILTER, selection(options.platform));
    filters.set(reviews::ROLE_FILTER, selection(options.role));
    filters.set(reviews::SENTIMENT_FILTER, selection(options.sentiment));
    filters.set(
        reviews::CATEGORY_FILTER,
        Selection::from_option(options.category.as_deref()),
    );

    let page_size = ctx.config().page_size;
    let list = if ctx.is_sample() {
        load_list(&reviews::sample_source(), filters, page_size, options.page).await?
    } else {
        let source: RemoteSource<Review> = RemoteSource::new(ctx.client()?, REVIEWS_PATH);
        load_list(&source, filters, page_size, options.page).await?
    };
    let stats = if ctx.is_sample() || narrowed {
        None
    } else {
        let competitor_id = match &competitor {
            Selection::Value(id) => Some(id.as_str()),
            _ => None,
        };
        period_stats(&ctx.client()?, competitor_id).await
    };

    let visible: Vec<Row> = list.visible_items().into_iter().cloned().collect();
    // Backend statistics cover the whole window; without them, the page.
    let breakdown = match &stats {
        Some(stats) => SentimentBreakdown::from(stats),
        None => SentimentBreakdown::of(&visible),
    };

    let color = use_color(output);
    let table = ComparisonTable::new(reviews::schema()?);
    let average = breakdown
        .average_rating
        .map(|avg| format!("{avg:.1}"))
        .unwrap_or_else(|| "n/a".to_string());
    let mut summary = format!(
        "positive {} / neutral {} / negative {}, average rating {average}",
        breakdown.positive, breakdown.neutral, breakdown.negative
    );
    if stats.is_some() {
        summary.push_str(&format!(" (last {STATS_WINDOW_DAYS} days)"));
    }
    let text = format!(
        "{}\n{}\n{}\n{}",
        heading(PageId::Reviews, color),
        table_text(&table, &visible, color),
        summary,
        list_footer(&list, "reviews", color)
    );

    let cursor = list.cursor();
    CommandOutput::new(json!({
        "reviews": rows_json(&visible),
        "breakdown": breakdown,
        "breakdown_scope": if stats.is_some() { "period" } else { "page" },
        "page": cursor.page(),
        "pages": cursor.total_pages(),
        "total": cursor.total_items(),
    }))
    .with_text(text)
    .print(output)
}
