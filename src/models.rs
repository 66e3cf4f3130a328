//! Backend entities and their row projections.
//!
//! Field names follow the backend's JSON. Each entity implements [`ToRow`]
//! so pages can hand it to the table, filter and export machinery.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::table::{Row, ToRow, Value};
use crate::types::{
    DiscountType, Health, Platform, Role, RunStatus, Sentiment, Significance, SourceStatus,
};

fn date(value: &Option<String>) -> Value {
    value.clone().map(Value::Date).unwrap_or_default()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Competitor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: name.to_lowercase(),
            name,
            country: "PE".to_string(),
            logo_url: None,
            is_active: true,
        }
    }
}

impl ToRow for Competitor {
    fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("name", self.name.as_str())
            .with("slug", self.slug.as_str())
            .with("country", self.country.as_str())
            .with("is_active", self.is_active)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompetitorList {
    pub competitors: Vec<Competitor>,
}

// Tariffs

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverFigures {
    pub commission_rate: f64,
    #[serde(default)]
    pub signup_bonus: Option<f64>,
    #[serde(default)]
    pub referral_bonus: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderFigures {
    #[serde(default)]
    pub base_fare: Option<f64>,
    #[serde(default)]
    pub per_km_rate: Option<f64>,
    #[serde(default)]
    pub per_min_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub competitor: String,
    pub competitor_id: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub driver: Option<DriverFigures>,
    #[serde(default)]
    pub rider: Option<RiderFigures>,
}

/// `GET /api/tariffs/comparison` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffComparison {
    pub comparison: Vec<ComparisonEntry>,
    pub updated_at: String,
}

impl TariffComparison {
    /// One row per competitor that reports driver figures.
    pub fn driver_rows(&self) -> Vec<Row> {
        self.comparison
            .iter()
            .filter_map(|entry| {
                let figures = entry.driver.as_ref()?;
                Some(
                    Row::new()
                        .with("competitor", entry.competitor.as_str())
                        .with("commission_rate", figures.commission_rate)
                        .with("signup_bonus", figures.signup_bonus)
                        .with("referral_bonus", figures.referral_bonus),
                )
            })
            .collect()
    }

    /// One row per competitor that reports rider figures.
    pub fn rider_rows(&self) -> Vec<Row> {
        self.comparison
            .iter()
            .filter_map(|entry| {
                let figures = entry.rider.as_ref()?;
                Some(
                    Row::new()
                        .with("competitor", entry.competitor.as_str())
                        .with("base_fare", figures.base_fare)
                        .with("per_km_rate", figures.per_km_rate)
                        .with("per_min_rate", figures.per_min_rate),
                )
            })
            .collect()
    }
}

// Promotions

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promo {
    pub id: String,
    pub competitor: Competitor,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: Option<f64>,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub target_audience: Role,
    pub is_active: bool,
    #[serde(default)]
    pub collected_at: Option<String>,
}

impl Promo {
    /// `-20%`, `-S/5` or `free ride`.
    pub fn discount_label(&self) -> String {
        match (self.discount_type, self.discount_value) {
            (DiscountType::Percent, Some(v)) => format!("-{v}%"),
            (DiscountType::Fixed, Some(v)) => format!("-S/{v}"),
            (DiscountType::FreeRide, _) => "free ride".to_string(),
            (_, None) => self.discount_type.to_string(),
        }
    }
}

impl ToRow for Promo {
    fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("competitor", self.competitor.name.as_str())
            .with("competitor_id", self.competitor.id.as_str())
            .with("title", self.title.as_str())
            .with("discount", self.discount_label())
            .with("code", self.code.clone())
            .with("valid_until", date(&self.valid_until))
            .with("target_audience", self.target_audience.as_str())
            .with("is_active", self.is_active)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PromoList {
    pub promos: Vec<Promo>,
    pub total: u64,
}

// Releases

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: String,
    pub competitor: Competitor,
    pub platform: Platform,
    pub version: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub release_notes: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub significance: Option<Significance>,
}

impl ToRow for Release {
    fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("competitor", self.competitor.name.as_str())
            .with("competitor_id", self.competitor.id.as_str())
            .with("platform", self.platform.as_str())
            .with("version", self.version.as_str())
            .with("release_date", date(&self.release_date))
            .with("significance", self.significance.map(|s| s.as_str()))
            .with("categories", self.categories.clone())
            .with("release_notes", self.release_notes.clone())
    }
}

// Reviews

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub competitor: Competitor,
    pub platform: Platform,
    #[serde(default)]
    pub author: Option<String>,
    pub rating: u32,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub review_date: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ToRow for Review {
    fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("competitor", self.competitor.name.as_str())
            .with("competitor_id", self.competitor.id.as_str())
            .with("platform", self.platform.as_str())
            .with("author", self.author.clone())
            .with("rating", self.rating)
            .with("role", self.role.as_str())
            .with("sentiment", self.sentiment.as_str())
            .with("categories", self.categories.clone())
            .with("review_date", date(&self.review_date))
            .with("text", self.text.clone())
    }
}

// News

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub competitors_mentioned: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub relevance_score: Option<f64>,
    #[serde(default)]
    pub search_query: Option<String>,
    #[serde(default)]
    pub collected_at: Option<String>,
}

impl ToRow for NewsItem {
    fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("title", self.title.as_str())
            .with("source_name", self.source_name.clone())
            .with("published_date", date(&self.published_date))
            .with("competitors_mentioned", self.competitors_mentioned.clone())
            .with("topics", self.topics.clone())
            .with("sentiment", self.sentiment.map(|s| s.as_str()))
            .with("relevance_score", self.relevance_score)
            .with("source_url", self.source_url.clone())
            .with("summary", self.summary.clone())
    }
}

/// Body of `POST /api/news/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitors: Option<Vec<String>>,
    pub language: String,
}

// Collection

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSource {
    pub task_name: String,
    pub competitor: String,
    pub source_type: String,
    #[serde(default)]
    pub last_success: Option<String>,
    #[serde(default)]
    pub last_status: SourceStatus,
    #[serde(default)]
    pub items_collected: u64,
    #[serde(default)]
    pub url: Option<String>,
}

impl ToRow for CollectionSource {
    fn to_row(&self) -> Row {
        Row::new()
            .with("task_name", self.task_name.as_str())
            .with("competitor", self.competitor.as_str())
            .with("source_type", self.source_type.as_str())
            .with("last_status", self.last_status.as_str())
            .with("last_success", date(&self.last_success))
            .with("items_collected", self.items_collected)
    }
}

/// `GET /api/collection/status` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionStatus {
    pub sources: Vec<CollectionSource>,
    pub last_update: String,
    pub health: Health,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionLog {
    pub id: String,
    pub source_type: String,
    #[serde(default)]
    pub competitor: Option<Competitor>,
    pub task_name: String,
    #[serde(default)]
    pub url: Option<String>,
    pub status: RunStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub items_collected: u64,
    #[serde(default)]
    pub started_at: Option<String>,
    pub completed_at: String,
}

impl ToRow for CollectionLog {
    fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("task_name", self.task_name.as_str())
            .with(
                "competitor",
                self.competitor.as_ref().map(|c| c.name.clone()),
            )
            .with("source_type", self.source_type.as_str())
            .with("status", self.status.as_str())
            .with("items_collected", self.items_collected)
            .with("error_message", self.error_message.clone())
            .with("completed_at", Value::Date(self.completed_at.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionLogList {
    pub logs: Vec<CollectionLog>,
    pub total: u64,
}

// Dashboard

/// `GET /api/dashboard/summary` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub last_collection: Option<String>,
    pub new_releases_week: u64,
    pub new_reviews_week: u64,
    /// Active promo count per competitor name
    #[serde(default)]
    pub active_promos: BTreeMap<String, u64>,
    pub health_status: Health,
    pub tariff_changes_week: u64,
}

// Digest

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestMetadata {
    pub releases_count: u64,
    pub tariff_changes_count: u64,
    pub active_promos_count: u64,
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Digest {
    pub id: String,
    pub period_start: String,
    pub period_end: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: Option<DigestMetadata>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: String,
}

impl ToRow for Digest {
    fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("period_start", Value::Date(self.period_start.clone()))
            .with("period_end", Value::Date(self.period_end.clone()))
            .with(
                "releases_count",
                self.metadata.as_ref().map(|m| m.releases_count),
            )
            .with("created_at", Value::Date(self.created_at.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DigestList {
    pub digests: Vec<Digest>,
    pub total: u64,
}


// Trends and statistics

/// `GET /api/tariffs/history/{competitor_id}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffHistory {
    pub history: Vec<HistoryPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffChanges {
    pub changes: Vec<TariffChange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffChange {
    pub competitor: String,
    pub field: String,
    pub old_value: f64,
    pub new_value: f64,
    pub changed_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseTimeline {
    pub timeline: Vec<TimelineDay>,
}

/// Releases shipped on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineDay {
    pub date: String,
    pub releases: Vec<TimelineRelease>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRelease {
    pub competitor: String,
    pub platform: Platform,
    pub version: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub neutral: u64,
    #[serde(default)]
    pub negative: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorReviewStats {
    pub competitor: String,
    pub competitor_id: String,
    pub total: u64,
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub neutral: u64,
    #[serde(default)]
    pub negative: u64,
    /// `None` when the competitor has no rated reviews in the window
    #[serde(default)]
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrend {
    pub category: String,
    pub count: u64,
    pub change: f64,
}

/// `GET /api/reviews/stats` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total: u64,
    #[serde(default)]
    pub by_sentiment: SentimentCounts,
    #[serde(default)]
    pub by_competitor: Vec<CompetitorReviewStats>,
    #[serde(default)]
    pub trending_categories: Vec<CategoryTrend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewTrends {
    pub trends: Vec<ReviewTrend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewTrend {
    pub competitor: String,
    pub sentiment_change: f64,
    #[serde(default)]
    pub top_categories: Vec<String>,
}
