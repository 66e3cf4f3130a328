//! Client for the intelligence backend's REST API.
//!
//! All calls are JSON over HTTP. A bearer token is attached when a session
//! token is configured; the token is kept in a [`SecretString`] and never
//! appears in `Debug` output or logs.

pub mod error;

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, Response, header};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{Result, ScopeError};
use crate::list::{ListQuery, Page};
use crate::models::{
    CollectionLogList, CollectionStatus, CompetitorList, DashboardSummary, Digest, DigestList,
    NewsItem, PromoList, Release, ReleaseTimeline, Review, ReviewStats, ReviewTrends,
    SearchRequest, TariffChanges, TariffComparison, TariffHistory,
};
use crate::types::{DigestFormat, RunStatus, TariffKind};

pub use error::{AttemptError, HttpFailure, RetryPolicy, execute_with_retry};

pub const NEWS_PATH: &str = "/api/news";
pub const NEWS_SEARCH_PATH: &str = "/api/news/search";
pub const NEWS_COLLECT_PATH: &str = "/api/news/collect";
pub const RELEASES_PATH: &str = "/api/releases";
pub const REVIEWS_PATH: &str = "/api/reviews";

/// Filters for `GET /api/promos`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromoQuery {
    pub competitor_id: Option<String>,
    pub active_only: bool,
    pub target: Option<String>,
}

impl PromoQuery {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = &self.competitor_id {
            pairs.push(("competitor_id".to_string(), id.clone()));
        }
        if self.active_only {
            pairs.push(("active_only".to_string(), "true".to_string()));
        }
        if let Some(target) = &self.target {
            pairs.push(("target".to_string(), target.clone()));
        }
        pairs
    }
}

/// `id` as a single path segment.
fn path_id<'a>(kind: &str, id: &'a str) -> Result<&'a str> {
    if id.is_empty() || id.contains('/') {
        return Err(ScopeError::invalid_input(format!("invalid {kind} id '{id}'")));
    }
    Ok(id)
}

fn days_pair(days: u32) -> (String, String) {
    ("days".to_string(), days.to_string())
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<SecretString>,
    retry: RetryPolicy,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("retry", &self.retry)
            .finish()
    }
}

impl ApiClient {
    /// Create a client for `base_url` with the given total request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
            retry: RetryPolicy::default(),
        })
    }

    /// Create a client from configuration, attaching the session token if any.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(&config.api_url(), config.request_timeout())?;
        Ok(match config.session_token() {
            Some(token) => client.with_token(token),
            None => client,
        })
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url` + `path`, with `pairs` appended as query parameters.
    pub fn endpoint(&self, path: &str, pairs: &[(String, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response> {
        tracing::debug!(%method, %url, "backend request");

        // POSTs start backend work (ingest, collection runs); send them once.
        let policy = if method == Method::GET {
            self.retry
        } else {
            RetryPolicy::none()
        };
        let response = execute_with_retry(policy, || {
            let mut request = self
                .client
                .request(method.clone(), url.clone())
                .header(
                    header::CONTENT_TYPE,
                    header::HeaderValue::from_static("application/json"),
                );
            if let Some(token) = &self.token {
                request = request.bearer_auth(token.expose_secret());
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            async move {
                let response = request.send().await?;
                if !response.status().is_success() {
                    return Err(AttemptError::Http(HttpFailure::from_response(response).await));
                }
                Ok(response)
            }
        })
        .await?;

        Ok(response)
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        pairs: &[(String, String)],
    ) -> Result<T> {
        let url = self.endpoint(path, pairs)?;
        let response = self.send::<()>(Method::GET, url, None).await?;
        Ok(response.json().await?)
    }

    /// POST `body` to `path` and decode the JSON reply.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.endpoint(path, &[])?;
        let response = self.send(Method::POST, url, body).await?;
        Ok(response.json().await?)
    }

    // News

    pub async fn news(&self, query: &ListQuery) -> Result<Page<NewsItem>> {
        self.get_json(NEWS_PATH, &query.to_query_pairs()).await
    }

    /// Search-and-ingest. The reply shape is backend-defined and passed through.
    pub async fn search_news(&self, request: &SearchRequest) -> Result<serde_json::Value> {
        self.post_json(NEWS_SEARCH_PATH, Some(request)).await
    }

    /// Trigger a manual news collection run.
    pub async fn collect_news(&self) -> Result<serde_json::Value> {
        self.post_json::<(), _>(NEWS_COLLECT_PATH, None).await
    }

    // Dashboard and tariffs

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        self.get_json("/api/dashboard/summary", &[]).await
    }

    pub async fn tariff_comparison(&self, kind: Option<TariffKind>) -> Result<TariffComparison> {
        let pairs: Vec<(String, String)> = kind
            .map(|k| vec![("type".to_string(), k.to_string())])
            .unwrap_or_default();
        self.get_json("/api/tariffs/comparison", &pairs).await
    }

    pub async fn tariff_history(&self, competitor_id: &str, days: u32) -> Result<TariffHistory> {
        let id = path_id("competitor", competitor_id)?;
        self.get_json(&format!("/api/tariffs/history/{id}"), &[days_pair(days)])
            .await
    }

    pub async fn tariff_changes(&self, days: u32) -> Result<TariffChanges> {
        self.get_json("/api/tariffs/changes", &[days_pair(days)]).await
    }

    // Promos, releases and reviews

    pub async fn promos(&self, query: &PromoQuery) -> Result<PromoList> {
        self.get_json("/api/promos", &query.to_query_pairs()).await
    }

    pub async fn releases(&self, query: &ListQuery) -> Result<Page<Release>> {
        self.get_json(RELEASES_PATH, &query.to_query_pairs()).await
    }

    pub async fn reviews(&self, query: &ListQuery) -> Result<Page<Review>> {
        self.get_json(REVIEWS_PATH, &query.to_query_pairs()).await
    }

    pub async fn release_timeline(&self, days: u32) -> Result<ReleaseTimeline> {
        self.get_json("/api/releases/timeline", &[days_pair(days)]).await
    }

    /// Period-wide review counts, optionally for one competitor.
    pub async fn review_stats(&self, competitor_id: Option<&str>, days: u32) -> Result<ReviewStats> {
        let mut pairs = Vec::new();
        if let Some(id) = competitor_id {
            pairs.push(("competitor_id".to_string(), id.to_string()));
        }
        pairs.push(days_pair(days));
        self.get_json("/api/reviews/stats", &pairs).await
    }

    pub async fn review_trends(&self, days: u32) -> Result<ReviewTrends> {
        self.get_json("/api/reviews/trends", &[days_pair(days)]).await
    }

    // Digest

    pub async fn digest_history(&self) -> Result<DigestList> {
        self.get_json("/api/digest/history", &[]).await
    }

    pub async fn digest(&self, id: &str) -> Result<Digest> {
        let id = path_id("digest", id)?;
        self.get_json(&format!("/api/digest/{id}"), &[]).await
    }

    /// Export a digest; returns the raw document bytes.
    pub async fn export_digest(&self, id: &str, format: DigestFormat) -> Result<Vec<u8>> {
        let id = path_id("digest", id)?;
        let url = self.endpoint(&format!("/api/digest/{id}/export"), &[])?;
        let body = serde_json::json!({ "format": format });
        let response = self.send(Method::POST, url, Some(&body)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    // Collection

    pub async fn collection_status(&self) -> Result<CollectionStatus> {
        self.get_json("/api/collection/status", &[]).await
    }

    pub async fn collection_logs(
        &self,
        status: Option<RunStatus>,
        days: Option<u32>,
    ) -> Result<CollectionLogList> {
        let mut pairs = Vec::new();
        if let Some(status) = status {
            pairs.push(("status".to_string(), status.to_string()));
        }
        if let Some(days) = days {
            pairs.push(("days".to_string(), days.to_string()));
        }
        self.get_json("/api/collection/logs", &pairs).await
    }

    pub async fn competitors(&self) -> Result<CompetitorList> {
        self.get_json("/api/competitors", &[]).await
    }
}
