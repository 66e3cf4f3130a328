//! The binary against a canned backend. The server runs on the test runtime
//! while the CLI process is driven from a blocking task.

mod common;

use common::{CannedServer, ScopeTest};

async fn run_json(test: ScopeTest, args: &'static [&'static str]) -> (ScopeTest, serde_json::Value) {
    tokio::task::spawn_blocking(move || {
        let json = test.run_json(args);
        (test, json)
    })
    .await
    .unwrap()
}

async fn run_failure(test: ScopeTest, args: &'static [&'static str]) -> String {
    tokio::task::spawn_blocking(move || test.run_failure(args))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_news_pages_come_from_backend() {
    let server = CannedServer::start().await;
    server.respond(
        "GET",
        "/api/news",
        200,
        r#"{"items": [{"id": "a1", "title": "Uber raises fares", "competitors_mentioned": ["uber"]}],
            "total": 41, "page": 3, "pages": 3}"#,
    );

    let test = ScopeTest::new().with_env("RIVALSCOPE_API_URL", server.url());
    let (_, json) = run_json(test, &["news", "--page", "3", "--competitor", "Uber", "--json"]).await;

    assert_eq!(json["page"], 3);
    assert_eq!(json["total"], 41);
    assert_eq!(json["items"][0]["title"], "Uber raises fares");
    assert_eq!(
        server.requests()[0].query(),
        "page=3&limit=20&competitor=uber"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_list_load_is_reported() {
    let server = CannedServer::start().await;

    let test = ScopeTest::new().with_env("RIVALSCOPE_API_URL", server.url());
    let stderr = run_failure(test, &["news"]).await;
    assert!(stderr.contains("Failed to load data"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_session_token_reaches_backend() {
    let server = CannedServer::start().await;
    server.respond(
        "GET",
        "/api/tariffs/comparison",
        200,
        r#"{"comparison": [{"competitor": "Uber", "competitor_id": "2",
            "driver": {"commission_rate": 25.0}}],
            "updated_at": "2025-01-15T10:30:00Z"}"#,
    );

    let test = ScopeTest::new()
        .with_env("RIVALSCOPE_API_URL", server.url())
        .with_env("RIVALSCOPE_PUBLISHABLE_KEY", "pk_live_abc123")
        .with_env("RIVALSCOPE_SESSION_TOKEN", "sess_42");
    let (_, json) = run_json(test, &["tariffs", "--json"]).await;

    assert_eq!(json["rows"][0]["commission_rate"], 25.0);
    assert!(json["rows"][0]["signup_bonus"].is_null());
    let request = &server.requests()[0];
    assert_eq!(request.query(), "type=driver");
    assert_eq!(request.header("authorization"), Some("Bearer sess_42"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_digest_fetched_through_export() {
    let server = CannedServer::start().await;
    server.respond(
        "GET",
        "/api/digest/history",
        200,
        r#"{"digests": [
            {"id": "12", "period_start": "2025-01-08", "period_end": "2025-01-15", "created_at": "2025-01-15T14:30:00Z"},
            {"id": "11", "period_start": "2025-01-01", "period_end": "2025-01-07", "created_at": "2025-01-07T16:00:00Z"}
        ], "total": 2}"#,
    );
    server.respond("POST", "/api/digest/12/export", 200, "# Digest 12\n");

    let test = ScopeTest::new().with_env("RIVALSCOPE_API_URL", server.url());
    let (test, json) = run_json(test, &["digest", "--out", "latest.md", "--json"]).await;

    assert_eq!(json["digest_id"], "12");
    assert_eq!(test.read_file("latest.md").unwrap(), "# Digest 12\n");
    let export = server
        .requests()
        .into_iter()
        .find(|r| r.method == "POST")
        .unwrap();
    assert_eq!(export.path(), "/api/digest/12/export");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_digest_history_has_nothing_to_export() {
    let server = CannedServer::start().await;
    server.respond("GET", "/api/digest/history", 200, r#"{"digests": [], "total": 0}"#);

    let test = ScopeTest::new().with_env("RIVALSCOPE_API_URL", server.url());
    let stderr = run_failure(test, &["digest", "--out"]).await;
    assert!(stderr.contains("nothing to export"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_news_search_shows_first_page() {
    let server = CannedServer::start().await;
    server.respond("POST", "/api/news/search", 200, r#"{"ingested": 1}"#);
    server.respond(
        "GET",
        "/api/news",
        200,
        r#"{"items": [{"id": "s1", "title": "DiDi cuts commission"}], "total": 1, "page": 1, "pages": 1}"#,
    );

    let test = ScopeTest::new().with_env("RIVALSCOPE_API_URL", server.url());
    let (_, json) = run_json(test, &["news-search", "didi comision", "--json"]).await;

    assert_eq!(json["searched"], true);
    assert_eq!(json["response"]["ingested"], 1);
    assert_eq!(json["news"]["items"][0]["id"], "s1");
    let search = server
        .requests()
        .into_iter()
        .find(|r| r.method == "POST")
        .unwrap();
    let body: serde_json::Value = serde_json::from_str(&search.body).unwrap();
    assert_eq!(body["query"], "didi comision");
    assert_eq!(body["language"], "es");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_release_filters_reach_backend() {
    let server = CannedServer::start().await;
    server.respond(
        "GET",
        "/api/releases",
        200,
        r#"{"releases": [{"id": "r22", "competitor": {"id": "2", "name": "Uber"},
            "platform": "ios", "version": "4.530"}],
            "total": 1, "page": 1, "pages": 1}"#,
    );

    let test = ScopeTest::new().with_env("RIVALSCOPE_API_URL", server.url());
    let (_, json) = run_json(test, &["releases", "--platform", "ios", "--json"]).await;

    assert_eq!(json["total"], 1);
    assert_eq!(json["releases"][0]["version"], "4.530");
    assert_eq!(server.requests()[0].query(), "page=1&limit=20&platform=ios");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_review_filters_skip_period_stats() {
    let server = CannedServer::start().await;
    server.respond(
        "GET",
        "/api/reviews",
        200,
        r#"{"items": [{"id": "v1", "competitor": {"id": "4", "name": "Cabify"},
            "platform": "android", "rating": 1, "role": "rider",
            "sentiment": "negative", "categories": ["support"]}],
            "total": 1, "page": 1, "pages": 1}"#,
    );

    let test = ScopeTest::new().with_env("RIVALSCOPE_API_URL", server.url());
    let (_, json) = run_json(test, &["reviews", "--sentiment", "negative", "--json"]).await;

    assert_eq!(json["breakdown_scope"], "page");
    assert_eq!(json["breakdown"]["negative"], 1);
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query(), "page=1&limit=20&sentiment=negative");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_review_breakdown_covers_the_period() {
    let server = CannedServer::start().await;
    server.respond(
        "GET",
        "/api/reviews",
        200,
        r#"{"items": [{"id": "v1", "competitor": {"id": "2", "name": "Uber"},
            "platform": "ios", "rating": 5, "role": "rider",
            "sentiment": "positive", "categories": []}],
            "total": 30, "page": 1, "pages": 2}"#,
    );
    server.respond(
        "GET",
        "/api/reviews/stats",
        200,
        r#"{"total": 30, "by_sentiment": {"positive": 18, "neutral": 4, "negative": 8},
            "by_competitor": [], "trending_categories": []}"#,
    );

    let test = ScopeTest::new().with_env("RIVALSCOPE_API_URL", server.url());
    let (_, json) = run_json(test, &["reviews", "--json"]).await;

    assert_eq!(json["breakdown_scope"], "period");
    assert_eq!(json["breakdown"]["positive"], 18);
    assert_eq!(json["breakdown"]["negative"], 8);
    assert!(json["breakdown"]["average_rating"].is_null());
    let stats = server
        .requests()
        .into_iter()
        .find(|r| r.path() == "/api/reviews/stats")
        .unwrap();
    assert_eq!(stats.query(), "days=30");
}
