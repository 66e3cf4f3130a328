//! Built-in demo data for running the console without a backend.

use std::collections::BTreeMap;

use crate::models::{
    CollectionLog, CollectionSource, CollectionStatus, ComparisonEntry, Competitor,
    DashboardSummary, Digest, DigestMetadata, DriverFigures, NewsItem, Promo, Release, Review,
    RiderFigures, TariffComparison,
};
use crate::types::{
    DiscountType, Health, Platform, Role, RunStatus, Sentiment, Significance, SourceStatus,
};

const UPDATED_AT: &str = "2025-01-15T10:30:00Z";

pub fn competitors() -> Vec<Competitor> {
    vec![
        Competitor::new("1", "InDriver"),
        Competitor::new("2", "Uber"),
        Competitor::new("3", "Didi"),
        Competitor::new("4", "Cabify"),
    ]
}

fn competitor(id: &str) -> Competitor {
    competitors()
        .into_iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| Competitor::new(id, id))
}

pub fn tariff_comparison() -> TariffComparison {
    let figures = [
        ("1", 10.0, 150.0, 30.0, 3.5, 1.2, 0.3),
        ("2", 25.0, 200.0, 50.0, 4.5, 1.8, 0.4),
        ("3", 15.0, 180.0, 40.0, 3.8, 1.4, 0.35),
        ("4", 20.0, 100.0, 25.0, 5.0, 2.0, 0.45),
    ];
    TariffComparison {
        comparison: figures
            .into_iter()
            .map(|(id, commission, signup, referral, base, km, min)| {
                let c = competitor(id);
                ComparisonEntry {
                    competitor: c.name,
                    competitor_id: c.id,
                    logo_url: None,
                    driver: Some(DriverFigures {
                        commission_rate: commission,
                        signup_bonus: Some(signup),
                        referral_bonus: Some(referral),
                    }),
                    rider: Some(RiderFigures {
                        base_fare: Some(base),
                        per_km_rate: Some(km),
                        per_min_rate: Some(min),
                    }),
                }
            })
            .collect(),
        updated_at: UPDATED_AT.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn promo(
    id: &str,
    competitor_id: &str,
    title: &str,
    discount_type: DiscountType,
    value: f64,
    valid_until: &str,
    conditions: &str,
    target: Role,
    is_active: bool,
) -> Promo {
    Promo {
        id: id.to_string(),
        competitor: competitor(competitor_id),
        title: title.to_string(),
        description: None,
        code: None,
        discount_type,
        discount_value: Some(value),
        valid_from: None,
        valid_until: Some(valid_until.to_string()),
        conditions: Some(conditions.to_string()),
        target_audience: target,
        is_active,
        collected_at: Some(UPDATED_AT.to_string()),
    }
}

pub fn promos() -> Vec<Promo> {
    vec![
        promo(
            "1",
            "1",
            "30% off your first 3 rides",
            DiscountType::Percent,
            30.0,
            "2025-01-31",
            "New users only",
            Role::Rider,
            true,
        ),
        promo(
            "2",
            "4",
            "Free ride up to S/15",
            DiscountType::FreeRide,
            15.0,
            "2025-02-15",
            "Sign up with promo code CABIFY2025",
            Role::Rider,
            true,
        ),
        promo(
            "3",
            "2",
            "S/100 bonus for your first 20 trips",
            DiscountType::Fixed,
            100.0,
            "2025-01-20",
            "New drivers only",
            Role::Driver,
            true,
        ),
        promo(
            "4",
            "3",
            "15% cashback",
            DiscountType::Percent,
            15.0,
            "2024-12-31",
            "Friday rides",
            Role::Rider,
            false,
        ),
    ]
}

fn release(
    id: &str,
    competitor_id: &str,
    platform: Platform,
    version: &str,
    date: &str,
    notes: &str,
    categories: &[&str],
    significance: Significance,
) -> Release {
    Release {
        id: id.to_string(),
        competitor: competitor(competitor_id),
        platform,
        version: version.to_string(),
        release_date: Some(date.to_string()),
        release_notes: Some(notes.to_string()),
        rating: None,
        categories: categories.iter().map(|c| c.to_string()).collect(),
        significance: Some(significance),
    }
}

pub fn releases() -> Vec<Release> {
    vec![
        release(
            "1",
            "1",
            Platform::Ios,
            "5.12.3",
            "2025-01-14",
            "Improved app stability, fixed order acceptance errors",
            &["ux_ui", "driver_exp"],
            Significance::Minor,
        ),
        release(
            "2",
            "2",
            Platform::Android,
            "4.521",
            "2025-01-13",
            "New safety feature: automatic SOS on long unexpected stops",
            &["safety"],
            Significance::Major,
        ),
        release(
            "3",
            "3",
            Platform::Ios,
            "7.2.1",
            "2025-01-12",
            "Refreshed map interface, new payment methods",
            &["ux_ui", "rider_exp"],
            Significance::Minor,
        ),
        release(
            "4",
            "1",
            Platform::Android,
            "5.12.2",
            "2025-01-10",
            "Bug fixes",
            &["other"],
            Significance::Bugfix,
        ),
        release(
            "5",
            "4",
            Platform::Ios,
            "8.15.0",
            "2025-01-08",
            "New loyalty program for riders",
            &["promo", "rider_exp"],
            Significance::Major,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn review(
    id: &str,
    competitor_id: &str,
    platform: Platform,
    author: Option<&str>,
    rating: u32,
    text: &str,
    date: &str,
    role: Role,
    sentiment: Sentiment,
    categories: &[&str],
) -> Review {
    Review {
        id: id.to_string(),
        competitor: competitor(competitor_id),
        platform,
        author: author.map(str::to_string),
        rating,
        text: Some(text.to_string()),
        review_date: Some(date.to_string()),
        role,
        sentiment,
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn reviews() -> Vec<Review> {
    vec![
        review(
            "1",
            "2",
            Platform::Ios,
            Some("Maria G."),
            5,
            "Great! The driver arrived on time and the car was clean",
            "2025-01-14T10:00:00Z",
            Role::Rider,
            Sentiment::Positive,
            &["driver_behavior"],
        ),
        review(
            "2",
            "1",
            Platform::Android,
            Some("Pedro L."),
            2,
            "The app keeps crashing, impossible to use",
            "2025-01-13T15:30:00Z",
            Role::Driver,
            Sentiment::Negative,
            &["app_stability"],
        ),
        review(
            "3",
            "3",
            Platform::Ios,
            None,
            4,
            "Good prices, but long waits for a car",
            "2025-01-12T08:00:00Z",
            Role::Rider,
            Sentiment::Neutral,
            &["pricing", "wait_time"],
        ),
        review(
            "4",
            "4",
            Platform::Android,
            Some("Ana R."),
            1,
            "Terrible support! A month and still no refund for a cancelled ride",
            "2025-01-11T12:00:00Z",
            Role::Rider,
            Sentiment::Negative,
            &["support", "payment"],
        ),
        review(
            "5",
            "2",
            Platform::Android,
            Some("Carlos M."),
            5,
            "Best app for drivers, easy to use",
            "2025-01-10T09:00:00Z",
            Role::Driver,
            Sentiment::Positive,
            &["other"],
        ),
    ]
}

/// Enough articles to span several pages at the default page size.
pub fn news() -> Vec<NewsItem> {
    let headlines = [
        ("uber", "Uber expands Uber Moto to more districts of Lima", "expansion", Sentiment::Neutral),
        ("didi", "DiDi cuts driver commission to 15% in Peru", "pricing", Sentiment::Positive),
        ("indriver", "InDriver launches new safety center for riders", "safety", Sentiment::Positive),
        ("cabify", "Cabify faces complaints over delayed refunds", "regulation", Sentiment::Negative),
        ("uber", "Uber drivers protest new fare algorithm", "drivers", Sentiment::Negative),
        ("didi", "DiDi announces weekend promo for new riders", "promo", Sentiment::Neutral),
    ];
    (0..25)
        .map(|i| {
            let (competitor, title, topic, sentiment) = headlines[i % headlines.len()];
            let day = 15 - (i / 2) as u32;
            NewsItem {
                id: format!("n{}", i + 1),
                title: format!("{title} ({})", i / headlines.len() + 1),
                summary: Some(format!("Coverage of {competitor} in the Peruvian ride-hailing market.")),
                source_url: Some(format!("https://news.example.pe/{competitor}/{}", i + 1)),
                source_name: Some("Gestion".to_string()),
                published_date: Some(format!("2025-01-{day:02}")),
                competitors_mentioned: vec![competitor.to_string()],
                topics: vec![topic.to_string()],
                sentiment: Some(sentiment),
                relevance_score: Some(0.5 + (i % 5) as f64 / 10.0),
                search_query: None,
                collected_at: Some(UPDATED_AT.to_string()),
            }
        })
        .collect()
}

fn source(
    task_name: &str,
    competitor: &str,
    source_type: &str,
    last_success: &str,
    last_status: SourceStatus,
    items_collected: u64,
    url: &str,
) -> CollectionSource {
    CollectionSource {
        task_name: task_name.to_string(),
        competitor: competitor.to_string(),
        source_type: source_type.to_string(),
        last_success: Some(last_success.to_string()),
        last_status,
        items_collected,
        url: Some(url.to_string()),
    }
}

pub fn collection_status() -> CollectionStatus {
    use SourceStatus::*;
    let sources = vec![
        source("indriver-driver-pe", "InDriver", "website", "2025-01-15T10:30:00Z", Success, 12, "https://indriver.com/pe/driver"),
        source("uber-driver-pe", "Uber", "website", "2025-01-15T10:25:00Z", Success, 8, "https://uber.com/pe/es/drive"),
        source("didi-driver-pe", "Didi", "website", "2025-01-15T09:00:00Z", Warning, 5, "https://web.didiglobal.com/pe/driver"),
        source("cabify-driver-pe", "Cabify", "website", "2025-01-14T18:00:00Z", Failed, 0, "https://cabify.com/pe/driver"),
        source("appstore-indriver", "InDriver", "appstore", "2025-01-15T08:00:00Z", Success, 45, "https://apps.apple.com/pe/app/id1018263498"),
        source("appstore-uber", "Uber", "appstore", "2025-01-15T08:00:00Z", Success, 38, "https://apps.apple.com/pe/app/id368677368"),
        source("playstore-indriver", "InDriver", "playstore", "2025-01-15T08:15:00Z", Success, 62, "https://play.google.com/store/apps/details?id=sinet.startup.inDriver"),
        source("playstore-uber", "Uber", "playstore", "2025-01-15T08:15:00Z", Success, 55, "https://play.google.com/store/apps/details?id=com.ubercab"),
    ];
    CollectionStatus {
        sources,
        last_update: UPDATED_AT.to_string(),
        health: Health::Warning,
    }
}

pub fn collection_logs() -> Vec<CollectionLog> {
    let logs = [
        ("1", "cabify-driver-pe", "4", "website", RunStatus::Failed, Some("Connection timeout: no response within 30 seconds"), 0, "2025-01-15T12:30:00Z"),
        ("2", "indriver-driver-pe", "1", "website", RunStatus::Success, None, 12, "2025-01-15T10:30:00Z"),
        ("3", "uber-driver-pe", "2", "website", RunStatus::Success, None, 8, "2025-01-15T10:25:00Z"),
        ("4", "didi-driver-pe", "3", "website", RunStatus::Partial, Some("Could not read bonus figures"), 5, "2025-01-15T09:00:00Z"),
        ("5", "playstore-indriver", "1", "playstore", RunStatus::Success, None, 62, "2025-01-15T08:15:00Z"),
    ];
    logs.into_iter()
        .map(|(id, task, competitor_id, source_type, status, error, items, completed)| CollectionLog {
            id: id.to_string(),
            source_type: source_type.to_string(),
            competitor: Some(competitor(competitor_id)),
            task_name: task.to_string(),
            url: None,
            status,
            error_message: error.map(str::to_string),
            items_collected: items,
            started_at: None,
            completed_at: completed.to_string(),
        })
        .collect()
}

pub fn dashboard_summary() -> DashboardSummary {
    DashboardSummary {
        last_collection: Some(UPDATED_AT.to_string()),
        new_releases_week: 5,
        new_reviews_week: 127,
        active_promos: BTreeMap::from([
            ("cabify".to_string(), 1),
            ("didi".to_string(), 3),
            ("indriver".to_string(), 2),
            ("uber".to_string(), 1),
        ]),
        health_status: Health::Healthy,
        tariff_changes_week: 2,
    }
}

pub const DIGEST_CONTENT: &str = "# Digest for January 8-15, 2025

## Key events

- **Didi cut its commission** from 18% to 15%, an aggressive move to attract drivers
- **Uber launched a new safety feature**: automatic SOS on long stops
- **Cabify introduced a loyalty program**: points for every ride

## New releases

### InDriver
- **iOS 5.12.3** (Jan 14): improved stability, fixed order acceptance errors
- **Android 5.12.2** (Jan 10): bugfix release

### Uber
- **Android 4.521** (Jan 13): **Major**, automatic SOS safety feature

### Didi
- **iOS 7.2.1** (Jan 12): refreshed map interface, new payment methods

### Cabify
- **iOS 8.15.0** (Jan 8): **Major**, new rider loyalty program

## Tariff changes

| Competitor | Field | Before | After | Change |
|------------|-------|--------|-------|--------|
| Didi | Driver commission | 18% | 15% | -3% |

## Active promotions

| Competitor | Promotion | Discount | Valid until |
|------------|-----------|----------|-------------|
| InDriver | 30% off first 3 rides | 30% | 2025-01-31 |
| Cabify | Free ride up to S/15 | S/15 | 2025-02-15 |
| Uber | S/100 bonus for 20 trips | S/100 | 2025-01-20 |

## Review trends

### Negative
- **InDriver**: more complaints about app stability (+20% week over week)
- **Cabify**: support and refund problems

### Positive
- **Uber**: praise for the new safety features
- **Didi**: positive reaction to the commission cut
";

pub fn digest_history() -> Vec<Digest> {
    let entries = [
        ("1", "2025-01-08", "2025-01-15", "2025-01-15T14:30:00Z", 5, 1, 3),
        ("2", "2025-01-01", "2025-01-07", "2025-01-07T16:00:00Z", 3, 0, 2),
        ("3", "2024-12-25", "2024-12-31", "2024-12-31T12:00:00Z", 2, 2, 4),
    ];
    entries
        .into_iter()
        .map(|(id, start, end, created, releases, changes, promos)| Digest {
            id: id.to_string(),
            period_start: start.to_string(),
            period_end: end.to_string(),
            content: if id == "1" {
                DIGEST_CONTENT.to_string()
            } else {
                String::new()
            },
            metadata: Some(DigestMetadata {
                releases_count: releases,
                tariff_changes_count: changes,
                active_promos_count: promos,
                model: String::new(),
            }),
            created_by: None,
            created_at: created.to_string(),
        })
        .collect()
}
