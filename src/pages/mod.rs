//! Console pages: the route of each page, its table schema and its filters.

pub mod collection;
pub mod digest;
pub mod news;
pub mod promos;
pub mod releases;
pub mod reviews;
pub mod tariffs;

use serde::Serialize;

use crate::enum_display_fromstr;
use crate::error::{Result, ScopeError};
use crate::models::Competitor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Dashboard,
    Tariffs,
    Promos,
    Releases,
    Reviews,
    News,
    Collection,
    Digest,
}

enum_display_fromstr!(PageId, ScopeError::UnknownPage, {
    Dashboard => "dashboard",
    Tariffs => "tariffs",
    Promos => "promos",
    Releases => "releases",
    Reviews => "reviews",
    News => "news",
    Collection => "collection",
    Digest => "digest",
});

impl PageId {
    pub const ALL: [PageId; 8] = [
        PageId::Dashboard,
        PageId::Tariffs,
        PageId::Promos,
        PageId::Releases,
        PageId::Reviews,
        PageId::News,
        PageId::Collection,
        PageId::Digest,
    ];

    /// Route checked by the auth guard. The dashboard lives at `/`.
    pub fn route(self) -> &'static str {
        match self {
            PageId::Dashboard => "/",
            PageId::Tariffs => "/tariffs",
            PageId::Promos => "/promos",
            PageId::Releases => "/releases",
            PageId::Reviews => "/reviews",
            PageId::News => "/news",
            PageId::Collection => "/collection",
            PageId::Digest => "/digest",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PageId::Dashboard => "Dashboard",
            PageId::Tariffs => "Tariffs",
            PageId::Promos => "Promotions",
            PageId::Releases => "App releases",
            PageId::Reviews => "Reviews",
            PageId::News => "News",
            PageId::Collection => "Data collection",
            PageId::Digest => "Weekly digest",
        }
    }

    pub fn from_route(route: &str) -> Result<Self> {
        let trimmed = route.trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(PageId::Dashboard);
        }
        PageId::ALL
            .into_iter()
            .find(|page| page.route() == trimmed)
            .ok_or_else(|| ScopeError::UnknownPage(route.to_string()))
    }
}

/// Resolve a user-supplied competitor (id, name or slug, any case) to its id.
pub fn resolve_competitor(competitors: &[Competitor], input: &str) -> Result<String> {
    let needle = input.trim();
    competitors
        .iter()
        .find(|c| {
            c.id == needle || c.name.eq_ignore_ascii_case(needle) || c.slug.eq_ignore_ascii_case(needle)
        })
        .map(|c| c.id.clone())
        .ok_or_else(|| {
            let known: Vec<&str> = competitors.iter().map(|c| c.name.as_str()).collect();
            ScopeError::invalid_input(format!(
                "unknown competitor '{input}', expected one of: {}",
                known.join(", ")
            ))
        })
}
