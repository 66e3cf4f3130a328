//! App releases: a server-paginated list, so every filter goes to the backend.

use crate::error::Result;
use crate::filter::{Filter, FilterSet};
use crate::formatting;
use crate::list::LocalSource;
use crate::models::Release;
use crate::sample;
use crate::table::{Column, Schema, ToRow};

pub const COMPETITOR_FILTER: &str = "competitor";
pub const PLATFORM_FILTER: &str = "platform";
pub const CATEGORY_FILTER: &str = "category";

pub fn schema() -> Result<Schema> {
    Schema::new(vec![
        Column::new("release_date", "Date").format_with(formatting::date()),
        Column::new("competitor", "Competitor"),
        Column::new("platform", "Platform"),
        Column::new("version", "Version"),
        Column::new("significance", "Significance"),
        Column::new("categories", "Categories")
            .unsortable()
            .format_with(formatting::labels()),
    ])
}

pub fn filters() -> FilterSet {
    FilterSet::new(vec![
        Filter::server(COMPETITOR_FILTER, "competitor_id").with_param("competitor_id"),
        Filter::server(PLATFORM_FILTER, "platform"),
        Filter::server(CATEGORY_FILTER, "categories"),
    ])
}

/// The built-in releases behind the backend's query parameters.
pub fn sample_source() -> LocalSource {
    LocalSource::new(sample::releases().iter().map(Release::to_row).collect())
        .map_param(CATEGORY_FILTER, "categories")
}
