use serde_json::json;

use super::{
    CommandOutput, Context, heading, list_footer, load_list, rows_json, table_text, use_color,
};
use crate::api::RELEASES_PATH;
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::filter::Selection;
use crate::list::{ListController, RemoteSource};
use crate::models::Release;
use crate::pages::{PageId, releases};
use crate::table::{ComparisonTable, Row};
use crate::types::Platform;

pub struct ReleaseOptions {
    pub competitor: Option<String>,
    pub platform: Option<Platform>,
    pub category: Option<String>,
    pub page: u32,
}

/// List competitor app releases
pub async fn cmd_releases(
    ctx: &Context,
    options: ReleaseOptions,
    output: OutputOptions,
) -> Result<()> {
    ctx.enter(PageId::Releases)?;

    let mut filters = releases::filters();
    filters.set(
        releases::COMPETITOR_FILTER,
        ctx.competitor_selection(options.competitor.as_deref()).await?,
    );
    filters.set(
        releases::PLATFORM_FILTER,
        Selection::from_option(options.platform.map(|p| p.as_str())),
    );
    filters.set(
        releases::CATEGORY_FILTER,
        Selection::from_option(options.category.as_deref()),
    );

    let page_size = ctx.config().page_size;
    let list: ListController = if ctx.is_sample() {
        load_list(&releases::sample_source(), filters, page_size, options.page).await?
    } else {
        let source: RemoteSource<Release> = RemoteSource::new(ctx.client()?, RELEASES_PATH);
        load_list(&source, filters, page_size, options.page).await?
    };

    let visible: Vec<Row> = list.visible_items().into_iter().cloned().collect();
    let color = use_color(output);
    let table = ComparisonTable::new(releases::schema()?);
    let text = format!(
        "{}\n{}\n{}",
        heading(PageId::Releases, color),
        table_text(&table, &visible, color),
        list_footer(&list, "releases", color)
    );

    let cursor = list.cursor();
    CommandOutput::new(json!({
        "releases": rows_json(&visible),
        "page": cursor.page(),
        "pages": cursor.total_pages(),
        "total": cursor.total_items(),
    }))
    .with_text(text)
    .print(output)
}

