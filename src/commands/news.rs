use serde_json::json;

use super::{
    CommandOutput, Context, dim, heading, list_footer, load_list, rows_json, table_text, use_color,
};
use crate::api::NEWS_PATH;
use crate::cli::OutputOptions;
use crate::error::{Result, ScopeError};
use crate::filter::{FilterSet, Selection};
use crate::list::{ListController, RemoteSource};
use crate::models::NewsItem;
use crate::pages::{PageId, news};
use crate::search::{SEARCH_ERROR_MESSAGE, SearchDispatcher, SearchOutcome};
use crate::table::{ComparisonTable, Row};

pub struct NewsOptions {
    pub page: u32,
    /// Competitor slug as mentioned in articles, e.g. `uber`
    pub competitor: Option<String>,
}

/// Articles list competitors by lowercase slug.
fn competitor_selection(competitor: Option<&str>) -> Selection {
    match Selection::from_option(competitor.map(str::trim)) {
        Selection::Value(slug) => Selection::Value(slug.to_lowercase()),
        other => other,
    }
}

fn render_list(list: &ListController, color: bool) -> Result<(serde_json::Value, String)> {
    let visible: Vec<Row> = list.visible_items().into_iter().cloned().collect();
    let table = ComparisonTable::new(news::schema()?);
    let cursor = list.cursor();
    let json_output = json!({
        "items": rows_json(&visible),
        "page": cursor.page(),
        "pages": cursor.total_pages(),
        "total": cursor.total_items(),
    });
    let text = format!(
        "{}\n{}\n{}",
        heading(PageId::News, color),
        table_text(&table, &visible, color),
        list_footer(list, "articles", color)
    );
    Ok((json_output, text))
}

fn news_filters(competitor: Option<&str>) -> FilterSet {
    let mut filters = news::filters();
    filters.set(news::COMPETITOR_FILTER, competitor_selection(competitor));
    filters
}

/// Show one page of the news feed
pub async fn cmd_news(ctx: &Context, options: NewsOptions, output: OutputOptions) -> Result<()> {
    ctx.enter(PageId::News)?;

    let filters = news_filters(options.competitor.as_deref());
    let page_size = ctx.config().page_size;
    let list = if ctx.is_sample() {
        load_list(&news::sample_source(), filters, page_size, options.page).await?
    } else {
        let source: RemoteSource<NewsItem> = RemoteSource::new(ctx.client()?, NEWS_PATH);
        load_list(&source, filters, page_size, options.page).await?
    };

    let (json_output, text) = render_list(&list, use_color(output))?;
    CommandOutput::new(json_output).with_text(text).print(output)
}

/// Ask the backend to search for and ingest articles, then show page 1
pub async fn cmd_news_search(
    ctx: &Context,
    query: &str,
    competitor: Option<&str>,
    output: OutputOptions,
) -> Result<()> {
    ctx.enter(PageId::News)?;
    if ctx.is_sample() {
        return Err(ScopeError::invalid_input(
            "news search runs on the backend; drop --sample",
        ));
    }

    let client = ctx.client()?;
    let source: RemoteSource<NewsItem> = RemoteSource::new(client.clone(), NEWS_PATH);
    let selection = competitor_selection(competitor);
    let mut list = ListController::new(ctx.config().page_size, news_filters(competitor));
    let mut dispatcher = SearchDispatcher::new(ctx.config().search_language.clone());

    let outcome = dispatcher
        .search(&client, &mut list, &source, query, &selection)
        .await;
    let response = match outcome {
        SearchOutcome::Skipped => {
            return CommandOutput::new(json!({ "searched": false }))
                .with_text("Nothing to search for")
                .print(output);
        }
        SearchOutcome::Failed => {
            let message = dispatcher.error().unwrap_or(SEARCH_ERROR_MESSAGE);
            return Err(ScopeError::Other(message.to_string()));
        }
        SearchOutcome::Completed { response, .. } => response,
    };

    let color = use_color(output);
    let (list_json, list_text) = render_list(&list, color)?;
    let text = format!(
        "{}\n{list_text}",
        dim(&format!("Searched for \"{}\"", query.trim()), color)
    );
    CommandOutput::new(json!({
        "searched": true,
        "response": response,
        "news": list_json,
    }))
    .with_text(text)
    .print(output)
}

/// Trigger a manual news collection run on the backend
pub async fn cmd_collect(ctx: &Context, output: OutputOptions) -> Result<()> {
    ctx.enter(PageId::News)?;
    if ctx.is_sample() {
        return Err(ScopeError::invalid_input(
            "collection runs on the backend; drop --sample",
        ));
    }

    let response = ctx.client()?.collect_news().await?;
    let text = match response.get("message").and_then(|m| m.as_str()) {
        Some(message) => message.to_string(),
        None => "Collection started".to_string(),
    };
    CommandOutput::new(response).with_text(text).print(output)
}
