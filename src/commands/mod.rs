//! Command implementations behind the CLI.
//!
//! Every command enters its page through [`Context::enter`] (the auth
//! guard), reads either the built-in sample data or the backend, and hands a
//! [`CommandOutput`] to the printer.

mod collection;
mod config;
mod dashboard;
mod digest;
mod news;
mod promos;
mod releases;
mod reviews;
mod tariffs;

pub use collection::cmd_collection;
pub use config::{cmd_config_set, cmd_config_show};
pub use dashboard::cmd_dashboard;
pub use digest::cmd_digest;
pub use news::{NewsOptions, cmd_collect, cmd_news, cmd_news_search};
pub use promos::{PromoOptions, cmd_promos};
pub use releases::{ReleaseOptions, cmd_releases};
pub use reviews::{ReviewOptions, cmd_reviews};
pub use tariffs::{TariffOptions, cmd_tariffs};

use std::io::IsTerminal;

use owo_colors::OwoColorize;
use serde_json::json;

use crate::api::ApiClient;
use crate::auth::AuthConfig;
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::{Result, ScopeError};
use crate::filter::{FilterSet, Selection};
use crate::list::{FetchState, ListController, ListSource};
use crate::models::Competitor;
use crate::pages::{self, PageId};
use crate::sample;
use crate::table::{ComparisonTable, LEGEND, Row};

/// A command's result in both output shapes.
pub struct CommandOutput {
    json: serde_json::Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: serde_json::Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print to stdout. Without a text form the JSON is printed either way.
    pub fn print(self, output: OutputOptions) -> Result<()> {
        match (output.json, self.text) {
            (false, Some(text)) => println!("{text}"),
            _ => println!("{}", serde_json::to_string_pretty(&self.json)?),
        }
        Ok(())
    }
}

/// Everything a command needs besides its own arguments.
pub struct Context {
    config: Config,
    sample: bool,
}

impl Context {
    pub fn new(config: Config, sample: bool) -> Self {
        Self { config, sample }
    }

    pub fn load(sample: bool) -> Result<Self> {
        Ok(Self::new(Config::load()?, sample))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_sample(&self) -> bool {
        self.sample
    }

    /// Run the auth guard for `page`.
    pub fn enter(&self, page: PageId) -> Result<()> {
        let session = self.config.session_token();
        AuthConfig::from_config(&self.config).guard(page.route(), session.as_ref())
    }

    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::from_config(&self.config)
    }

    pub async fn competitors(&self) -> Result<Vec<Competitor>> {
        if self.sample {
            return Ok(sample::competitors());
        }
        Ok(self.client()?.competitors().await?.competitors)
    }

    /// `--competitor` value as a filter selection on competitor id.
    pub async fn competitor_selection(&self, competitor: Option<&str>) -> Result<Selection> {
        match Selection::from_option(competitor) {
            Selection::Value(input) => {
                let competitors = self.competitors().await?;
                Ok(Selection::Value(pages::resolve_competitor(&competitors, &input)?))
            }
            other => Ok(other),
        }
    }
}

/// Whether terminal output should carry color.
pub(crate) fn use_color(output: OutputOptions) -> bool {
    !output.json && std::io::stdout().is_terminal()
}

pub(crate) fn heading(page: PageId, color: bool) -> String {
    if color {
        page.title().cyan().bold().to_string()
    } else {
        page.title().to_string()
    }
}

pub(crate) fn dim(text: &str, color: bool) -> String {
    if color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

/// Table text, followed by the legend when any column highlights.
pub(crate) fn table_text(table: &ComparisonTable, rows: &[Row], color: bool) -> String {
    table.schema().validate(rows);
    let mut text = table.render(rows).to_terminal(color);
    let highlights = table
        .schema()
        .columns()
        .iter()
        .any(|c| c.highlight != crate::table::HighlightRule::None);
    if highlights && !rows.is_empty() {
        text.push('\n');
        text.push_str(&dim(LEGEND, color));
    }
    text
}

pub(crate) fn rows_json<'a>(rows: impl IntoIterator<Item = &'a Row>) -> serde_json::Value {
    json!(rows.into_iter().collect::<Vec<_>>())
}

/// Load `page` into a fresh list view. A failed load is reported as an error.
pub(crate) async fn load_list<S: ListSource>(
    source: &S,
    filters: FilterSet,
    page_size: u32,
    page: u32,
) -> Result<ListController> {
    let mut list = ListController::new(page_size, filters);
    list.fetch_page(source, page).await;
    if let FetchState::Error { message } = list.state() {
        return Err(ScopeError::Other(message.clone()));
    }
    Ok(list)
}

/// `Page 2 of 3 (45 items)` footer, plus the empty-results message.
pub(crate) fn list_footer(list: &ListController, noun: &str, color: bool) -> String {
    let cursor = list.cursor();
    let mut footer = format!(
        "Page {} of {} ({} {noun})",
        cursor.page(),
        cursor.total_pages(),
        cursor.total_items()
    );
    if let Some(message) = list.status_message() {
        footer = format!("{message}\n{footer}");
    }
    dim(&footer, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_guards::clean_env;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_enter_without_auth_is_open() {
        let _env = unsafe { clean_env() };
        let ctx = Context::new(Config::default(), true);
        for page in PageId::ALL {
            assert!(ctx.enter(page).is_ok());
        }
    }

    #[test]
    #[serial]
    fn test_enter_with_auth_needs_session() {
        let _env = unsafe { clean_env() };
        let mut config = Config::default();
        config.auth.publishable_key = Some("pk_live_abc123".to_string());
        let ctx = Context::new(config.clone(), true);
        assert!(matches!(ctx.enter(PageId::Tariffs), Err(ScopeError::Auth(_))));

        config.auth.session_token = Some("sess_1".to_string());
        assert!(Context::new(config, true).enter(PageId::Tariffs).is_ok());
    }

    #[tokio::test]
    async fn test_competitor_selection_resolves_names() {
        let ctx = Context::new(Config::default(), true);
        assert_eq!(
            ctx.competitor_selection(Some("cabify")).await.unwrap(),
            Selection::Value("4".to_string())
        );
        assert_eq!(ctx.competitor_selection(Some("all")).await.unwrap(), Selection::All);
        assert!(ctx.competitor_selection(Some("bolt")).await.is_err());
    }

    #[test]
    fn test_legend_only_for_highlighted_tables() {
        let rows = crate::sample::tariff_comparison().driver_rows();
        let table = crate::pages::tariffs::table(crate::types::TariffKind::Driver, None, false)
            .unwrap();
        assert!(table_text(&table, &rows, false).ends_with(LEGEND));

        let plain = ComparisonTable::new(crate::pages::digest::history_schema().unwrap());
        assert!(!table_text(&plain, &[Row::new().with("period_start", "x")], false)
            .contains(LEGEND));
    }
}
