use jiff::Timestamp;
use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, Context, dim, heading, rows_json, table_text, use_color};
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::filter::Selection;
use crate::models::{CollectionLog, CollectionSource};
use crate::pages::{PageId, collection};
use crate::sample;
use crate::table::{ComparisonTable, Row, ToRow};
use crate::types::{Health, RunStatus};

/// Logs older than this many days are not requested.
const LOG_WINDOW_DAYS: u32 = 7;

fn health_label(health: Health, color: bool) -> String {
    let label = health.as_str();
    if !color {
        return label.to_string();
    }
    match health {
        Health::Healthy => label.green().to_string(),
        Health::Warning => label.yellow().to_string(),
        Health::Error => label.red().to_string(),
    }
}

/// Show collection source status, or the run log with `logs`
pub async fn cmd_collection(
    ctx: &Context,
    status: Option<RunStatus>,
    logs: bool,
    output: OutputOptions,
) -> Result<()> {
    ctx.enter(PageId::Collection)?;
    let color = use_color(output);

    if logs {
        let entries = if ctx.is_sample() {
            sample::collection_logs()
        } else {
            ctx.client()?
                .collection_logs(status, Some(LOG_WINDOW_DAYS))
                .await?
                .logs
        };
        let rows: Vec<Row> = entries.iter().map(CollectionLog::to_row).collect();

        let mut filters = collection::log_filters();
        filters.set(
            collection::STATUS_FILTER,
            status
                .map(|s| Selection::Value(s.to_string()))
                .unwrap_or_default(),
        );
        let visible = filters.apply_owned(&rows);

        let table = ComparisonTable::new(collection::logs_schema(Timestamp::now())?);
        let text = format!(
            "{} log\n{}\n{}",
            heading(PageId::Collection, color),
            table_text(&table, &visible, color),
            dim(&format!("{} runs", visible.len()), color)
        );
        return CommandOutput::new(json!({
            "logs": rows_json(&visible),
            "total": visible.len(),
        }))
        .with_text(text)
        .print(output);
    }

    let status_report = if ctx.is_sample() {
        sample::collection_status()
    } else {
        ctx.client()?.collection_status().await?
    };
    let rows: Vec<Row> = status_report
        .sources
        .iter()
        .map(CollectionSource::to_row)
        .collect();

    let table = ComparisonTable::new(collection::sources_schema()?);
    let text = format!(
        "{}\n{}\nHealth: {}  {}",
        heading(PageId::Collection, color),
        table_text(&table, &rows, color),
        health_label(status_report.health, color),
        dim(&format!("updated {}", status_report.last_update), color)
    );

    CommandOutput::new(json!({
        "sources": rows_json(&rows),
        "health": status_report.health,
        "last_update": status_report.last_update,
    }))
    .with_text(text)
    .print(output)
}
