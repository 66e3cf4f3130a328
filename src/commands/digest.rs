use std::path::PathBuf;

use jiff::Zoned;
use serde_json::json;

use super::{CommandOutput, Context, heading, rows_json, table_text, use_color};
use crate::cli::OutputOptions;
use crate::error::{Result, ScopeError};
use crate::export::{digest_filename, export_markdown};
use crate::models::Digest;
use crate::pages::{PageId, digest};
use crate::sample;
use crate::table::{ComparisonTable, Row, ToRow};
use crate::types::DigestFormat;

/// Markdown body of `latest`, fetched from the backend when not inlined.
async fn digest_content(ctx: &Context, latest: &Digest) -> Result<String> {
    if !latest.content.trim().is_empty() || ctx.is_sample() {
        return Ok(latest.content.clone());
    }
    let bytes = ctx
        .client()?
        .export_digest(&latest.id, DigestFormat::Markdown)
        .await?;
    String::from_utf8(bytes).map_err(|err| ScopeError::Other(format!("digest is not UTF-8: {err}")))
}

/// Show digest history; with `out`, save the latest digest as markdown.
///
/// `out` of `Some(None)` picks `digest-<today>.md`.
pub async fn cmd_digest(
    ctx: &Context,
    out: Option<Option<PathBuf>>,
    output: OutputOptions,
) -> Result<()> {
    ctx.enter(PageId::Digest)?;

    let history = if ctx.is_sample() {
        sample::digest_history()
    } else {
        ctx.client()?.digest_history().await?.digests
    };

    if let Some(path) = out {
        let Some(latest) = history.iter().max_by(|a, b| a.period_end.cmp(&b.period_end)) else {
            return Err(ScopeError::NothingToExport);
        };
        let latest = digest::latest(&history).unwrap_or(latest);
        let content = digest_content(ctx, latest).await?;
        if content.trim().is_empty() {
            return Err(ScopeError::NothingToExport);
        }

        let path = path.unwrap_or_else(|| PathBuf::from(digest_filename(Zoned::now().date())));
        export_markdown(&content, &path)?;
        return CommandOutput::new(json!({
            "digest_id": latest.id,
            "path": path.display().to_string(),
            "bytes": content.len(),
        }))
        .with_text(format!("Saved digest {} to {}", latest.id, path.display()))
        .print(output);
    }

    let rows: Vec<Row> = history.iter().map(Digest::to_row).collect();
    let color = use_color(output);
    let table = ComparisonTable::new(digest::history_schema()?);
    let text = format!(
        "{}\n{}",
        heading(PageId::Digest, color),
        table_text(&table, &rows, color)
    );
    CommandOutput::new(json!({
        "digests": rows_json(&rows),
        "total": rows.len(),
    }))
    .with_text(text)
    .print(output)
}
