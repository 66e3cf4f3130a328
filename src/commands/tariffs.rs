use std::path::PathBuf;

use serde_json::json;

use super::{CommandOutput, Context, dim, heading, rows_json, table_text, use_color};
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::export::{ExportFormat, export_rows};
use crate::formatting::format_date_for_display;
use crate::pages::{PageId, tariffs};
use crate::sample;
use crate::table::SortDirection;
use crate::types::TariffKind;

pub struct TariffOptions {
    pub kind: TariffKind,
    pub sort: Option<String>,
    pub descending: bool,
    /// Write the rows as CSV here instead of printing the table
    pub export: Option<PathBuf>,
}

/// Show (or export) the tariff comparison for drivers or riders
pub async fn cmd_tariffs(ctx: &Context, options: TariffOptions, output: OutputOptions) -> Result<()> {
    ctx.enter(PageId::Tariffs)?;

    let comparison = if ctx.is_sample() {
        sample::tariff_comparison()
    } else {
        ctx.client()?.tariff_comparison(Some(options.kind)).await?
    };
    let rows = match options.kind {
        TariffKind::Driver => comparison.driver_rows(),
        TariffKind::Rider => comparison.rider_rows(),
    };

    if let Some(path) = options.export {
        let count = export_rows(&rows, &path, ExportFormat::Csv)?;
        return CommandOutput::new(json!({
            "exported": count,
            "path": path.display().to_string(),
        }))
        .with_text(format!("Exported {count} rows to {}", path.display()))
        .print(output);
    }

    let table = tariffs::table(options.kind, options.sort.as_deref(), options.descending)?;
    let color = use_color(output);

    let marked = table.marked(&rows);
    let json_output = json!({
        "kind": options.kind,
        "updated_at": comparison.updated_at,
        "sort": table.sort().key().map(|key| json!({
            "key": key,
            "direction": match table.sort().direction() {
                SortDirection::Ascending => "ascending",
                SortDirection::Descending => "descending",
            },
        })),
        "rows": rows_json(marked.iter().map(|(row, _)| *row)),
        "highlights": marked.iter().map(|(_, marks)| marks).collect::<Vec<_>>(),
    });

    let text = format!(
        "{} ({})\n{}\n{}",
        heading(PageId::Tariffs, color),
        options.kind,
        table_text(&table, &rows, color),
        dim(
            &format!("Updated {}", format_date_for_display(&comparison.updated_at)),
            color
        ),
    );

    CommandOutput::new(json_output).with_text(text).print(output)
}
