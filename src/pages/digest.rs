use crate::error::Result;
use crate::formatting;
use crate::models::Digest;
use crate::table::{Column, Schema};

pub fn history_schema() -> Result<Schema> {
    Schema::new(vec![
        Column::new("period_start", "From").format_with(formatting::date()),
        Column::new("period_end", "To").format_with(formatting::date()),
        Column::new("releases_count", "Releases"),
        Column::new("created_at", "Created").format_with(formatting::date()),
    ])
}

/// The newest digest that actually has content.
pub fn latest(history: &[Digest]) -> Option<&Digest> {
    history
        .iter()
        .filter(|d| !d.content.trim().is_empty())
        .max_by(|a, b| a.period_end.cmp(&b.period_end))
}
