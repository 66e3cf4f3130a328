//! Collection job monitoring: per-source status and the run log.

use jiff::Timestamp;

use crate::error::Result;
use crate::filter::{Filter, FilterSet};
use crate::formatting;
use crate::table::{Column, Row, Schema, Value};

pub const STATUS_FILTER: &str = "status";

pub fn sources_schema() -> Result<Schema> {
    Schema::new(vec![
        Column::new("task_name", "Task"),
        Column::new("competitor", "Competitor"),
        Column::new("source_type", "Source"),
        Column::new("last_status", "Status"),
        Column::new("last_success", "Last success").format_with(formatting::date()),
        Column::new("items_collected", "Items"),
    ])
}

/// Run log with relative completion times measured from `now`.
pub fn logs_schema(now: Timestamp) -> Result<Schema> {
    Schema::new(vec![
        Column::new("completed_at", "Finished").format_with(move |value: &Value, _: &Row| {
            formatting::format_age(&value.raw_text(), now)
        }),
        Column::new("task_name", "Task"),
        Column::new("competitor", "Competitor"),
        Column::new("status", "Status"),
        Column::new("items_collected", "Items"),
        Column::new("error_message", "Error").unsortable(),
    ])
}

pub fn log_filters() -> FilterSet {
    FilterSet::new(vec![Filter::client(STATUS_FILTER, "status")])
}
