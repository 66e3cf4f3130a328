//! Column sort state for comparison tables.
//!
//! The order is always recomputed from the original collection; nothing is
//! sorted in place.

use std::cmp::Ordering;

use super::{Row, Schema, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Active sort column and direction. No key means original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    key: Option<String>,
    direction: SortDirection,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Header click: flip direction on the active column, otherwise switch to
    /// `key` ascending. Returns false when `key` is unknown or not sortable.
    pub fn toggle(&mut self, schema: &Schema, key: &str) -> bool {
        match schema.column(key) {
            Some(column) if column.sortable => {}
            _ => return false,
        }

        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.flip();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Ascending;
        }
        true
    }

    /// Row indices in display order.
    ///
    /// Descending order is the exact reverse of ascending order, so equal
    /// values swap places too.
    pub fn order(&self, rows: &[Row]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        let Some(key) = self.key.as_deref() else {
            return indices;
        };

        let values: Vec<&Value> = rows.iter().map(|r| r.get(key)).collect();
        // A column mixing numbers and text is compared as text throughout so the
        // ordering stays total.
        let numeric = values
            .iter()
            .all(|v| v.as_number().is_some() || v.is_missing());

        indices.sort_by(|&a, &b| compare_values(values[a], values[b], numeric));
        if self.direction == SortDirection::Descending {
            indices.reverse();
        }
        indices
    }
}

/// Numeric comparison when both sides are numbers (and the column allows it),
/// otherwise lexicographic comparison of the raw text.
fn compare_values(a: &Value, b: &Value, numeric: bool) -> Ordering {
    if numeric && let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        return x.total_cmp(&y);
    }
    a.raw_text().cmp(&b.raw_text())
}
