//! Column descriptors and the per-page schema that binds them.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, ScopeError};

use super::{Row, Value};

/// Cell formatter: `(value, row) -> display text`.
pub type Formatter = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

/// Which extreme of a numeric column counts as the best value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightRule {
    #[default]
    None,
    /// Lowest value is best (commission, fares)
    Min,
    /// Highest value is best (bonuses)
    Max,
}

/// Describes how one row field is displayed, sorted and highlighted.
#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub formatter: Option<Formatter>,
    pub sortable: bool,
    pub highlight: HighlightRule,
}

impl Column {
    /// A sortable, unhighlighted column showing raw values.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            formatter: None,
            sortable: true,
            highlight: HighlightRule::None,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn highlight(mut self, rule: HighlightRule) -> Self {
        self.highlight = rule;
        self
    }

    pub fn format_with<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Value, &Row) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Display text for this column's cell in `row`.
    ///
    /// Missing values always show the placeholder; the formatter is only
    /// consulted for present values.
    pub fn display(&self, row: &Row) -> String {
        let value = row.get(&self.key);
        if value.is_missing() {
            return super::PLACEHOLDER.to_string();
        }
        match &self.formatter {
            Some(format) => format(value, row),
            None => value.raw_text(),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .field("sortable", &self.sortable)
            .field("highlight", &self.highlight)
            .finish()
    }
}

/// Ordered list of column descriptors with unique keys.
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(ScopeError::Config(format!(
                    "duplicate column key '{}'",
                    column.key
                )));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Column keys that are absent from at least one row.
    ///
    /// Gaps are logged and tolerated: the affected cells render the
    /// placeholder.
    pub fn validate(&self, rows: &[Row]) -> Vec<String> {
        let gaps: Vec<String> = self
            .columns
            .iter()
            .filter(|c| rows.iter().any(|r| !r.contains_key(&c.key)))
            .map(|c| c.key.clone())
            .collect();

        if !gaps.is_empty() {
            tracing::warn!("rows are missing column keys: {}", gaps.join(", "));
        }
        gaps
    }
}
