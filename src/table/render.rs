//! Comparison table rendering: sort, highlight and format in one pass.

use std::collections::BTreeMap;

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use super::highlight::{Highlight, highlight_grid};
use super::{Row, Schema, SortState};

/// Shown instead of an empty table shell.
pub const NO_DATA_MESSAGE: &str = "No data";

/// Legend explaining the highlight colors.
pub const LEGEND: &str = "● best value  ● worst value";

/// Header indicator for a sortable column that is not the active sort key.
const UNSORTED_INDICATOR: &str = "↕";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// Sort arrow, set on every sortable column
    pub indicator: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub highlight: Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Empty(&'static str),
    Table(RenderedTable),
}

/// A schema-bound table with its interactive sort state.
#[derive(Debug, Clone)]
pub struct ComparisonTable {
    schema: Schema,
    sort: SortState,
}

impl ComparisonTable {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            sort: SortState::new(),
        }
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Header click on `key`. See [`SortState::toggle`].
    pub fn click_header(&mut self, key: &str) -> bool {
        self.sort.toggle(&self.schema, key)
    }

    pub fn render(&self, rows: &[Row]) -> Rendered {
        if rows.is_empty() {
            return Rendered::Empty(NO_DATA_MESSAGE);
        }

        let columns = self.schema.columns();
        let grid = highlight_grid(columns, rows);

        let headers = columns
            .iter()
            .map(|c| HeaderCell {
                key: c.key.clone(),
                label: c.label.clone(),
                sortable: c.sortable,
                indicator: match (c.sortable, self.sort.key()) {
                    (false, _) => None,
                    (true, Some(active)) if active == c.key => {
                        Some(self.sort.direction().arrow())
                    }
                    (true, _) => Some(UNSORTED_INDICATOR),
                },
            })
            .collect();

        let body = self
            .sort
            .order(rows)
            .into_iter()
            .map(|i| {
                columns
                    .iter()
                    .zip(&grid[i])
                    .map(|(column, highlight)| Cell {
                        text: column.display(&rows[i]),
                        highlight: *highlight,
                    })
                    .collect()
            })
            .collect();

        Rendered::Table(RenderedTable {
            headers,
            rows: body,
        })
    }

    /// Rows in display order, each paired with its marked cells by column key.
    pub fn marked<'a, 's>(
        &'s self,
        rows: &'a [Row],
    ) -> Vec<(&'a Row, BTreeMap<&'s str, Highlight>)> {
        let columns = self.schema.columns();
        let grid = highlight_grid(columns, rows);
        self.sort
            .order(rows)
            .into_iter()
            .map(|i| {
                let marks = columns
                    .iter()
                    .zip(&grid[i])
                    .filter(|(_, highlight)| **highlight != Highlight::None)
                    .map(|(column, highlight)| (column.key.as_str(), *highlight))
                    .collect();
                (&rows[i], marks)
            })
            .collect()
    }
}

impl Rendered {
    /// Text for a terminal. `color` enables green/red highlight styling.
    pub fn to_terminal(&self, color: bool) -> String {
        match self {
            Rendered::Empty(message) => message.to_string(),
            Rendered::Table(table) => table.to_terminal(color),
        }
    }
}

impl RenderedTable {
    pub fn to_terminal(&self, color: bool) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().map(|h| match h.indicator {
            Some(arrow) => format!("{} {}", h.label, arrow),
            None => h.label.clone(),
        }));

        for row in &self.rows {
            builder.push_record(row.iter().map(|cell| paint(cell, color)));
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }
}

fn paint(cell: &Cell, color: bool) -> String {
    if !color {
        return cell.text.clone();
    }
    match cell.highlight {
        Highlight::Best => cell.text.green().bold().to_string(),
        Highlight::Worst => cell.text.red().to_string(),
        Highlight::None => cell.text.clone(),
    }
}
