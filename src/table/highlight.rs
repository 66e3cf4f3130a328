//! Best/worst cell marking for numeric comparison columns.

use serde::Serialize;

use super::{Column, HighlightRule, Row};

/// Marking of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    #[default]
    None,
    Best,
    Worst,
}

/// Minimum and maximum numeric value of one column across every row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremes {
    pub min: f64,
    pub max: f64,
}

impl Extremes {
    /// `None` when the column holds no numeric value at all.
    pub fn of(rows: &[Row], key: &str) -> Option<Self> {
        rows.iter()
            .filter_map(|r| r.get(key).as_number())
            .fold(None, |acc: Option<Extremes>, v| match acc {
                None => Some(Extremes { min: v, max: v }),
                Some(e) => Some(Extremes {
                    min: e.min.min(v),
                    max: e.max.max(v),
                }),
            })
    }

    /// Classify `value` under `rule`. The best check wins when min == max.
    pub fn classify(&self, value: f64, rule: HighlightRule) -> Highlight {
        let (best, worst) = match rule {
            HighlightRule::None => return Highlight::None,
            HighlightRule::Min => (self.min, self.max),
            HighlightRule::Max => (self.max, self.min),
        };

        if value == best {
            Highlight::Best
        } else if value == worst {
            Highlight::Worst
        } else {
            Highlight::None
        }
    }
}

/// Highlight grid in original row order: `grid[row][column]`.
///
/// Extremes are computed over the whole collection, independent of sorting
/// or paging.
pub fn highlight_grid(columns: &[Column], rows: &[Row]) -> Vec<Vec<Highlight>> {
    let extremes: Vec<Option<Extremes>> = columns
        .iter()
        .map(|c| match c.highlight {
            HighlightRule::None => None,
            _ => Extremes::of(rows, &c.key),
        })
        .collect();

    rows.iter()
        .map(|row| {
            columns
                .iter()
                .zip(&extremes)
                .map(|(column, extremes)| {
                    match (extremes, row.get(&column.key).as_number()) {
                        (Some(e), Some(v)) => e.classify(v, column.highlight),
                        _ => Highlight::None,
                    }
                })
                .collect()
        })
        .collect()
}
