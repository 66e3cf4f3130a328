//! Generic comparison table: typed rows bound to an explicit column schema,
//! with header-click sorting and best/worst highlighting.

pub mod column;
pub mod highlight;
pub mod render;
pub mod row;
pub mod sort;
pub mod value;

pub use column::{Column, Formatter, HighlightRule, Schema};
pub use highlight::{Extremes, Highlight, highlight_grid};
pub use render::{Cell, ComparisonTable, HeaderCell, LEGEND, NO_DATA_MESSAGE, Rendered, RenderedTable};
pub use row::{Row, ToRow};
pub use sort::{SortDirection, SortState};
pub use value::Value;

/// Glyph shown for missing values.
pub const PLACEHOLDER: &str = "—";
