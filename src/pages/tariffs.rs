//! Driver and rider tariff comparison.
//!
//! Driver figures: a lower commission is better for drivers, larger bonuses
//! are better. Rider figures: every fare component is better when lower.

use crate::error::Result;
use crate::formatting;
use crate::table::{Column, ComparisonTable, HighlightRule, Schema, SortDirection, SortState};
use crate::types::TariffKind;

pub fn driver_schema() -> Result<Schema> {
    Schema::new(vec![
        Column::new("competitor", "Competitor"),
        Column::new("commission_rate", "Commission")
            .highlight(HighlightRule::Min)
            .format_with(formatting::percent()),
        Column::new("signup_bonus", "Signup bonus")
            .highlight(HighlightRule::Max)
            .format_with(formatting::soles()),
        Column::new("referral_bonus", "Referral bonus")
            .highlight(HighlightRule::Max)
            .format_with(formatting::soles()),
    ])
}

pub fn rider_schema() -> Result<Schema> {
    Schema::new(vec![
        Column::new("competitor", "Competitor"),
        Column::new("base_fare", "Base fare")
            .highlight(HighlightRule::Min)
            .format_with(formatting::soles_fixed()),
        Column::new("per_km_rate", "Per km")
            .highlight(HighlightRule::Min)
            .format_with(formatting::soles_fixed()),
        Column::new("per_min_rate", "Per minute")
            .highlight(HighlightRule::Min)
            .format_with(formatting::soles_fixed()),
    ])
}

/// Table for `kind`, optionally pre-sorted by `sort_key`.
pub fn table(kind: TariffKind, sort_key: Option<&str>, descending: bool) -> Result<ComparisonTable> {
    let schema = match kind {
        TariffKind::Driver => driver_schema()?,
        TariffKind::Rider => rider_schema()?,
    };
    let mut table = ComparisonTable::new(schema);
    if let Some(key) = sort_key {
        // Route through the header click so unsortable or unknown keys are ignored.
        table.click_header(key);
        if descending && table.sort().key() == Some(key) {
            table = table.with_sort(SortState::by(key, SortDirection::Descending));
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::table::{Highlight, Rendered};

    #[test]
    fn test_schemas_are_valid() {
        assert_eq!(driver_schema().unwrap().columns().len(), 4);
        assert_eq!(rider_schema().unwrap().columns().len(), 4);
    }

    #[test]
    fn test_commission_highlights_lowest_as_best() {
        let rows = sample::tariff_comparison().driver_rows();
        let table = table(TariffKind::Driver, None, false).unwrap();
        let Rendered::Table(rendered) = table.render(&rows) else {
            panic!("expected a table");
        };
        // InDriver has 10%, Uber 25%
        let commission = 1;
        assert_eq!(rendered.rows[0][commission].highlight, Highlight::Best);
        assert_eq!(rendered.rows[1][commission].highlight, Highlight::Worst);
        assert_eq!(rendered.rows[0][commission].text, "10%");
    }

    #[test]
    fn test_sorted_descending_by_signup_bonus() {
        let rows = sample::tariff_comparison().driver_rows();
        let table = table(TariffKind::Driver, Some("signup_bonus"), true).unwrap();
        let Rendered::Table(rendered) = table.render(&rows) else {
            panic!("expected a table");
        };
        let order: Vec<&str> = rendered.rows.iter().map(|r| r[0].text.as_str()).collect();
        assert_eq!(order, vec!["Uber", "Didi", "InDriver", "Cabify"]);
    }

    #[test]
    fn test_unknown_sort_key_keeps_original_order() {
        let rows = sample::tariff_comparison().rider_rows();
        let table = table(TariffKind::Rider, Some("rating"), false).unwrap();
        assert_eq!(table.sort().key(), None);
        let Rendered::Table(rendered) = table.render(&rows) else {
            panic!("expected a table");
        };
        assert_eq!(rendered.rows[0][0].text, "InDriver");
        assert_eq!(rendered.rows[0][1].text, "S/3.50");
    }
}
