use crate::error::Result;
use crate::filter::{Filter, FilterSet, Selection};
use crate::formatting;
use crate::table::{Column, Schema};

pub const COMPETITOR_FILTER: &str = "competitor";
pub const TARGET_FILTER: &str = "target";
pub const ACTIVE_FILTER: &str = "active";

pub fn schema() -> Result<Schema> {
    Schema::new(vec![
        Column::new("competitor", "Competitor"),
        Column::new("title", "Promotion"),
        Column::new("discount", "Discount").unsortable(),
        Column::new("code", "Code").unsortable(),
        Column::new("valid_until", "Valid until").format_with(formatting::date()),
        Column::new("target_audience", "For"),
    ])
}

/// Competitor and audience filters, plus the active-only flag (on by default).
pub fn filters() -> FilterSet {
    FilterSet::new(vec![
        Filter::client(COMPETITOR_FILTER, "competitor_id"),
        Filter::client(TARGET_FILTER, "target_audience"),
        Filter::client(ACTIVE_FILTER, "is_active").with_selection(Selection::Flag(true)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Promo;
    use crate::sample;
    use crate::table::{Row, ToRow};

    fn rows() -> Vec<Row> {
        sample::promos().iter().map(Promo::to_row).collect()
    }

    #[test]
    fn test_default_hides_inactive() {
        let rows = rows();
        let visible = filters().apply(&rows);
        assert_eq!(visible.len(), 3);
        assert!(visible.iter().all(|r| r.get("is_active").raw_text() == "true"));
    }

    #[test]
    fn test_filters_combine() {
        let rows = rows();
        let mut filters = filters();
        filters.set(ACTIVE_FILTER, Selection::Flag(false));
        assert_eq!(filters.apply(&rows).len(), 4);

        filters.set(TARGET_FILTER, Selection::Value("rider".to_string()));
        assert_eq!(filters.apply(&rows).len(), 3);

        // Didi (3) only has an inactive rider promo
        filters.set(COMPETITOR_FILTER, Selection::Value("3".to_string()));
        assert_eq!(filters.apply(&rows).len(), 1);
        filters.set(ACTIVE_FILTER, Selection::Flag(true));
        assert!(filters.apply(&rows).is_empty());
    }

    #[test]
    fn test_schema_matches_rows() {
        let rows = rows();
        assert!(schema().unwrap().validate(&rows).is_empty());
    }
}
