use serde_json::json;

use super::{CommandOutput, Context, dim, heading, rows_json, table_text, use_color};
use crate::api::PromoQuery;
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::filter::Selection;
use crate::models::Promo;
use crate::pages::{PageId, promos};
use crate::sample;
use crate::table::{ComparisonTable, Row, ToRow};
use crate::types::Role;

pub struct PromoOptions {
    pub competitor: Option<String>,
    pub target: Option<Role>,
    /// Include expired and inactive promotions
    pub all: bool,
}

/// List competitor promotions, active ones by default
pub async fn cmd_promos(ctx: &Context, options: PromoOptions, output: OutputOptions) -> Result<()> {
    ctx.enter(PageId::Promos)?;

    let competitor = ctx.competitor_selection(options.competitor.as_deref()).await?;
    let target = options
        .target
        .map(|role| Selection::Value(role.to_string()))
        .unwrap_or_default();

    let items: Vec<Promo> = if ctx.is_sample() {
        sample::promos()
    } else {
        let query = PromoQuery {
            competitor_id: match &competitor {
                Selection::Value(id) => Some(id.clone()),
                _ => None,
            },
            active_only: !options.all,
            target: options.target.map(|role| role.to_string()),
        };
        ctx.client()?.promos(&query).await?.promos
    };
    let rows: Vec<Row> = items.iter().map(Promo::to_row).collect();

    let mut filters = promos::filters();
    filters.set(promos::COMPETITOR_FILTER, competitor);
    filters.set(promos::TARGET_FILTER, target);
    filters.set(promos::ACTIVE_FILTER, Selection::Flag(!options.all));
    let visible = filters.apply_owned(&rows);

    let color = use_color(output);
    let table = ComparisonTable::new(promos::schema()?);
    let mut text = format!(
        "{}\n{}\n",
        heading(PageId::Promos, color),
        table_text(&table, &visible, color)
    );
    for promo in items.iter().filter(|p| visible.iter().any(|r| r.get("id").raw_text() == p.id)) {
        if let Some(conditions) = &promo.conditions {
            text.push_str(&dim(&format!("  {}: {conditions}\n", promo.title), color));
        }
    }
    text.push_str(&format!("{} promotions", visible.len()));

    CommandOutput::new(json!({
        "promos": rows_json(&visible),
        "total": visible.len(),
    }))
    .with_text(text)
    .print(output)
}
