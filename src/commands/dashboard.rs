use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, Context, dim, heading, use_color};
use crate::auth::AuthConfig;
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::models::DashboardSummary;
use crate::pages::PageId;
use crate::sample;
use crate::types::Health;

fn summary_text(summary: &DashboardSummary, session: &str, color: bool) -> String {
    let mut text = format!("{}  {}\n\n", heading(PageId::Dashboard, color), dim(session, color));

    let health = summary.health_status.as_str();
    let health = match (color, summary.health_status) {
        (false, _) => health.to_string(),
        (true, Health::Healthy) => health.green().to_string(),
        (true, Health::Warning) => health.yellow().to_string(),
        (true, Health::Error) => health.red().to_string(),
    };

    text.push_str(&format!("New releases this week:  {}\n", summary.new_releases_week));
    text.push_str(&format!("New reviews this week:   {}\n", summary.new_reviews_week));
    text.push_str(&format!("Tariff changes:          {}\n", summary.tariff_changes_week));
    text.push_str(&format!("Collection health:       {health}\n"));

    if !summary.active_promos.is_empty() {
        text.push_str("\nActive promotions:\n");
        for (competitor, count) in &summary.active_promos {
            text.push_str(&format!("  {competitor:<10} {count}\n"));
        }
    }
    if let Some(last) = &summary.last_collection {
        text.push_str(&dim(&format!("\nLast collection {last}"), color));
    }
    text.trim_end().to_string()
}

/// Weekly overview: counters, active promos and collection health
pub async fn cmd_dashboard(ctx: &Context, output: OutputOptions) -> Result<()> {
    ctx.enter(PageId::Dashboard)?;

    let summary = if ctx.is_sample() {
        sample::dashboard_summary()
    } else {
        ctx.client()?.dashboard_summary().await?
    };
    let session = ctx.config().session_token();
    let label = AuthConfig::from_config(ctx.config()).session_label(session.as_ref());

    let text = summary_text(&summary, label, use_color(output));
    CommandOutput::new(json!({
        "summary": summary,
        "session": label,
    }))
    .with_text(text)
    .print(output)
}
