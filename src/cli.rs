use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::types::{Platform, Role, RunStatus, Sentiment};

#[derive(Parser)]
#[command(name = "rivalscope")]
#[command(about = "Competitive intelligence for ride-hailing markets")]
#[command(version)]
pub struct Cli {
    /// Use the built-in sample data instead of the backend
    #[arg(long, global = true)]
    pub sample: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// How a command prints its result.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Weekly overview
    #[command(visible_alias = "d")]
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare driver or rider tariffs across competitors
    #[command(visible_alias = "t")]
    Tariffs {
        /// Show rider fares instead of driver commissions and bonuses
        #[arg(long)]
        rider: bool,

        /// Column to sort by (e.g. commission_rate, base_fare)
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Export the rows as CSV (default file: tariffs.csv)
        #[arg(long, num_args = 0..=1, value_name = "FILE")]
        export: Option<Option<PathBuf>>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List competitor promotions
    #[command(visible_alias = "p")]
    Promos {
        /// Competitor id, name or slug
        #[arg(long)]
        competitor: Option<String>,

        /// Audience: driver, rider, unknown
        #[arg(long, value_parser = parse_role)]
        target: Option<Role>,

        /// Include inactive promotions
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List competitor app releases
    #[command(visible_alias = "r")]
    Releases {
        /// Competitor id, name or slug
        #[arg(long)]
        competitor: Option<String>,

        /// Platform: ios, android
        #[arg(long, value_parser = parse_platform)]
        platform: Option<Platform>,

        /// Release category (e.g. ux_ui, safety)
        #[arg(long)]
        category: Option<String>,

        /// Page number
        #[arg(long, default_value_t = 1, value_parser = parse_page)]
        page: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List app-store reviews
    Reviews {
        /// Competitor id, name or slug
        #[arg(long)]
        competitor: Option<String>,

        /// Platform: ios, android
        #[arg(long, value_parser = parse_platform)]
        platform: Option<Platform>,

        /// Reviewer role: driver, rider, unknown
        #[arg(long, value_parser = parse_role)]
        role: Option<Role>,

        /// Sentiment: positive, neutral, negative
        #[arg(long, value_parser = parse_sentiment)]
        sentiment: Option<Sentiment>,

        /// Review category (e.g. pricing, support)
        #[arg(long)]
        category: Option<String>,

        /// Page number
        #[arg(long, default_value_t = 1, value_parser = parse_page)]
        page: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Collection job status
    Collection {
        /// Show the run log instead of per-source status
        #[arg(long)]
        logs: bool,

        /// Only runs with this status: success, partial, failed
        #[arg(long, value_parser = parse_run_status)]
        status: Option<RunStatus>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse the news feed
    #[command(visible_alias = "n")]
    News {
        /// Page number
        #[arg(long, default_value_t = 1, value_parser = parse_page)]
        page: u32,

        /// Competitor slug mentioned in the article (e.g. uber)
        #[arg(long)]
        competitor: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search for and ingest news articles, then show the first page
    NewsSearch {
        /// Free-text query
        query: String,

        /// Restrict the search to one competitor
        #[arg(long)]
        competitor: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Trigger a manual news collection run
    Collect {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Digest history, or save the latest digest as markdown
    Digest {
        /// Save the latest digest here (default file: digest-<today>.md)
        #[arg(long, num_args = 0..=1, value_name = "FILE")]
        out: Option<Option<PathBuf>>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a configuration value
    Set {
        /// Config key (e.g. api_url, page_size, auth.publishable_key)
        key: String,

        /// Value to set
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Generic parser with a friendly error listing the valid values
fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_platform(s: &str) -> Result<Platform, String> {
    parse_with_validation(
        s,
        |v| Platform::from_str(v).map_err(|_| String::new()),
        "platform",
        Platform::ALL_STRINGS,
    )
}

fn parse_role(s: &str) -> Result<Role, String> {
    parse_with_validation(
        s,
        |v| Role::from_str(v).map_err(|_| String::new()),
        "role",
        Role::ALL_STRINGS,
    )
}

fn parse_sentiment(s: &str) -> Result<Sentiment, String> {
    parse_with_validation(
        s,
        |v| Sentiment::from_str(v).map_err(|_| String::new()),
        "sentiment",
        Sentiment::ALL_STRINGS,
    )
}

fn parse_run_status(s: &str) -> Result<RunStatus, String> {
    parse_with_validation(
        s,
        |v| RunStatus::from_str(v).map_err(|_| String::new()),
        "status",
        RunStatus::ALL_STRINGS,
    )
}

/// Pages start at 1.
fn parse_page(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(format!("Invalid page '{s}'. Must be a positive number")),
    }
}
