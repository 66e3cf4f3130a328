use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rivalscope::cli::{Cli, Commands, ConfigAction, OutputOptions};
use rivalscope::commands::{
    Context, NewsOptions, PromoOptions, ReleaseOptions, ReviewOptions, TariffOptions,
    cmd_collect, cmd_collection, cmd_config_set, cmd_config_show, cmd_dashboard, cmd_digest,
    cmd_news, cmd_news_search, cmd_promos, cmd_releases, cmd_reviews, cmd_tariffs,
};
use rivalscope::error::Result;
use rivalscope::export::TARIFFS_CSV;
use rivalscope::types::TariffKind;

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let output = |json: bool| OutputOptions { json };

    // Config commands work without loading a context.
    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show { json } => cmd_config_show(output(*json)),
            ConfigAction::Set { key, value, json } => cmd_config_set(key, value, output(*json)),
        };
    }

    let ctx = Context::load(cli.sample)?;

    match cli.command {
        Commands::Dashboard { json } => cmd_dashboard(&ctx, output(json)).await,
        Commands::Tariffs {
            rider,
            sort,
            desc,
            export,
            json,
        } => {
            let options = TariffOptions {
                kind: if rider {
                    TariffKind::Rider
                } else {
                    TariffKind::Driver
                },
                sort,
                descending: desc,
                export: export.map(|path| path.unwrap_or_else(|| PathBuf::from(TARIFFS_CSV))),
            };
            cmd_tariffs(&ctx, options, output(json)).await
        }
        Commands::Promos {
            competitor,
            target,
            all,
            json,
        } => {
            let options = PromoOptions {
                competitor,
                target,
                all,
            };
            cmd_promos(&ctx, options, output(json)).await
        }
        Commands::Releases {
            competitor,
            platform,
            category,
            page,
            json,
        } => {
            let options = ReleaseOptions {
                competitor,
                platform,
                category,
                page,
            };
            cmd_releases(&ctx, options, output(json)).await
        }
        Commands::Reviews {
            competitor,
            platform,
            role,
            sentiment,
            category,
            page,
            json,
        } => {
            let options = ReviewOptions {
                competitor,
                platform,
                role,
                sentiment,
                category,
                page,
            };
            cmd_reviews(&ctx, options, output(json)).await
        }
        Commands::Collection { logs, status, json } => {
            cmd_collection(&ctx, status, logs, output(json)).await
        }
        Commands::News {
            page,
            competitor,
            json,
        } => cmd_news(&ctx, NewsOptions { page, competitor }, output(json)).await,
        Commands::NewsSearch {
            query,
            competitor,
            json,
        } => cmd_news_search(&ctx, &query, competitor.as_deref(), output(json)).await,
        Commands::Collect { json } => cmd_collect(&ctx, output(json)).await,
        Commands::Digest { out, json } => cmd_digest(&ctx, out, output(json)).await,
        // Handled before the context is loaded.
        Commands::Config { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
