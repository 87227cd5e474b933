use std::process::ExitCode;

use clap::Parser;
use cncg_chapter_check::{config::{self, Config}, run, scraper::DirectoryScraper, RunOutcome};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "cncg-chapter-check",
    about = "Check a CNCG chapter request issue against existing chapters"
)]
struct Cli {
    /// Chapter directory page to scrape (overrides CHAPTERS_URL)
    #[arg(long)]
    directory_url: Option<String>,

    /// HTTP timeout for the directory fetch (overrides CHAPTERS_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print step outputs to stdout instead of appending to GITHUB_OUTPUT
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match check(cli).await {
        Ok(outcome) => {
            info!("Finished: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Chapter check failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn check(cli: Cli) -> cncg_chapter_check::error::Result<RunOutcome> {
    let mut config = Config::load()?;
    if let Some(url) = cli.directory_url {
        config.directory_url = url;
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout = config::timeout_from_secs(secs)?;
    }
    if cli.dry_run {
        config.output_path = None;
    }

    let scraper = DirectoryScraper::new(&config.directory_url, config.request_timeout)?;
    run(&config, &scraper).await
}
