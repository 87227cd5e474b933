pub mod config;
pub mod error;
pub mod issue;
pub mod matcher;
pub mod models;
pub mod output;
pub mod report;
pub mod scraper;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::issue::ParsedRequest;
use crate::output::{NEARBY_CHAPTERS_KEY, REQUESTED_LOCATION_KEY, StepOutputs};
use crate::scraper::ChapterSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoIssueBody,
    IncompleteRequest,
}

/// How a run ended. Every variant is a successful exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Skipped(SkipReason),
    NoMatches,
    Reported { matches: usize },
}

/// Checks one chapter request against the existing chapters and writes the
/// report to the step outputs when anything matched.
pub async fn run<S: ChapterSource>(config: &Config, source: &S) -> Result<RunOutcome> {
    if !config.issue_title.is_empty() {
        info!("Issue title: {}", config.issue_title);
    }

    if config.issue_body.trim().is_empty() {
        info!("No issue body provided, nothing to check");
        return Ok(RunOutcome::Skipped(SkipReason::NoIssueBody));
    }

    let request = ParsedRequest::parse(&config.issue_body);
    if !request.is_complete() {
        info!(
            location = %request.location,
            country = %request.country,
            "Could not extract location and country from issue body"
        );
        return Ok(RunOutcome::Skipped(SkipReason::IncompleteRequest));
    }
    info!("Requested location: {}", request.summary());

    let chapters = source.fetch_chapters().await;
    let matches = matcher::find_matches(&request.location, &request.country, &chapters);
    let report = report::format_report(&matches);

    if report.is_empty() {
        info!("No nearby chapters found");
        return Ok(RunOutcome::NoMatches);
    }

    info!("Found {} related chapters", matches.len());
    let outputs = StepOutputs::new(config.output_path.clone());
    outputs.set_multiline(NEARBY_CHAPTERS_KEY, &report)?;
    outputs.set(REQUESTED_LOCATION_KEY, &request.summary())?;

    Ok(RunOutcome::Reported {
        matches: matches.len(),
    })
}
