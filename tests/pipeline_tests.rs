use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::{http::StatusCode, response::Html, routing::get, Router};
use cncg_chapter_check::{
    config::Config,
    models::ChapterRecord,
    run,
    scraper::{ChapterSource, DirectoryScraper},
    RunOutcome, SkipReason,
};
use tempfile::TempDir;

const DIRECTORY_HTML: &str = include_str!("fixtures/chapters.html");

const PARIS_REQUEST: &str = "### Name of your CNCG\n\nCloud Native Paris 2\n\n\
### City or location name for your CNCG\n\nParis\n\n\
### Country of your CNCG\n\nFrance\n\n\
### Why do you want to start a chapter?\n\nMore meetups.\n";

// =============================================================================
// Helpers
// =============================================================================

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn directory_server() -> String {
    let router = Router::new().route("/chapters/", get(|| async { Html(DIRECTORY_HTML) }));
    let addr = serve(router).await;
    format!("http://{}/chapters/", addr)
}

fn scraper(url: &str) -> DirectoryScraper {
    DirectoryScraper::new(url, Duration::from_secs(5)).unwrap()
}

fn config_with_output(body: &str) -> (Config, TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("github_output");
    (Config::new(body, Some(path.clone())), dir, path)
}

fn chapter(name: &str, url: &str) -> ChapterRecord {
    ChapterRecord::from_name(name, url).unwrap()
}

// =============================================================================
// Fetcher
// =============================================================================

#[tokio::test]
async fn scraper_reads_directory_cards() {
    let url = directory_server().await;
    let scraper = scraper(&url);
    assert_eq!(scraper.url(), url);

    let chapters = scraper.fetch_chapters().await;
    let locations: Vec<_> = chapters.iter().map(|c| c.location.as_str()).collect();
    assert_eq!(locations, vec!["Paris", "Lyon, France", "Berlin", "Bengaluru"]);
    assert_eq!(chapters[0].url, "/cloud-native-paris/");
}

#[tokio::test]
async fn connection_failure_yields_empty_list() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let chapters = scraper(&format!("http://{}/chapters/", addr)).fetch_chapters().await;
    assert!(chapters.is_empty());
}

#[tokio::test]
async fn server_error_yields_empty_list() {
    let router = Router::new().route(
        "/chapters/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Html(DIRECTORY_HTML)) }),
    );
    let addr = serve(router).await;

    let chapters = scraper(&format!("http://{}/chapters/", addr)).fetch_chapters().await;
    assert!(chapters.is_empty());
}

// =============================================================================
// End to end
// =============================================================================

#[tokio::test]
async fn reports_matches_from_scraped_directory() {
    let url = directory_server().await;
    let (config, _dir, path) = config_with_output(PARIS_REQUEST);

    let outcome = run(&config, &scraper(&url)).await.unwrap();
    assert_eq!(outcome, RunOutcome::Reported { matches: 2 });

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "nearby_chapters<<EOF\n\
         ### ⚠️ Chapters in the Same City:\n\
         - [Cloud Native Paris](https://community.cncf.io/cloud-native-paris/)\n\
         \n\
         ### 🌍 Chapters in the Same Country:\n\
         - [Cloud Native Lyon, France](https://community.cncf.io/cloud-native-lyon/)\n\
         EOF\n\
         requested_location=Paris, France\n"
    );
}

#[tokio::test]
async fn no_matching_chapters_writes_nothing() {
    let body = PARIS_REQUEST.replace("Paris\n\n###", "Lima\n\n###").replace("France", "Peru");
    let (config, _dir, path) = config_with_output(&body);

    let chapters = vec![
        chapter("Cloud Native Paris", "/paris"),
        chapter("Cloud Native Berlin", "/berlin"),
    ];
    let outcome = run(&config, &chapters).await.unwrap();

    assert_eq!(outcome, RunOutcome::NoMatches);
    assert!(!path.exists());
}

#[tokio::test]
async fn unreachable_directory_is_not_fatal() {
    let (mut config, _dir, path) = config_with_output(PARIS_REQUEST);
    config.directory_url = "http://127.0.0.1:9/chapters/".to_string();

    let outcome = run(&config, &scraper(&config.directory_url)).await.unwrap();
    assert_eq!(outcome, RunOutcome::NoMatches);
    assert!(!path.exists());
}

#[tokio::test]
async fn empty_body_is_skipped() {
    let (config, _dir, path) = config_with_output("  \n");
    let outcome = run(&config, &Vec::<ChapterRecord>::new()).await.unwrap();
    assert_eq!(outcome, RunOutcome::Skipped(SkipReason::NoIssueBody));
    assert!(!path.exists());
}

#[tokio::test]
async fn incomplete_request_is_skipped() {
    let body = "### City or location name for your CNCG\n\nParis\n\n### Something else\n\nFrance";
    let (config, _dir, path) = config_with_output(body);

    let chapters = vec![chapter("Cloud Native Paris", "/paris")];
    let outcome = run(&config, &chapters).await.unwrap();

    assert_eq!(outcome, RunOutcome::Skipped(SkipReason::IncompleteRequest));
    assert!(!path.exists());
}

#[tokio::test]
async fn appends_after_existing_outputs() {
    let (config, _dir, path) = config_with_output(PARIS_REQUEST);
    std::fs::write(&path, "previous=step\n").unwrap();

    let chapters = vec![chapter("Cloud Native Paris", "/paris")];
    run(&config, &chapters).await.unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("previous=step\nnearby_chapters<<EOF\n"));
    assert!(written.contains("- [Cloud Native Paris](https://community.cncf.io/paris)\nEOF\n"));
    assert!(written.ends_with("requested_location=Paris, France\n"));
}
