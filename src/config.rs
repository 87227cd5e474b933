use std::env;
use std::path::PathBuf;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_DIRECTORY_URL: &str = "https://community.cncf.io/chapters/";
/// Directory fetch timeout. Same value the original workflow script used.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything one run needs, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub issue_body: String,
    pub issue_title: String,
    /// File the step outputs are appended to. `None` prints them to stdout.
    pub output_path: Option<PathBuf>,
    pub directory_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(issue_body: impl Into<String>, output_path: Option<PathBuf>) -> Self {
        Config {
            issue_body: issue_body.into(),
            issue_title: String::new(),
            output_path,
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        // A missing body is a no-op run, not a config error
        let issue_body = env::var("ISSUE_BODY").unwrap_or_default();
        let issue_title = env::var("ISSUE_TITLE").unwrap_or_default();

        let output_path = env::var("GITHUB_OUTPUT")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let directory_url = env::var("CHAPTERS_URL")
            .unwrap_or_else(|_| DEFAULT_DIRECTORY_URL.to_string());

        let timeout = match env::var("CHAPTERS_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(env::VarError::NotPresent) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Err(e) => return Err(e.into()),
        };

        Ok(Config {
            issue_body,
            issue_title,
            output_path,
            directory_url,
            request_timeout: timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| AppError::ConfigError(format!("Invalid CHAPTERS_TIMEOUT_SECS: {}", e)))?;
    timeout_from_secs(secs)
}

/// Validates a timeout given in seconds, from the env or the command line.
pub fn timeout_from_secs(secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(AppError::ConfigError(
            "Request timeout must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
