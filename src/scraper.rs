use std::future::Future;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, ClientBuilder, Url};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, Result};
use crate::models::{CHAPTER_NAME_PREFIX, ChapterRecord};

const USER_AGENT: &str = concat!("cncg-chapter-check/", env!("CARGO_PKG_VERSION"));
const LOCAL_CHAPTERS_VAR: &str = "localChapters";

// Create static selectors to avoid recompiling them each time
static CARD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a.chapter-card").expect("Failed to parse chapter card selector")
});

static LOCAL_CHAPTERS_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"var\s+localChapters\s*=\s*\[").expect("Failed to compile localChapters pattern")
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".chapter-title").expect("Failed to parse chapter title selector")
});

/// Anything that can produce the list of existing chapters.
///
/// Implementations swallow their own failures: an unreachable directory is
/// reported as an empty list so the run can still finish.
pub trait ChapterSource {
    fn fetch_chapters(&self) -> impl Future<Output = Vec<ChapterRecord>> + Send;
}

/// A fixed chapter list, used when the directory is already known.
impl ChapterSource for Vec<ChapterRecord> {
    async fn fetch_chapters(&self) -> Vec<ChapterRecord> {
        self.clone()
    }
}

/// Scrapes the public chapter directory page.
pub struct DirectoryScraper {
    client: Client,
    url: String,
}

impl DirectoryScraper {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(DirectoryScraper {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_html(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(html)
    }
}

impl ChapterSource for DirectoryScraper {
    async fn fetch_chapters(&self) -> Vec<ChapterRecord> {
        info!("Fetching existing chapters from {}", self.url);
        match self.fetch_html().await {
            Ok(html) => {
                let chapters = parse_chapters(&html);
                info!("Found {} existing chapters", chapters.len());
                chapters
            }
            Err(e) => {
                error!("Error fetching chapters: {}", e);
                Vec::new()
            }
        }
    }
}

/// Reads chapter cards from the directory page, falling back to the
/// `localChapters` data embedded in the page when no cards are rendered.
pub fn parse_chapters(html: &str) -> Vec<ChapterRecord> {
    let chapters = parse_chapter_cards(html);
    if !chapters.is_empty() {
        return chapters;
    }

    debug!("No chapter cards found, looking for embedded {} data", LOCAL_CHAPTERS_VAR);
    match parse_local_chapters(html) {
        Ok(chapters) => chapters,
        Err(e) => {
            warn!("Could not read embedded chapter data: {}", e);
            Vec::new()
        }
    }
}

pub fn parse_chapter_cards(html: &str) -> Vec<ChapterRecord> {
    let document = Html::parse_document(html);

    document
        .select(&CARD_SELECTOR)
        .filter_map(|card| {
            let name = card_title(card)?;
            let href = card.value().attr("href")?;
            ChapterRecord::from_name(&name, href)
        })
        .collect()
}

fn card_title(card: ElementRef<'_>) -> Option<String> {
    let title = card.select(&TITLE_SELECTOR).next()?;
    let text = title.text().collect::<Vec<_>>().join(" ");
    Some(text.split_whitespace().collect::<Vec<_>>().join(" "))
}

#[derive(Deserialize)]
struct LocalChapter {
    city_name: Option<String>,
    city: Option<String>,
    country: Option<String>,
    url: Option<String>,
}

/// Parses `var localChapters = [...]` out of an inline script.
///
/// Returns an empty list when the variable is absent and an error when it is
/// present but cannot be read.
pub fn parse_local_chapters(html: &str) -> Result<Vec<ChapterRecord>> {
    let Some(json) = local_chapters_array(html)? else {
        return Ok(Vec::new());
    };

    let entries: Vec<LocalChapter> = serde_json::from_str(json)?;

    let chapters = entries
        .into_iter()
        .filter_map(|entry| {
            let city = entry
                .city_name
                .filter(|c| !c.trim().is_empty())
                .or(entry.city)?
                .trim()
                .to_string();
            let url = entry.url.filter(|u| !u.trim().is_empty())?;
            if city.is_empty() {
                return None;
            }

            let location = match entry.country.as_deref().map(str::trim) {
                Some(country) if !country.is_empty() => format!("{}, {}", city, country),
                _ => city.clone(),
            };

            Some(ChapterRecord {
                name: format!("{} {}", CHAPTER_NAME_PREFIX, city),
                location,
                url: relative_path(&url),
            })
        })
        .collect();

    Ok(chapters)
}

fn local_chapters_array(html: &str) -> Result<Option<&str>> {
    let Some(decl) = LOCAL_CHAPTERS_DECL.find(html) else {
        return Ok(None);
    };
    // The declaration match ends on the array's opening bracket
    let array = &html[decl.end() - 1..];

    let mut depth = 0usize;
    for (i, ch) in array.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(Some(&array[..i + 1]));
                }
            }
            _ => {}
        }
    }

    Err(AppError::ParseError(format!(
        "Could not find matching bracket for {} array",
        LOCAL_CHAPTERS_VAR
    )))
}

fn relative_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) if url.starts_with('/') => url.to_string(),
        Err(_) => format!("/{}", url),
    }
}
