//! Reads the requested location and country out of a chapter request issue.
//!
//! The issue form renders each question as a heading line, a blank line, and
//! then the answer. The parser relies on that layout: the answer is always
//! `ANSWER_OFFSET` lines below the first line that mentions the question.

use std::fmt;

use tracing::warn;

pub const LOCATION_MARKER: &str = "City or location name for your CNCG";
pub const COUNTRY_MARKER: &str = "Country of your CNCG";
pub const ANSWER_OFFSET: usize = 2;

/// The issue body no longer matches the form layout the parser expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateDrift {
    MissingMarker { marker: &'static str },
    AnswerOutOfBounds { marker: &'static str, line: usize },
}

impl fmt::Display for TemplateDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateDrift::MissingMarker { marker } => {
                write!(f, "marker {:?} not found in issue body", marker)
            }
            TemplateDrift::AnswerOutOfBounds { marker, line } => write!(
                f,
                "marker {:?} at line {} has no answer line {} below it",
                marker, line, ANSWER_OFFSET
            ),
        }
    }
}

impl std::error::Error for TemplateDrift {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRequest {
    pub location: String,
    pub country: String,
}

impl ParsedRequest {
    pub fn parse(body: &str) -> Self {
        ParsedRequest {
            location: field_or_empty(body, LOCATION_MARKER),
            country: field_or_empty(body, COUNTRY_MARKER),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.location.is_empty() && !self.country.is_empty()
    }

    pub fn summary(&self) -> String {
        format!("{}, {}", self.location, self.country)
    }
}

fn field_or_empty(body: &str, marker: &'static str) -> String {
    extract_field(body, marker).unwrap_or_else(|drift| {
        warn!("Could not read issue field: {}", drift);
        String::new()
    })
}

/// Returns the trimmed answer line for the first occurrence of `marker`.
pub fn extract_field(body: &str, marker: &'static str) -> Result<String, TemplateDrift> {
    let lines: Vec<&str> = body.split('\n').collect();

    let line = lines
        .iter()
        .position(|l| l.contains(marker))
        .ok_or(TemplateDrift::MissingMarker { marker })?;

    lines
        .get(line + ANSWER_OFFSET)
        .map(|answer| answer.trim().to_string())
        .ok_or(TemplateDrift::AnswerOutOfBounds { marker, line })
}
