use std::fmt;

use serde::Serialize;

/// Prefix every chapter name on the directory carries, e.g. "Cloud Native Paris".
pub const CHAPTER_NAME_PREFIX: &str = "Cloud Native";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterRecord {
    pub name: String,
    pub location: String,
    /// Path relative to the community site root, e.g. "/cloud-native-paris/".
    pub url: String,
}

impl ChapterRecord {
    /// Builds a record from a directory name, or `None` when nothing is left
    /// of the name once the prefix is removed.
    pub fn from_name(name: &str, url: &str) -> Option<Self> {
        let location = location_from_name(name);
        if location.is_empty() {
            return None;
        }
        Some(ChapterRecord {
            name: name.trim().to_string(),
            location,
            url: url.to_string(),
        })
    }
}

pub fn location_from_name(name: &str) -> String {
    name.replacen(CHAPTER_NAME_PREFIX, "", 1).trim().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    SameCity,
    SameCountry,
    Similar,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::SameCity => "same_city",
            MatchType::SameCountry => "same_country",
            MatchType::Similar => "similar",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedChapter {
    #[serde(flatten)]
    pub chapter: ChapterRecord,
    #[serde(rename = "matchType")]
    pub match_type: MatchType,
}
