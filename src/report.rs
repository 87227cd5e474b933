use crate::models::{MatchType, MatchedChapter};

pub const COMMUNITY_BASE_URL: &str = "https://community.cncf.io";

const SECTIONS: [(MatchType, &str); 3] = [
    (MatchType::SameCity, "### ⚠️ Chapters in the Same City:"),
    (MatchType::SameCountry, "### 🌍 Chapters in the Same Country:"),
    (MatchType::Similar, "### 🔍 Similar Chapters:"),
];

/// Renders matches as Markdown grouped by match type.
///
/// Returns an empty string when there is nothing to report.
pub fn format_report(matches: &[MatchedChapter]) -> String {
    let mut sections = Vec::new();

    for (match_type, header) in SECTIONS {
        let lines: Vec<String> = matches
            .iter()
            .filter(|m| m.match_type == match_type)
            .map(chapter_link)
            .collect();

        if lines.is_empty() {
            continue;
        }

        let mut section = String::from(header);
        for line in lines {
            section.push('\n');
            section.push_str(&line);
        }
        sections.push(section);
    }

    sections.join("\n\n")
}

fn chapter_link(matched: &MatchedChapter) -> String {
    format!(
        "- [{}]({}{})",
        matched.chapter.name, COMMUNITY_BASE_URL, matched.chapter.url
    )
}
