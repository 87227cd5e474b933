//! Relates a requested location to existing chapters.
//!
//! Matching is plain case-insensitive substring containment with no notion
//! of word boundaries or geography, so "India" also matches "Indiana" and an
//! empty needle matches every chapter. Callers only pass complete requests.

use crate::models::{ChapterRecord, MatchType, MatchedChapter};

pub fn find_matches(
    location: &str,
    country: &str,
    chapters: &[ChapterRecord],
) -> Vec<MatchedChapter> {
    let location = location.to_lowercase();
    let country = country.to_lowercase();

    chapters
        .iter()
        .filter_map(|chapter| {
            classify(&chapter.location.to_lowercase(), &location, &country).map(|match_type| {
                MatchedChapter {
                    chapter: chapter.clone(),
                    match_type,
                }
            })
        })
        .collect()
}

fn classify(chapter_location: &str, location: &str, country: &str) -> Option<MatchType> {
    let same_city = chapter_location.contains(location) || location.contains(chapter_location);
    let same_country = chapter_location.contains(country);

    if same_city {
        Some(MatchType::SameCity)
    } else if same_country {
        Some(MatchType::SameCountry)
    } else {
        None
    }
}
