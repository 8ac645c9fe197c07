//! Thematic-vs-direct routing for raw search strings.
//!
//! Pure keyword/pattern heuristic, no network. Titles that happen to contain
//! a theme word ("Love Actually") route thematic.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// How a raw search string should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Genre, mood, or concept phrasing: resolved via curated title lists.
    Thematic,
    /// A literal movie title: resolved via provider-ranked search.
    Direct,
}

/// Words and phrases that mark a query as thematic. Matched as substrings of
/// the lowercased query.
const THEMATIC_KEYWORDS: &[&str] = &[
    "movies that",
    "films that",
    "stories about",
    "films about",
    "movies about",
    "love",
    "romance",
    "action",
    "adventure",
    "comedy",
    "drama",
    "horror",
    "thriller",
    "sci-fi",
    "science fiction",
    "fantasy",
    "mystery",
    "crime",
    "war",
    "western",
    "musical",
    "documentary",
    "animation",
    "family",
    "children",
    "teen",
    "emotional",
    "thought-provoking",
    "mind-bending",
    "heartwarming",
    "inspiring",
    "sad",
    "happy",
    "funny",
    "scary",
    "exciting",
    "relaxing",
    "educational",
    "time travel",
    "space",
    "robots",
    "aliens",
    "magic",
    "superheroes",
    "vampires",
    "zombies",
    "ghosts",
    "monsters",
    "animals",
    "nature",
    "history",
    "future",
    "past",
    "present",
    "world war",
    "civil war",
    "revolution",
    "independence",
    "freedom",
    "justice",
    "revenge",
    "redemption",
    "forgiveness",
    "friendship",
    "parenting",
    "marriage",
    "divorce",
    "dating",
    "breakup",
    "reunion",
    "coming of age",
    "growing up",
    "adulthood",
    "old age",
    "death",
    "life",
    "success",
    "failure",
    "dreams",
    "ambition",
    "career",
    "business",
    "money",
    "poverty",
    "wealth",
    "class",
    "society",
    "politics",
    "government",
    "religion",
    "spirituality",
    "philosophy",
    "science",
    "technology",
    "art",
    "music",
    "dance",
    "sports",
    "competition",
    "teamwork",
    "individual",
    "culture",
    "tradition",
    "modern",
    "classic",
    "contemporary",
    "period",
    "medieval",
    "ancient",
    "futuristic",
    "post-apocalyptic",
    "dystopian",
    "utopian",
    "realistic",
    "surreal",
    "abstract",
];

/// Actor-style phrasings: "name name movies" or "name <common surname> word".
static ACTOR_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(
            r"(?i)\b\w+\s+\w+\s+(movies|films|comedies|dramas|action|horror|thriller|romance)\b",
        )
        .expect("actor pattern regex"),
        Regex::new(
            r"(?i)\b\w+\s+(murphy|smith|jones|brown|davis|wilson|taylor|anderson|thomas|jackson)\s+\w+\b",
        )
        .expect("surname pattern regex"),
    ]
});

/// Classify a raw search string as thematic or direct.
///
/// Deterministic and case-insensitive; callable standalone with no network.
pub fn classify(query: &str) -> QueryMode {
    let lower = query.to_lowercase();

    if THEMATIC_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return QueryMode::Thematic;
    }

    if ACTOR_PATTERNS.iter().any(|pattern| pattern.is_match(query)) {
        return QueryMode::Thematic;
    }

    QueryMode::Direct
}
