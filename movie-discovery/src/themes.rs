//! Curated theme-to-titles lookup.
//!
//! A static, hand-authored table, not an AI call. Evaluated top to bottom
//! with first match winning; several keyword sets overlap ("time" is a
//! substring of phrases matched earlier), so entry order changes results.

/// A curated theme: substring triggers plus ten canonical titles.
struct Theme {
    keywords: &'static [&'static str],
    titles: [&'static str; 10],
}

const THEME_TABLE: &[Theme] = &[
    Theme {
        keywords: &["think", "thought-provoking", "mind-bending"],
        titles: [
            "Inception",
            "The Matrix",
            "Interstellar",
            "Blade Runner",
            "Eternal Sunshine of the Spotless Mind",
            "The Truman Show",
            "Fight Club",
            "Memento",
            "Donnie Darko",
            "The Prestige",
        ],
    },
    Theme {
        keywords: &["love", "romance", "romantic"],
        titles: [
            "The Notebook",
            "Titanic",
            "La La Land",
            "Before Sunrise",
            "Eternal Sunshine of the Spotless Mind",
            "500 Days of Summer",
            "The Princess Bride",
            "Casablanca",
            "When Harry Met Sally",
            "About Time",
        ],
    },
    Theme {
        keywords: &["action"],
        titles: [
            "Mad Max: Fury Road",
            "John Wick",
            "The Dark Knight",
            "Mission: Impossible",
            "Die Hard",
            "The Avengers",
            "Black Panther",
            "Wonder Woman",
            "Top Gun: Maverick",
            "The Matrix",
        ],
    },
    Theme {
        keywords: &["comedy", "funny", "humor"],
        titles: [
            "The Grand Budapest Hotel",
            "Superbad",
            "Bridesmaids",
            "The Hangover",
            "Shaun of the Dead",
            "Hot Fuzz",
            "The Big Lebowski",
            "Groundhog Day",
            "Office Space",
            "Mean Girls",
        ],
    },
    Theme {
        keywords: &["eddie murphy"],
        titles: [
            "Coming to America",
            "Beverly Hills Cop",
            "The Nutty Professor",
            "Dr. Dolittle",
            "Shrek",
            "Mulan",
            "Beverly Hills Cop II",
            "Trading Places",
            "48 Hrs.",
            "Bowfinger",
        ],
    },
    Theme {
        keywords: &["will smith"],
        titles: [
            "Men in Black",
            "Independence Day",
            "The Pursuit of Happyness",
            "I Am Legend",
            "Hitch",
            "Bad Boys",
            "Ali",
            "The Legend of Bagger Vance",
            "Enemy of the State",
            "Wild Wild West",
        ],
    },
    Theme {
        keywords: &["tom hanks"],
        titles: [
            "Forrest Gump",
            "Cast Away",
            "Saving Private Ryan",
            "The Green Mile",
            "Big",
            "Philadelphia",
            "Apollo 13",
            "Toy Story",
            "The Terminal",
            "Sleepless in Seattle",
        ],
    },
    Theme {
        keywords: &["leonardo dicaprio", "leo dicaprio"],
        titles: [
            "Titanic",
            "Inception",
            "The Wolf of Wall Street",
            "The Revenant",
            "Catch Me If You Can",
            "The Departed",
            "Shutter Island",
            "Django Unchained",
            "The Great Gatsby",
            "Once Upon a Time in Hollywood",
        ],
    },
    Theme {
        keywords: &["sci-fi", "science fiction", "space"],
        titles: [
            "Interstellar",
            "The Martian",
            "Blade Runner 2049",
            "Arrival",
            "Ex Machina",
            "Her",
            "Gravity",
            "The Fifth Element",
            "District 9",
            "Moon",
        ],
    },
    Theme {
        keywords: &["horror", "scary"],
        titles: [
            "The Shining",
            "A Quiet Place",
            "Get Out",
            "Hereditary",
            "The Conjuring",
            "It Follows",
            "The Babadook",
            "The Witch",
            "Midsommar",
            "Us",
        ],
    },
    Theme {
        keywords: &["adventure"],
        titles: [
            "Indiana Jones and the Raiders of the Lost Ark",
            "The Lord of the Rings: The Fellowship of the Ring",
            "Jurassic Park",
            "Pirates of the Caribbean: The Curse of the Black Pearl",
            "The Princess Bride",
            "The Goonies",
            "Jumanji",
            "National Treasure",
            "The Mummy",
            "Romancing the Stone",
        ],
    },
    Theme {
        keywords: &["time travel", "time"],
        titles: [
            "Back to the Future",
            "Interstellar",
            "Looper",
            "Edge of Tomorrow",
            "About Time",
            "The Time Traveler's Wife",
            "Primer",
            "12 Monkeys",
            "Source Code",
            "Arrival",
        ],
    },
    Theme {
        keywords: &["emotional", "heartwarming", "feel-good"],
        titles: [
            "The Shawshank Redemption",
            "Forrest Gump",
            "The Green Mile",
            "Big Fish",
            "The Secret Life of Walter Mitty",
            "Up",
            "The Pursuit of Happyness",
            "Good Will Hunting",
            "Dead Poets Society",
            "The Blind Side",
        ],
    },
];

/// Fallback list for thematic queries no table entry matches.
const DEFAULT_TITLES: [&str; 10] = [
    "Inception",
    "The Matrix",
    "The Dark Knight",
    "Interstellar",
    "The Shawshank Redemption",
    "Forrest Gump",
    "Pulp Fiction",
    "Fight Club",
    "The Godfather",
    "Schindler's List",
];

/// Map a thematic query to its curated ten-title list.
///
/// Always returns exactly ten titles; unmatched queries get the default list.
pub fn resolve(query: &str) -> &'static [&'static str] {
    let lower = query.to_lowercase();

    for theme in THEME_TABLE {
        if theme.keywords.iter().any(|kw| lower.contains(kw)) {
            return &theme.titles;
        }
    }

    &DEFAULT_TITLES
}
