//! Typed data model for the movie metadata provider's wire format.

use serde::{Deserialize, Serialize};

use crate::classifier::QueryMode;

/// A single movie record as returned by the metadata provider.
///
/// Immutable once fetched; the provider-assigned `id` is never reassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    /// Plot summary, may be empty.
    #[serde(default)]
    pub overview: String,
    /// Opaque poster image path, resolved to a URL by the caller.
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// ISO date string, may be empty when the provider has no date.
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub video: bool,
}

impl Movie {
    /// Release year, taken from the first four characters of the release
    /// date. `None` when the provider supplied no date.
    pub fn release_year(&self) -> Option<&str> {
        self.release_date.get(..4)
    }
}

/// Extended record fetched lazily per movie, never cached across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Runtime in minutes, 0 if unknown.
    #[serde(default)]
    pub runtime: u64,
    /// Budget in provider currency units, 0 if unknown.
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tagline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    #[serde(default)]
    pub logo_path: Option<String>,
    pub name: String,
    #[serde(default)]
    pub origin_country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    #[serde(default)]
    pub english_name: String,
    pub iso_639_1: String,
    pub name: String,
}

/// One page of provider results, in provider ranking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// Ordered search results plus the classification that produced them.
///
/// The mode lets the caller phrase "no matches" differently for a thematic
/// query with zero resolved curated titles versus a direct title search the
/// provider came up empty on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub mode: QueryMode,
    pub movies: Vec<Movie>,
}

/// Recommendation prose plus the resolved movie records, ordered the way the
/// titles were extracted from the completion reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub text: String,
    pub movies: Vec<Movie>,
}
