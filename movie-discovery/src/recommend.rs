//! AI-backed recommendation flow: prompt building, reply parsing, and
//! per-title resolution against the metadata provider.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, info};

use crate::completion::CompletionProvider;
use crate::error::{DiscoveryError, Result};
use crate::tmdb::MetadataProvider;
use crate::types::{Movie, RecommendationResult};

const CRITIC_SYSTEM_PROMPT: &str = "You are a knowledgeable movie critic and recommendation \
     expert. Provide thoughtful, accurate movie recommendations with engaging explanations.";

const THEMATIC_SYSTEM_PROMPT: &str = "You are a knowledgeable movie recommendation expert. \
     Provide accurate movie suggestions based on themes and concepts.";

const ANALYST_SYSTEM_PROMPT: &str = "You are a film analyst providing thoughtful movie insights.";

/// Sampling bounds per flow, injected at construction.
#[derive(Debug, Clone)]
pub struct RecommendationOptions {
    pub similar_max_tokens: u64,
    pub similar_temperature: f64,
    pub thematic_max_tokens: u64,
    pub thematic_temperature: f64,
    pub analysis_max_tokens: u64,
    pub analysis_temperature: f64,
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self {
            similar_max_tokens: 800,
            similar_temperature: 0.7,
            thematic_max_tokens: 500,
            thematic_temperature: 0.7,
            analysis_max_tokens: 300,
            analysis_temperature: 0.6,
        }
    }
}

/// A completion reply split into prose and the machine-readable title tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// Prose shown to the user, marker line stripped, trimmed.
    pub text: String,
    /// Titles extracted from the marker line, in reply order.
    pub movie_titles: Vec<String>,
}

static MOVIE_TITLES_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)MOVIE_TITLES:\s*(.+)$").expect("movie titles regex"));

/// Split a completion reply into prose and the `MOVIE_TITLES:` tail.
///
/// The last line carrying the marker wins. A reply without the marker keeps
/// its full trimmed text and yields no titles.
pub fn parse_reply(raw: &str) -> ParsedReply {
    let Some(caps) = MOVIE_TITLES_LINE.captures_iter(raw).last() else {
        return ParsedReply {
            text: raw.trim().to_string(),
            movie_titles: Vec::new(),
        };
    };

    let movie_titles = caps[1]
        .split(',')
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .collect();

    let marker = caps.get(0).expect("whole match");
    let before = &raw[..marker.start()];
    let mut text = before.strip_suffix('\n').unwrap_or(before).to_string();
    text.push_str(&raw[marker.end()..]);

    ParsedReply {
        text: text.trim().to_string(),
        movie_titles,
    }
}

/// Builds a prompt, runs the completion, and resolves the returned titles.
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    metadata: Arc<dyn MetadataProvider>,
    completion: Arc<dyn CompletionProvider>,
    options: RecommendationOptions,
}

impl RecommendationOrchestrator {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self::with_options(metadata, completion, RecommendationOptions::default())
    }

    pub fn with_options(
        metadata: Arc<dyn MetadataProvider>,
        completion: Arc<dyn CompletionProvider>,
        options: RecommendationOptions,
    ) -> Self {
        Self {
            metadata,
            completion,
            options,
        }
    }

    /// Recommend five movies similar to `movie`, honoring optional free-text
    /// viewer preferences.
    ///
    /// # Errors
    ///
    /// - `DiscoveryError::RecommendationFailed` - the completion call failed
    pub async fn recommend(
        &self,
        movie: &Movie,
        preferences: Option<&str>,
    ) -> Result<RecommendationResult> {
        info!(movie = %movie.title, "requesting similar-movie recommendations");

        let prompt = similar_prompt(movie, preferences);
        let raw = self
            .complete(
                CRITIC_SYSTEM_PROMPT,
                &prompt,
                self.options.similar_max_tokens,
                self.options.similar_temperature,
            )
            .await?;

        self.finish(raw).await
    }

    /// Recommend ten movies for a free-form theme, with an optional
    /// caller-supplied prompt override.
    ///
    /// # Errors
    ///
    /// - `DiscoveryError::RecommendationFailed` - the completion call failed
    pub async fn recommend_thematic(
        &self,
        theme: &str,
        custom_prompt: Option<&str>,
    ) -> Result<RecommendationResult> {
        info!(theme = %theme, "requesting thematic recommendations");

        let prompt = match custom_prompt {
            Some(custom) => custom.to_string(),
            None => thematic_prompt(theme),
        };
        let raw = self
            .complete(
                THEMATIC_SYSTEM_PROMPT,
                &prompt,
                self.options.thematic_max_tokens,
                self.options.thematic_temperature,
            )
            .await?;

        self.finish(raw).await
    }

    /// Short prose analysis of a single movie. No title extraction.
    ///
    /// # Errors
    ///
    /// - `DiscoveryError::RecommendationFailed` - the completion call failed
    pub async fn analyze(&self, movie: &Movie) -> Result<String> {
        info!(movie = %movie.title, "requesting movie analysis");

        let prompt = analysis_prompt(movie);
        self.complete(
            ANALYST_SYSTEM_PROMPT,
            &prompt,
            self.options.analysis_max_tokens,
            self.options.analysis_temperature,
        )
        .await
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u64,
        temperature: f64,
    ) -> Result<String> {
        self.completion
            .complete(system_prompt, user_prompt, max_tokens, temperature)
            .await
            .map_err(|e| DiscoveryError::RecommendationFailed {
                reason: e.to_string(),
            })
    }

    async fn finish(&self, raw: String) -> Result<RecommendationResult> {
        let reply = parse_reply(&raw);
        info!(titles = reply.movie_titles.len(), "completion reply parsed");

        let movies = self.resolve_titles(&reply.movie_titles).await;
        Ok(RecommendationResult {
            text: reply.text,
            movies,
        })
    }

    /// Resolve extracted titles sequentially, keeping extraction order.
    /// Unresolved titles are skipped, like thematic search.
    async fn resolve_titles(&self, titles: &[String]) -> Vec<Movie> {
        let mut movies = Vec::with_capacity(titles.len());

        for title in titles {
            match self.metadata.search_movie_by_title(title).await {
                Ok(Some(movie)) => movies.push(movie),
                Ok(None) => debug!(title = %title, "recommended title not found"),
                Err(e) => debug!(title = %title, error = %e, "recommended title lookup failed"),
            }
        }

        movies
    }
}

fn similar_prompt(movie: &Movie, preferences: Option<&str>) -> String {
    let year = movie
        .release_year()
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    let preferences = preferences
        .map(|p| format!("User preferences: {p}\n\n"))
        .unwrap_or_default();

    format!(
        "Based on the movie \"{title}\"{year} with the following description: \
         \"{overview}\", please recommend 5 similar movies and explain why each would appeal \
         to someone who enjoyed this film.\n\n\
         {preferences}\
         Please format your response in a clear, engaging way with movie titles in bold and \
         brief explanations for each recommendation. Focus on movies that share similar \
         themes, genres, or storytelling styles.\n\n\
         IMPORTANT: At the end of your response, add a line starting with \"MOVIE_TITLES:\" \
         followed by just the 5 movie titles separated by commas, without any formatting or \
         explanations. For example: \"MOVIE_TITLES: Inception, The Matrix, Blade Runner, \
         Ex Machina, Her\"",
        title = movie.title,
        overview = movie.overview,
    )
}

fn thematic_prompt(theme: &str) -> String {
    format!(
        "Find 10 movies that match this theme or concept: \"{theme}\".\n\n\
         Consider movies that:\n\
         - Match the theme, concept, or emotion described\n\
         - Are well-known and accessible\n\
         - Have good ratings and reviews\n\
         - Represent different genres and time periods\n\n\
         Return only the movie titles separated by commas, no explanations or formatting.\n\
         Example format: \"Inception, Eternal Sunshine of the Spotless Mind, The Matrix, \
         Blade Runner, Her\"\n\n\
         IMPORTANT: At the end of your response, add a line starting with \"MOVIE_TITLES:\" \
         followed by just the 10 movie titles separated by commas, without any formatting or \
         explanations."
    )
}

fn analysis_prompt(movie: &Movie) -> String {
    format!(
        "Analyze the movie \"{}\" and provide insights about its themes, cinematography, \
         storytelling, and cultural impact. Keep it concise but informative (max 200 words).",
        movie.title
    )
}
