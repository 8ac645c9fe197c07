//! Movie discovery core.
//!
//! Composes a movie-metadata provider and an LLM completion provider behind
//! typed clients, and routes free-text queries through an "intelligent
//! search" pipeline: classify the query, resolve it via curated title lists
//! or direct provider search, and build AI-backed recommendations.

pub mod classifier;
pub mod completion;
pub mod error;
pub mod recommend;
pub mod search;
pub mod themes;
pub mod tmdb;
pub mod types;

// Re-export commonly used types
pub use classifier::{QueryMode, classify};
pub use completion::{CompletionProvider, DEFAULT_MODEL, OpenAiCompletion};
pub use error::{DiscoveryError, Result};
pub use recommend::{RecommendationOptions, RecommendationOrchestrator};
pub use search::SearchOrchestrator;
pub use tmdb::{MetadataProvider, TmdbClient, TrendingWindow};
pub use types::{
    Movie, MovieDetails, MoviePage, RecommendationResult, SearchResult,
};

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: "An overview.".to_string(),
            poster_path: None,
            backdrop_path: None,
            release_date: "1999-03-31".to_string(),
            vote_average: 8.2,
            vote_count: 100,
            genre_ids: vec![28],
            adult: false,
            original_language: "en".to_string(),
            original_title: title.to_string(),
            popularity: 50.0,
            video: false,
        }
    }

    struct TestMetadata {
        by_title: HashMap<String, Movie>,
    }

    #[async_trait]
    impl MetadataProvider for TestMetadata {
        async fn search_movies(&self, query: &str, page: u32) -> Result<MoviePage> {
            let results = self
                .by_title
                .values()
                .filter(|m| m.title.to_lowercase().contains(&query.to_lowercase()))
                .cloned()
                .collect::<Vec<_>>();
            Ok(MoviePage {
                page,
                total_pages: 1,
                total_results: results.len() as u32,
                results,
            })
        }

        async fn search_movie_by_title(&self, title: &str) -> Result<Option<Movie>> {
            Ok(self.by_title.get(title).cloned())
        }

        async fn movie_details(&self, _id: u64) -> Result<MovieDetails> {
            unreachable!("not exercised here")
        }

        async fn trending(&self, _window: TrendingWindow) -> Result<MoviePage> {
            unreachable!("not exercised here")
        }

        async fn popular(&self, _page: u32) -> Result<MoviePage> {
            unreachable!("not exercised here")
        }

        async fn similar(&self, _id: u64) -> Result<MoviePage> {
            unreachable!("not exercised here")
        }

        async fn recommendations_for(&self, _id: u64) -> Result<MoviePage> {
            unreachable!("not exercised here")
        }
    }

    struct TestCompletion;

    #[async_trait]
    impl CompletionProvider for TestCompletion {
        async fn complete(
            &self,
            _system_prompt: &str,
            _user_prompt: &str,
            _max_tokens: u64,
            _temperature: f64,
        ) -> Result<String> {
            Ok("You might enjoy these.\nMOVIE_TITLES: The Matrix, Dark City".to_string())
        }
    }

    #[tokio::test]
    async fn search_and_recommend_pipeline() {
        let metadata = Arc::new(TestMetadata {
            by_title: [
                ("The Matrix", 603),
                ("Dark City", 2666),
                ("The Prestige", 1124),
            ]
            .into_iter()
            .map(|(title, id)| (title.to_string(), movie(id, title)))
            .collect(),
        });

        let search = SearchOrchestrator::new(metadata.clone());
        let result = search.search("movies that make you think").await.unwrap();
        assert_eq!(result.mode, QueryMode::Thematic);
        // Only two of the curated "think" titles exist in the fixture.
        assert_eq!(
            result.movies.iter().map(|m| m.title.as_str()).collect::<Vec<_>>(),
            vec!["The Matrix", "The Prestige"]
        );

        let recommender = RecommendationOrchestrator::new(metadata, Arc::new(TestCompletion));
        let recommendation = recommender.recommend(&result.movies[0], None).await.unwrap();
        assert_eq!(recommendation.text, "You might enjoy these.");
        assert_eq!(
            recommendation
                .movies
                .iter()
                .map(|m| m.title.as_str())
                .collect::<Vec<_>>(),
            vec!["The Matrix", "Dark City"]
        );
    }
}
