//! Query routing and multi-step thematic resolution.

use std::sync::Arc;

use tracing::{info, warn};

use crate::classifier::{QueryMode, classify};
use crate::error::{DiscoveryError, Result};
use crate::themes;
use crate::tmdb::MetadataProvider;
use crate::types::{Movie, MoviePage, SearchResult};

/// Routes a query to direct provider search or curated thematic resolution.
///
/// Holds no per-request state; concurrent searches share only the provider
/// client behind the `Arc`.
#[derive(Clone)]
pub struct SearchOrchestrator {
    metadata: Arc<dyn MetadataProvider>,
}

impl SearchOrchestrator {
    pub fn new(metadata: Arc<dyn MetadataProvider>) -> Self {
        Self { metadata }
    }

    /// Search for movies matching `query`.
    ///
    /// Direct queries return the provider's ranked results verbatim. Thematic
    /// queries resolve a curated title list one lookup at a time, keeping
    /// title order; if no curated title resolves, the original query is
    /// retried as a direct search. An empty result is not an error.
    ///
    /// # Errors
    ///
    /// - `DiscoveryError::InvalidQuery` - query is blank or whitespace
    /// - `DiscoveryError::SearchFailed` - the direct call (or the thematic
    ///   fallback direct call) hit a transport failure
    pub async fn search(&self, query: &str) -> Result<SearchResult> {
        if query.trim().is_empty() {
            return Err(DiscoveryError::InvalidQuery);
        }

        match classify(query) {
            QueryMode::Direct => {
                info!(query = %query, "direct search");
                let page = self.direct(query).await?;
                Ok(SearchResult {
                    mode: QueryMode::Direct,
                    movies: page.results,
                })
            }
            QueryMode::Thematic => {
                info!(query = %query, "thematic search");
                let movies = self.resolve_curated(query).await;

                if movies.is_empty() {
                    info!(query = %query, "no curated titles resolved, falling back to direct search");
                    let page = self.direct(query).await?;
                    return Ok(SearchResult {
                        mode: QueryMode::Thematic,
                        movies: page.results,
                    });
                }

                Ok(SearchResult {
                    mode: QueryMode::Thematic,
                    movies,
                })
            }
        }
    }

    async fn direct(&self, query: &str) -> Result<MoviePage> {
        self.metadata
            .search_movies(query, 1)
            .await
            .map_err(|e| DiscoveryError::SearchFailed {
                query: query.to_string(),
                reason: e.to_string(),
            })
    }

    /// Resolve each curated title to a provider record, keeping title order.
    ///
    /// A title that errors or finds no match is skipped; one bad title never
    /// aborts the rest of the batch.
    async fn resolve_curated(&self, query: &str) -> Vec<Movie> {
        let titles = themes::resolve(query);
        let mut movies = Vec::with_capacity(titles.len());

        for title in titles {
            match self.metadata.search_movie_by_title(title).await {
                Ok(Some(movie)) => movies.push(movie),
                Ok(None) => info!(title = %title, "curated title not found"),
                Err(e) => warn!(title = %title, error = %e, "curated title lookup failed"),
            }
        }

        movies
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::tmdb::TrendingWindow;
    use crate::types::MovieDetails;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: String::new(),
            vote_average: 0.0,
            vote_count: 0,
            genre_ids: Vec::new(),
            adult: false,
            original_language: "en".to_string(),
            original_title: title.to_string(),
            popularity: 0.0,
            video: false,
        }
    }

    /// Canned metadata provider: per-title answers, a fixed direct result
    /// set, and a call log for asserting the fallback path.
    struct StubMetadata {
        by_title: HashMap<String, Movie>,
        failing_titles: HashSet<String>,
        direct_results: Vec<Movie>,
        direct_fails: bool,
        calls: Mutex<Vec<String>>,
    }

    impl StubMetadata {
        fn new() -> Self {
            Self {
                by_title: HashMap::new(),
                failing_titles: HashSet::new(),
                direct_results: Vec::new(),
                direct_fails: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn knows(mut self, title: &str, id: u64) -> Self {
            self.by_title.insert(title.to_string(), movie(id, title));
            self
        }

        fn failing_on(mut self, title: &str) -> Self {
            self.failing_titles.insert(title.to_string());
            self
        }

        fn with_direct(mut self, movies: Vec<Movie>) -> Self {
            self.direct_results = movies;
            self
        }

        fn direct_failing(mut self) -> Self {
            self.direct_fails = true;
            self
        }

        fn log(&self, entry: String) {
            self.calls.lock().unwrap().push(entry);
        }
    }

    #[async_trait]
    impl MetadataProvider for StubMetadata {
        async fn search_movies(&self, query: &str, page: u32) -> Result<MoviePage> {
            self.log(format!("search:{query}:{page}"));
            if self.direct_fails {
                return Err(DiscoveryError::Network {
                    reason: "connection refused".to_string(),
                });
            }
            Ok(MoviePage {
                page: 1,
                results: self.direct_results.clone(),
                total_pages: 1,
                total_results: self.direct_results.len() as u32,
            })
        }

        async fn search_movie_by_title(&self, title: &str) -> Result<Option<Movie>> {
            self.log(format!("title:{title}"));
            if self.failing_titles.contains(title) {
                return Err(DiscoveryError::Network {
                    reason: "timed out".to_string(),
                });
            }
            Ok(self.by_title.get(title).cloned())
        }

        async fn movie_details(&self, _id: u64) -> Result<MovieDetails> {
            unreachable!("not exercised by search tests")
        }

        async fn trending(&self, _window: TrendingWindow) -> Result<MoviePage> {
            unreachable!("not exercised by search tests")
        }

        async fn popular(&self, _page: u32) -> Result<MoviePage> {
            unreachable!("not exercised by search tests")
        }

        async fn similar(&self, _id: u64) -> Result<MoviePage> {
            unreachable!("not exercised by search tests")
        }

        async fn recommendations_for(&self, _id: u64) -> Result<MoviePage> {
            unreachable!("not exercised by search tests")
        }
    }

    #[tokio::test]
    async fn blank_queries_are_rejected() {
        let orchestrator = SearchOrchestrator::new(Arc::new(StubMetadata::new()));
        assert!(matches!(
            orchestrator.search("").await,
            Err(DiscoveryError::InvalidQuery)
        ));
        assert!(matches!(
            orchestrator.search("   ").await,
            Err(DiscoveryError::InvalidQuery)
        ));
    }

    #[tokio::test]
    async fn direct_queries_return_provider_order_verbatim() {
        let stub = StubMetadata::new()
            .with_direct(vec![movie(1, "Oppenheimer"), movie(2, "Oppenheimer (1980)")]);
        let orchestrator = SearchOrchestrator::new(Arc::new(stub));

        let result = orchestrator.search("Oppenheimer").await.unwrap();
        assert_eq!(result.mode, QueryMode::Direct);
        assert_eq!(
            result.movies.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[tokio::test]
    async fn thematic_queries_resolve_curated_titles_in_order() {
        // Only two of the ten "think" titles are known to the provider.
        let stub = StubMetadata::new()
            .knows("The Matrix", 603)
            .knows("The Prestige", 1124);
        let orchestrator = SearchOrchestrator::new(Arc::new(stub));

        let result = orchestrator.search("movies that make you think").await.unwrap();
        assert_eq!(result.mode, QueryMode::Thematic);
        assert_eq!(
            result.movies.iter().map(|m| m.title.as_str()).collect::<Vec<_>>(),
            vec!["The Matrix", "The Prestige"]
        );
    }

    #[tokio::test]
    async fn one_failing_title_never_aborts_the_batch() {
        let stub = StubMetadata::new()
            .knows("The Matrix", 603)
            .knows("The Prestige", 1124)
            .failing_on("Inception")
            .failing_on("Interstellar");
        let orchestrator = SearchOrchestrator::new(Arc::new(stub));

        let result = orchestrator.search("movies that make you think").await.unwrap();
        assert_eq!(result.movies.len(), 2);
    }

    #[tokio::test]
    async fn zero_resolved_titles_fall_back_to_direct_search() {
        let stub = StubMetadata::new().with_direct(vec![movie(9, "Some Result")]);
        let orchestrator = SearchOrchestrator::new(Arc::new(stub));

        let result = orchestrator.search("movies that make you think").await.unwrap();
        assert_eq!(result.mode, QueryMode::Thematic);
        assert_eq!(result.movies.len(), 1);
        assert_eq!(result.movies[0].id, 9);
    }

    #[tokio::test]
    async fn fallback_issues_one_direct_call_with_the_original_query() {
        let stub = Arc::new(StubMetadata::new());
        let orchestrator = SearchOrchestrator::new(stub.clone());

        let result = orchestrator.search("movies that make you think").await.unwrap();
        assert!(result.movies.is_empty());

        let calls = stub.calls.lock().unwrap();
        // Ten title lookups, then exactly one direct fallback.
        assert_eq!(calls.len(), 11);
        assert_eq!(calls[10], "search:movies that make you think:1");
    }

    #[tokio::test]
    async fn fallback_transport_failure_surfaces_as_search_failed() {
        let stub = StubMetadata::new().direct_failing();
        let orchestrator = SearchOrchestrator::new(Arc::new(stub));

        let err = orchestrator
            .search("movies that make you think")
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::SearchFailed { .. }));
    }

    #[tokio::test]
    async fn direct_transport_failure_surfaces_as_search_failed() {
        let stub = StubMetadata::new().direct_failing();
        let orchestrator = SearchOrchestrator::new(Arc::new(stub));

        let err = orchestrator.search("Oppenheimer").await.unwrap_err();
        match err {
            DiscoveryError::SearchFailed { query, .. } => assert_eq!(query, "Oppenheimer"),
            other => panic!("expected SearchFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn repeated_searches_yield_identical_results() {
        let stub = StubMetadata::new()
            .knows("The Matrix", 603)
            .knows("Memento", 77);
        let orchestrator = SearchOrchestrator::new(Arc::new(stub));

        let first = orchestrator.search("movies that make you think").await.unwrap();
        let second = orchestrator.search("movies that make you think").await.unwrap();
        assert_eq!(first, second);
    }
}
