//! TMDB metadata provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{DiscoveryError, Result};
use crate::types::{Movie, MovieDetails, MoviePage};

/// Default TMDB v3 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Trending window accepted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendingWindow {
    Day,
    #[default]
    Week,
}

impl TrendingWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }
}

/// Movie metadata lookup capability consumed by the orchestrators.
///
/// Pure request/response, no state. Implementations must treat "the provider
/// has no match" as `Ok(None)` in [`search_movie_by_title`], reserving errors
/// for transport and provider failures.
///
/// [`search_movie_by_title`]: MetadataProvider::search_movie_by_title
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Free-text search, provider ranking order.
    async fn search_movies(&self, query: &str, page: u32) -> Result<MoviePage>;

    /// Top-ranked match for an exact title, or `None` when nothing matched.
    async fn search_movie_by_title(&self, title: &str) -> Result<Option<Movie>>;

    /// Extended record for one movie, fetched on demand.
    async fn movie_details(&self, id: u64) -> Result<MovieDetails>;

    /// Titles trending over the given window.
    async fn trending(&self, window: TrendingWindow) -> Result<MoviePage>;

    /// Current popular titles.
    async fn popular(&self, page: u32) -> Result<MoviePage>;

    /// Titles similar to the given movie.
    async fn similar(&self, id: u64) -> Result<MoviePage>;

    /// Provider-computed recommendations for the given movie.
    async fn recommendations_for(&self, id: u64) -> Result<MoviePage>;
}

/// TMDB-backed implementation of [`MetadataProvider`].
///
/// One instance per process; construction takes the injected API key so
/// orchestrators never read configuration themselves.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a non-default endpoint (tests, proxies).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "TMDB request");

        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let response = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| DiscoveryError::Network {
                reason: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Provider {
                reason: format!("TMDB returned {status} for {path}"),
            });
        }

        response.json().await.map_err(|e| DiscoveryError::Provider {
            reason: format!("JSON parsing failed: {e}"),
        })
    }

    /// Full image URL for a poster/backdrop path; placeholder when absent.
    pub fn image_url(path: Option<&str>, size: &str) -> String {
        match path {
            Some(p) => format!("{IMAGE_BASE_URL}/{size}{p}"),
            None => "/placeholder-movie.jpg".to_string(),
        }
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn search_movies(&self, query: &str, page: u32) -> Result<MoviePage> {
        let page = page.to_string();
        self.get_json("/search/movie", &[("query", query), ("page", &page)])
            .await
    }

    async fn search_movie_by_title(&self, title: &str) -> Result<Option<Movie>> {
        let page: MoviePage = self
            .get_json("/search/movie", &[("query", title), ("page", "1")])
            .await?;
        Ok(page.results.into_iter().next())
    }

    async fn movie_details(&self, id: u64) -> Result<MovieDetails> {
        self.get_json(&format!("/movie/{id}"), &[]).await
    }

    async fn trending(&self, window: TrendingWindow) -> Result<MoviePage> {
        self.get_json(&format!("/trending/movie/{}", window.as_str()), &[])
            .await
    }

    async fn popular(&self, page: u32) -> Result<MoviePage> {
        let page = page.to_string();
        self.get_json("/movie/popular", &[("page", &page)]).await
    }

    async fn similar(&self, id: u64) -> Result<MoviePage> {
        self.get_json(&format!("/movie/{id}/similar"), &[]).await
    }

    async fn recommendations_for(&self, id: u64) -> Result<MoviePage> {
        self.get_json(&format!("/movie/{id}/recommendations"), &[])
            .await
    }
}
