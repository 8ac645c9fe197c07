use std::sync::Arc;

use anyhow::Context as _;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use movie_discovery::{
    DiscoveryError, MetadataProvider, Movie, MovieDetails, MoviePage, OpenAiCompletion, QueryMode,
    RecommendationOrchestrator, RecommendationResult, SearchOrchestrator, SearchResult,
    TmdbClient, TrendingWindow, classify, DEFAULT_MODEL,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};

#[derive(Debug, Clone)]
struct ServiceConfig {
    tmdb_api_key: String,
    tmdb_base_url: Option<String>,
    openai_api_key: String,
    openai_model: String,
    bind_addr: String,
}

impl ServiceConfig {
    fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            tmdb_api_key: std::env::var("TMDB_API_KEY").context("TMDB_API_KEY not set")?,
            tmdb_base_url: std::env::var("TMDB_BASE_URL").ok(),
            openai_api_key: std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?,
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        })
    }
}

#[derive(Clone)]
struct AppState {
    tmdb: Arc<TmdbClient>,
    search: Arc<SearchOrchestrator>,
    recommender: Arc<RecommendationOrchestrator>,
}

#[derive(Debug, Deserialize)]
struct QueryParams {
    query: String,
}

#[derive(Debug, Deserialize)]
struct TrendingParams {
    window: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageParams {
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RecommendRequest {
    movie: Movie,
    preferences: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ThematicRequest {
    theme: String,
    custom_prompt: Option<String>,
}

#[derive(Debug, Serialize)]
struct ClassifyResponse {
    mode: QueryMode,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: DiscoveryError) -> HandlerError {
    let status = match err {
        DiscoveryError::InvalidQuery => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!("request failed: {}", err);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

fn bad_request(message: impl Into<String>) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

async fn health_check() -> &'static str {
    "OK"
}

async fn search(
    Query(params): Query<QueryParams>,
    State(state): State<AppState>,
) -> Result<Json<SearchResult>, HandlerError> {
    info!("Received search request: {}", params.query);
    let result = state
        .search
        .search(&params.query)
        .await
        .map_err(error_response)?;
    Ok(Json(result))
}

async fn classify_query(
    Query(params): Query<QueryParams>,
) -> Result<Json<ClassifyResponse>, HandlerError> {
    Ok(Json(ClassifyResponse {
        mode: classify(&params.query),
    }))
}

async fn trending(
    Query(params): Query<TrendingParams>,
    State(state): State<AppState>,
) -> Result<Json<MoviePage>, HandlerError> {
    let window = match params.window.as_deref() {
        None | Some("week") => TrendingWindow::Week,
        Some("day") => TrendingWindow::Day,
        Some(other) => return Err(bad_request(format!("invalid trending window '{other}'"))),
    };

    let page = state
        .tmdb
        .trending(window)
        .await
        .map_err(error_response)?;
    Ok(Json(page))
}

async fn popular_movies(
    Query(params): Query<PageParams>,
    State(state): State<AppState>,
) -> Result<Json<MoviePage>, HandlerError> {
    let page = state
        .tmdb
        .popular(params.page.unwrap_or(1))
        .await
        .map_err(error_response)?;
    Ok(Json(page))
}

async fn movie_details(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<MovieDetails>, HandlerError> {
    let details = state
        .tmdb
        .movie_details(id)
        .await
        .map_err(error_response)?;
    Ok(Json(details))
}

async fn similar_movies(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<MoviePage>, HandlerError> {
    let page = state.tmdb.similar(id).await.map_err(error_response)?;
    Ok(Json(page))
}

async fn provider_recommendations(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<MoviePage>, HandlerError> {
    let page = state
        .tmdb
        .recommendations_for(id)
        .await
        .map_err(error_response)?;
    Ok(Json(page))
}

async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendationResult>, HandlerError> {
    info!("Received recommendation request for: {}", request.movie.title);
    let result = state
        .recommender
        .recommend(&request.movie, request.preferences.as_deref())
        .await
        .map_err(error_response)?;
    Ok(Json(result))
}

async fn recommend_thematic(
    State(state): State<AppState>,
    Json(request): Json<ThematicRequest>,
) -> Result<Json<RecommendationResult>, HandlerError> {
    if request.theme.trim().is_empty() {
        return Err(bad_request("theme must not be blank"));
    }

    info!("Received thematic recommendation request: {}", request.theme);
    let result = state
        .recommender
        .recommend_thematic(&request.theme, request.custom_prompt.as_deref())
        .await
        .map_err(error_response)?;
    Ok(Json(result))
}

fn build_state(config: &ServiceConfig) -> AppState {
    let tmdb = Arc::new(match &config.tmdb_base_url {
        Some(base_url) => TmdbClient::with_base_url(&config.tmdb_api_key, base_url),
        None => TmdbClient::new(&config.tmdb_api_key),
    });
    let completion = Arc::new(OpenAiCompletion::new(
        &config.openai_api_key,
        &config.openai_model,
    ));

    AppState {
        search: Arc::new(SearchOrchestrator::new(tmdb.clone())),
        recommender: Arc::new(RecommendationOrchestrator::new(tmdb.clone(), completion)),
        tmdb,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .compact()
        .init();

    info!("Starting discovery service");

    let config = ServiceConfig::from_env()?;
    let state = build_state(&config);

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/search", get(search))
        .route("/classify", get(classify_query))
        .route("/trending", get(trending))
        .route("/popular", get(popular_movies))
        .route("/movies/{id}", get(movie_details))
        .route("/movies/{id}/similar", get(similar_movies))
        .route("/movies/{id}/recommendations", get(provider_recommendations))
        .route("/recommend", post(recommend))
        .route("/recommend/thematic", post(recommend_thematic))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);

    info!("Available endpoints:");
    info!("  GET  /health                      - Health check");
    info!("  GET  /search?query=...            - Intelligent movie search");
    info!("  GET  /classify?query=...          - Thematic/direct classification");
    info!("  GET  /trending?window=day|week    - Trending movies");
    info!("  GET  /popular?page=N              - Popular movies");
    info!("  GET  /movies/{{id}}                 - Movie details");
    info!("  GET  /movies/{{id}}/similar         - Similar movies");
    info!("  GET  /movies/{{id}}/recommendations - Provider recommendations");
    info!("  POST /recommend                   - AI recommendations for a movie");
    info!("  POST /recommend/thematic          - AI recommendations for a theme");

    axum::serve(listener, app).await?;

    Ok(())
}
