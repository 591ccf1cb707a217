use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::{RatingEntry, ScoredMovie};
use crate::services::{
    catalog_queries::{self, SelectionOptions},
    MatchStage, Recommendation, Stars,
};

use super::AppState;

// Request/Response types

/// Fields posted by the selection page
#[derive(Debug, Deserialize)]
pub struct RecommendForm {
    pub industry: Option<String>,
    pub genre: Option<String>,
    pub movie_type: Option<String>,
}

/// The query echoed back with its results, as the results page shows them
#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub industry: Option<String>,
    pub genre: Option<String>,
    pub movie_type: Option<String>,
    pub stage: MatchStage,
    pub movies: Vec<ScoredMovie>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub industry: Option<String>,
    pub genre: Option<String>,
    pub movie_type: Option<String>,
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub title: String,
    /// Validated by [`Stars`]; kept loose so non-integers get a proper 400
    pub stars: Value,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Landing page
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "movie-recommender",
        "endpoints": {
            "selections": "GET /selections",
            "results": "POST /results",
            "recommendations": "POST /api/v1/recommendations",
            "ratings": "POST /api/v1/ratings",
            "genre_counts": "GET /api/v1/stats/genres",
            "romantic_titles": "GET /api/v1/movies/romantic",
        }
    }))
}

/// Options for the selection page
pub async fn selections(State(state): State<AppState>) -> Json<SelectionOptions> {
    let recommender = state.recommender.read().await;
    Json(catalog_queries::selection_options(recommender.catalog()))
}

/// Form submission from the selection page
pub async fn results(
    State(state): State<AppState>,
    Form(form): Form<RecommendForm>,
) -> Json<ResultsResponse> {
    tracing::info!(
        industry = ?form.industry,
        genre = ?form.genre,
        movie_type = ?form.movie_type,
        "Processing recommendation form"
    );

    let recommendation = {
        let mut recommender = state.recommender.write().await;
        recommender.recommend(
            form.industry.as_deref(),
            form.genre.as_deref(),
            form.movie_type.as_deref(),
            state.default_top_n,
        )
    };

    Json(ResultsResponse {
        industry: form.industry,
        genre: form.genre,
        movie_type: form.movie_type,
        stage: recommendation.stage,
        movies: recommendation.movies,
    })
}

/// JSON recommendation endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Json<Recommendation> {
    let top_n = request.top_n.unwrap_or(state.default_top_n);

    tracing::info!(
        industry = ?request.industry,
        genre = ?request.genre,
        movie_type = ?request.movie_type,
        top_n,
        "Processing recommendation request"
    );

    let mut recommender = state.recommender.write().await;
    Json(recommender.recommend(
        request.industry.as_deref(),
        request.genre.as_deref(),
        request.movie_type.as_deref(),
        top_n,
    ))
}

/// Store a star rating
pub async fn rate(
    State(state): State<AppState>,
    Json(request): Json<RateRequest>,
) -> AppResult<(StatusCode, Json<RatingEntry>)> {
    let stars = Stars::try_from(&request.stars).inspect_err(|e| {
        tracing::info!(title = %request.title, error = %e, "Rejected rating");
    })?;

    let mut recommender = state.recommender.write().await;
    let entry = recommender.record_rating(&request.title, stars);

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Movie count per genre
pub async fn genre_counts(State(state): State<AppState>) -> Json<BTreeMap<String, usize>> {
    let recommender = state.recommender.read().await;
    Json(catalog_queries::count_movies_by_genre(recommender.catalog()))
}

/// Titles matching the romance keywords
pub async fn romantic_titles(State(state): State<AppState>) -> Json<Vec<String>> {
    let recommender = state.recommender.read().await;
    Json(catalog_queries::find_romantic_titles(recommender.catalog()))
}
