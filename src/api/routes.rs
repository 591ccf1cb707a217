use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Pages backing the web front end
        .route("/", get(handlers::index))
        .route("/selections", get(handlers::selections))
        .route("/results", post(handlers::results))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/recommendations", post(handlers::recommend))
        .route("/ratings", post(handlers::rate))
        .route("/stats/genres", get(handlers::genre_counts))
        .route("/movies/romantic", get(handlers::romantic_titles))
}
