//! HTTP REST API routes

mod challenge_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/challenges/themes", get(challenge_routes::list_themes))
        .route(
            "/api/challenges",
            get(challenge_routes::list_challenges).post(challenge_routes::generate_challenge),
        )
        .route(
            "/api/challenges/{id}",
            get(challenge_routes::get_challenge).delete(challenge_routes::delete_challenge),
        )
        .route(
            "/api/challenges/{id}/attempts",
            post(challenge_routes::submit_attempt),
        )
        .route(
            "/api/challenges/{id}/completion",
            get(challenge_routes::check_completion),
        )
        .route(
            "/api/challenges/{id}/suggestions",
            post(challenge_routes::suggest_skills),
        )
        .route("/api/challenges/{id}/time", post(challenge_routes::advance_time))
}
