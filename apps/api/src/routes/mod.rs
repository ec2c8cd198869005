pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::experience::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/experience/score",
            post(handlers::handle_score_experience),
        )
        .with_state(state)
}
