//! API Routes
//!
//! The gateway surface: streaming relay, model catalog, single-shot
//! helpers, and goal history CRUD.

mod goals;
mod helpers;
mod models;
mod stream;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Streaming relay
        .route("/stream-goal", post(stream::stream_goal))
        // Catalog
        .route("/models", get(models::get_models))
        // Single-shot helpers
        .route("/generate-title", post(helpers::generate_title))
        .route("/slogans", get(helpers::get_slogans))
        // Goal history
        .route(
            "/history/:user_id",
            get(goals::get_history).delete(goals::clear_history),
        )
        // POST takes an owner id, PUT/DELETE a numeric goal id.
        .route(
            "/goals/:id",
            post(goals::create_goal).put(goals::update_goal).delete(goals::delete_goal),
        )
}
