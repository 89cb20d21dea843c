//! Title and slogan helper endpoints. These never fail; the core helpers
//! degrade to embedded fallbacks on any upstream problem.

use axum::extract::{Json, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde_json::json;

use goalbreaker_types::chat::TitleRequest;

use crate::state::AppState;

pub async fn generate_title(
    State(state): State<AppState>,
    Json(request): Json<TitleRequest>,
) -> impl IntoResponse {
    let title = state.inner.oneshot.generate_title(&request.context).await;
    Json(json!({ "title": title }))
}

pub async fn get_slogans(State(state): State<AppState>) -> impl IntoResponse {
    let slogans = state.inner.oneshot.generate_slogans().await;
    (
        [(header::CACHE_CONTROL, "no-store, no-cache, must-revalidate")],
        Json(json!({ "slogans": slogans })),
    )
}
