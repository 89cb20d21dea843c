//! Model catalog endpoint.

use axum::extract::State;
use axum::response::Json;

use goalbreaker_types::ModelInfo;

use crate::state::AppState;

/// Always answers, at worst with the static table. A slow provider never
/// turns this into a gateway timeout.
pub async fn get_models(State(state): State<AppState>) -> Json<Vec<ModelInfo>> {
    Json(state.inner.catalog.list_models().await)
}
