//! Goal history CRUD backed by the SQLite store.
//!
//! The store is synchronous, so every operation runs on the blocking
//! pool. Store errors map to their HTTP status; 5xx reasons are logged,
//! never exposed as stack traces.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use serde_json::{json, Value};

use goalbreaker_core::GoalStore;
use goalbreaker_types::{HistoryItem, SaveGoalRequest, StoreError};

use crate::state::AppState;

pub async fn get_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<HistoryItem>>, (StatusCode, String)> {
    let records =
        run_store(state.inner.store.clone(), move |store| store.list_history(&user_id)).await?;
    Ok(Json(records.into_iter().map(HistoryItem::from).collect()))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<SaveGoalRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let id = run_store(state.inner.store.clone(), move |store| {
        store.create_goal(&user_id, &request)
    })
    .await?;
    Ok(Json(json!({ "id": id, "message": "Goal saved" })))
}

pub async fn update_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<i64>,
    Json(request): Json<SaveGoalRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    run_store(state.inner.store.clone(), move |store| store.update_goal(goal_id, &request))
        .await?;
    Ok(Json(json!({ "message": "Goal updated" })))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, String)> {
    run_store(state.inner.store.clone(), move |store| store.delete_goal(goal_id)).await?;
    Ok(Json(json!({ "message": "Goal deleted" })))
}

pub async fn clear_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    run_store(state.inner.store.clone(), move |store| store.clear_history(&user_id)).await?;
    Ok(Json(json!({ "message": "History cleared" })))
}

async fn run_store<T, F>(
    store: Arc<GoalStore>,
    op: F,
) -> Result<T, (StatusCode, String)>
where
    F: FnOnce(&GoalStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("spawn_blocking panicked: {e}"))
        })?
        .map_err(store_error_response)
}

fn store_error_response(err: StoreError) -> (StatusCode, String) {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::error!("Goal store failure: {}", err);
    }
    (status, err.to_string())
}
