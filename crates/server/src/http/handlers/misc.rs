use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::http::error::ApiError;
use crate::state::AppState;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "message": "Church backend is running" }))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let stats = state.store.stats().await?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}
