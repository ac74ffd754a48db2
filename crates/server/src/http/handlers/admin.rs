use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use domain::ModerationStatus;

use crate::http::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: Option<String>,
}

/// Flat view of every comment across posts and prayers.
pub async fn list_all_comments(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let comments = state.store.list_comments(None).await?;
    Ok(Json(json!({
        "success": true,
        "total": comments.len(),
        "comments": comments,
    })))
}

pub async fn set_comment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<Value>, ApiError> {
    let status: ModerationStatus = payload.status.unwrap_or_default().parse()?;
    let comment = state.store.set_comment_status(&id, status).await?;
    Ok(Json(json!({ "success": true, "comment": comment })))
}
