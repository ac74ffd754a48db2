use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use domain::{NewComment, NewPrayer, ParentKind};

use crate::http::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreatePrayerRequest {
    pub name: Option<String>,
    pub request: Option<String>,
    pub anonymous: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreatePrayerCommentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub content: Option<String>,
}

pub async fn list_prayers(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let prayers = state.store.list_prayers().await?;
    Ok(Json(json!({
        "success": true,
        "total": prayers.len(),
        "prayers": prayers,
    })))
}

pub async fn create_prayer(
    State(state): State<AppState>,
    Json(payload): Json<CreatePrayerRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let new = NewPrayer::new(
        payload.name,
        payload.request.unwrap_or_default(),
        payload.anonymous.unwrap_or(false),
    )?;
    let prayer = state.store.create_prayer(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "prayer": prayer })),
    ))
}

pub async fn heart_prayer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let prayer = state.store.heart_prayer(&id).await?;
    Ok(Json(json!({ "success": true, "prayer": prayer })))
}

pub async fn list_prayer_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    // 404 on a missing parent, not an empty list
    state.store.get_prayer(&id).await?;
    let comments = state
        .store
        .list_comments(Some((ParentKind::Prayer, id.as_str())))
        .await?;
    Ok(Json(json!({ "success": true, "comments": comments })))
}

pub async fn create_prayer_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CreatePrayerCommentRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let new = NewComment::new(
        payload.name,
        payload.email,
        payload.content.unwrap_or_default(),
        false,
    )?;
    let comment = state
        .store
        .create_comment(ParentKind::Prayer, &id, new)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "comment": comment })),
    ))
}

pub async fn delete_prayer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete_prayer(&id).await?;
    Ok(Json(json!({ "success": true })))
}
