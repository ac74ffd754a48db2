use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use domain::{Comment, Error, NewComment, ParentKind};

use crate::http::error::ApiError;
use crate::http::handlers::client_key;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub content: Option<String>,
}

pub async fn list_for_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = state
        .store
        .list_comments(Some((ParentKind::Post, post_id.as_str())))
        .await?;
    Ok(Json(comments))
}

pub async fn create_for_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    if !state.rate.check(&client_key(&headers)) {
        return Err(Error::RateLimited.into());
    }

    let new = NewComment::new(
        payload.name,
        payload.email,
        payload.content.unwrap_or_default(),
        true,
    )?;
    let comment = state
        .store
        .create_comment(ParentKind::Post, &post_id, new)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete_comment(&id).await?;
    Ok(Json(json!({ "success": true })))
}
