use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use domain::{window, Error, NewTestimonial};

use crate::http::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateTestimonialRequest {
    pub name: Option<String>,
    pub testimony: Option<String>,
    pub anonymous: Option<bool>,
}

pub async fn list_testimonials(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let testimonials = state.store.list_testimonials().await?;
    Ok(Json(json!({
        "success": true,
        "total": testimonials.len(),
        "testimonials": testimonials,
        "submissionWindowOpen": window::is_open((state.clock)()),
    })))
}

pub async fn create_testimonial(
    State(state): State<AppState>,
    Json(payload): Json<CreateTestimonialRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let now = (state.clock)();
    if !window::is_open(now) {
        tracing::debug!("testimonial rejected, window closed until {}", window::next_open_time(now));
        return Err(Error::WindowClosed.into());
    }

    let new = NewTestimonial::new(
        payload.name,
        payload.testimony.unwrap_or_default(),
        payload.anonymous.unwrap_or(false),
    )?;
    let testimonial = state.store.create_testimonial(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "testimonial": testimonial })),
    ))
}

pub async fn approve_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let testimonial = state.store.approve_testimonial(&id, (state.clock)()).await?;
    Ok(Json(json!({ "success": true, "testimonial": testimonial })))
}

pub async fn delete_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete_testimonial(&id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn window_status(State(state): State<AppState>) -> Json<Value> {
    let now = (state.clock)();
    Json(json!({
        "success": true,
        "submissionOpen": window::is_open(now),
        "nextSubmissionWindow": window::next_open_time(now),
        "currentTime": now,
    }))
}
