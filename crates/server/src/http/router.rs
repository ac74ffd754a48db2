use std::path::PathBuf;
use std::time::Duration;

use axum::{
    handler::HandlerWithoutStateExt,
    http::{HeaderValue, Method, StatusCode},
    response::Html,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{admin, comments, misc, prayers, testimonials};
use crate::state::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const PAGE_404: &str = r#"<!DOCTYPE html>
<html>
<head><title>404 - Page not found</title></head>
<body>
  <h1>404 - Page not found</h1>
  <p>The page you are looking for does not exist. <a href="/">Back home</a></p>
</body>
</html>"#;

pub fn build_router(state: AppState, allowed_origins: &str, public_dir: &str) -> Router {
    // The browser only sends Origin on cross-origin requests, so
    // non-browser clients pass through untouched either way.
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::PATCH];
    let cors = if allowed_origins == "*" {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_origin(Any)
            .allow_headers(Any)
    } else {
        let needles: Vec<String> = allowed_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if needles.is_empty() {
            tracing::warn!("CORS config is invalid or empty, falling back to allow ANY.");
            CorsLayer::new()
                .allow_methods(methods)
                .allow_origin(Any)
                .allow_headers(Any)
        } else {
            tracing::info!("CORS enabled for origins matching: {:?}", needles);
            let predicate = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
                origin
                    .to_str()
                    .map(|o| needles.iter().any(|n| o.contains(n.as_str())))
                    .unwrap_or(false)
            });
            CorsLayer::new()
                .allow_methods(methods)
                .allow_origin(predicate)
                .allow_headers(Any)
        }
    };

    let public = PathBuf::from(public_dir);
    let static_site = ServeDir::new(&public).not_found_service(not_found_page.into_service());

    Router::new()
        .route(
            "/api/comments/:id",
            get(comments::list_for_post)
                .post(comments::create_for_post)
                .delete(comments::delete_comment),
        )
        .route(
            "/api/prayers",
            get(prayers::list_prayers).post(prayers::create_prayer),
        )
        .route("/api/prayers/:id", delete(prayers::delete_prayer))
        .route("/api/prayers/:id/heart", post(prayers::heart_prayer))
        .route(
            "/api/prayers/:id/comments",
            get(prayers::list_prayer_comments).post(prayers::create_prayer_comment),
        )
        .route(
            "/api/testimonials",
            get(testimonials::list_testimonials).post(testimonials::create_testimonial),
        )
        .route("/api/testimonials/status", get(testimonials::window_status))
        .route(
            "/api/testimonials/:id",
            delete(testimonials::delete_testimonial),
        )
        .route(
            "/api/testimonials/:id/approve",
            post(testimonials::approve_testimonial),
        )
        .route("/api/admin/comments", get(admin::list_all_comments))
        .route(
            "/api/admin/comments/:id/status",
            patch(admin::set_comment_status),
        )
        .route("/api/stats", get(misc::stats))
        .route("/api/health", get(misc::health))
        // pretty URLs for the static pages
        .route_service(
            "/prayer-wall",
            ServeFile::new(public.join("prayer-wall.html")),
        )
        .route_service(
            "/testimonials",
            ServeFile::new(public.join("testimonials.html")),
        )
        .route_service("/blog", ServeFile::new(public.join("blog.html")))
        .fallback_service(static_site)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        .with_state(state)
}

async fn not_found_page() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html(PAGE_404))
}
