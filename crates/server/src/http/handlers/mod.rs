pub mod admin;
pub mod comments;
pub mod misc;
pub mod prayers;
pub mod testimonials;

use axum::http::HeaderMap;

/// Rate-limit key: first forwarded address when behind a proxy,
/// otherwise a shared bucket for direct/local clients.
pub(crate) fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "local".to_string())
}
