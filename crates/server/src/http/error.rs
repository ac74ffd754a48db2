use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Boundary wrapper turning domain errors into the JSON envelope every
/// API route answers with. Storage failures are logged here and never
/// leak their message to the client.
pub struct ApiError(domain::Error);

impl From<domain::Error> for ApiError {
    fn from(err: domain::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use domain::Error::*;
        let (status, message) = match &self.0 {
            Validation(_) | AlreadyApproved | InvalidStatus(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            WindowClosed => (StatusCode::FORBIDDEN, self.0.to_string()),
            RateLimited => (StatusCode::TOO_MANY_REQUESTS, self.0.to_string()),
            Internal(e) => {
                tracing::error!(error = ?e, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
