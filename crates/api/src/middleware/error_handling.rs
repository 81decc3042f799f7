//! # Error Handling Middleware
//!
//! Maps [`DashboardError`] variants to HTTP status codes and `{"error": ...}`
//! JSON bodies so every failure path of the API answers in the same shape.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use dashboard_core::errors::DashboardError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use dashboard_api::middleware::error_handling::AppError;
/// use dashboard_core::errors::DashboardError;
///
/// async fn handler(authorized: bool) -> Result<Json<&'static str>, AppError> {
///     if !authorized {
///         return Err(AppError(DashboardError::AuthorizationRequired));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub DashboardError);

impl AppError {
    /// HTTP status code the wrapped error is answered with
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DashboardError::AuthorizationRequired => StatusCode::UNAUTHORIZED,
            DashboardError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            DashboardError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            DashboardError::InvalidSyntax => StatusCode::BAD_REQUEST,
            DashboardError::SessionMismatch => StatusCode::UNAUTHORIZED,
            DashboardError::UpdateFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Only the Display text is exposed; error sources stay in the logs
        let body = Json(json!({ "error": self.0.to_string() }));
        let mut response = (status, body).into_response();

        if status == StatusCode::METHOD_NOT_ALLOWED {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("PUT"));
        }

        response
    }
}

/// Automatic conversion from DashboardError to AppError
impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        AppError(err)
    }
}

/// Maps a DashboardError to an HTTP response
pub fn map_error(err: DashboardError) -> Response {
    AppError(err).into_response()
}
