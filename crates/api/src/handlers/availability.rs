//! # Availability Handlers
//!
//! This module contains the handler that lets an authenticated user replace the
//! availability stored on their dashboard.
//!
//! ## Request Flow
//!
//! The checks run in a fixed order and the first failure answers the request:
//!
//! 1. Session resolution (`401 Authorization Required`)
//! 2. Method check, `PUT` only (`405 Method not allowed`)
//! 3. Body schema validation (`400`)
//! 4. Session id must equal the body's `user_id` (`401 Session id mismatch`)
//! 5. Delegation to the [`AvailabilityService`] (`200` or `500`)
//!
//! The route accepts every method and the body is buffered inside the handler,
//! after the method check, so that axum's method, JSON and body-size rejections
//! never run ahead of the session check. Bodies larger than
//! [`MAX_BODY_BYTES`] are answered with `413`.
//!
//! [`AvailabilityService`]: dashboard_core::services::AvailabilityService

use axum::{
    Json,
    body::{Body, to_bytes},
    extract::State,
    http::{HeaderMap, Method},
};
use dashboard_core::{errors::DashboardError, models::availability::UpdateAvailabilityRequest};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{ApiState, middleware::auth, middleware::error_handling::AppError};

/// Largest request body the endpoint buffers
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Replaces the availability of the session's user
///
/// # Endpoint
///
/// ```text
/// PUT /api/dashboard/update_availability
/// { "user_id": "u1", "availability": { ... } }
/// ```
///
/// # Returns
///
/// * `Result<Json<Value>, AppError>` - The updated dashboard exactly as the
///   availability service returned it
///
/// # Errors
///
/// * `DashboardError::AuthorizationRequired` - No active session
/// * `DashboardError::MethodNotAllowed` - Method other than `PUT`
/// * `DashboardError::PayloadTooLarge` - Body exceeds [`MAX_BODY_BYTES`]
/// * `DashboardError::InvalidSyntax` - Body fails schema validation
/// * `DashboardError::SessionMismatch` - Session belongs to another user
/// * `DashboardError::UpdateFailed` - The availability service failed
#[axum::debug_handler]
pub async fn update_availability(
    State(state): State<Arc<ApiState>>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<Value>, AppError> {
    let session = auth::resolve_session(&state, &headers)
        .await
        .ok_or(DashboardError::AuthorizationRequired)?;

    if method != Method::PUT {
        return Err(AppError(DashboardError::MethodNotAllowed));
    }

    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| DashboardError::PayloadTooLarge)?;
    let (user_id, availability) = UpdateAvailabilityRequest::parse(&body)?;

    if !session.owns(&user_id) {
        warn!(
            "Session for user_id={} attempted to update availability of user_id={}",
            session.id, user_id
        );
        return Err(AppError(DashboardError::SessionMismatch));
    }

    match state
        .availability
        .update_availability(&user_id, availability)
        .await
    {
        Ok(dashboard) => {
            info!("Updated availability for user_id={}", user_id);
            Ok(Json(dashboard))
        }
        Err(e) => {
            error!("Failed to update availability for user_id={}: {:?}", user_id, e);
            Err(AppError(DashboardError::UpdateFailed { user_id, source: e }))
        }
    }
}
