use axum::{Router, routing::any};
use std::sync::Arc;

use crate::{ApiState, handlers};

/// Path of the availability update endpoint
pub const UPDATE_AVAILABILITY_PATH: &str = "/api/dashboard/update_availability";

pub fn routes() -> Router<Arc<ApiState>> {
    // Bound to every method; the handler answers non-PUT requests itself
    Router::new().route(
        UPDATE_AVAILABILITY_PATH,
        any(handlers::availability::update_availability),
    )
}
