//! Request model for the availability update endpoint.
//!
//! The body is checked against a declared schema instead of a truthiness test:
//! `user_id` must be a non-empty string and `availability` any non-null JSON
//! value. Falsy but valid payloads such as `{}`, `[]`, `0` or `false` pass.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::errors::{DashboardError, DashboardResult};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAvailabilityRequest {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,

    /// Opaque to this service; `null` deserializes to `None`
    #[validate(required(message = "availability is required"))]
    pub availability: Option<Value>,
}

impl UpdateAvailabilityRequest {
    /// Parses and validates a raw JSON body, yielding the user id and the
    /// availability payload.
    ///
    /// Every failure collapses into [`DashboardError::InvalidSyntax`].
    pub fn parse(body: &[u8]) -> DashboardResult<(String, Value)> {
        let request: Self =
            serde_json::from_slice(body).map_err(|_| DashboardError::InvalidSyntax)?;
        request
            .validate()
            .map_err(|_| DashboardError::InvalidSyntax)?;

        match request.availability {
            Some(availability) => Ok((request.user_id, availability)),
            None => Err(DashboardError::InvalidSyntax),
        }
    }
}
