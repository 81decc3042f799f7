//! Collaborators the update handler delegates to.
//!
//! Both are injected into the API state so handlers never reach for ambient
//! global state, and tests can substitute mocks.

use async_trait::async_trait;
use serde_json::Value;

use crate::models::session::Session;

/// Looks up sessions by the opaque token the client presents.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns `None` when the token is unknown.
    async fn find_session(&self, token: &str) -> eyre::Result<Option<Session>>;
}

/// Applies availability changes and returns the updated dashboard.
#[async_trait]
pub trait AvailabilityService: Send + Sync {
    async fn update_availability(
        &self,
        user_id: &str,
        availability: Value,
    ) -> eyre::Result<Value>;
}
