//! Postgres-backed implementations of the core collaborator traits.

use async_trait::async_trait;
use dashboard_core::{
    models::session::Session,
    services::{AvailabilityService, SessionStore},
};
use eyre::Result;
use serde_json::Value;

use crate::{models::DbSession, repositories, DbPool};

impl From<DbSession> for Session {
    fn from(session: DbSession) -> Self {
        Session {
            id: session.user_id,
            expires: session.expires,
        }
    }
}

/// Reads sessions from the `sessions` table.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: DbPool,
}

impl PgSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn find_session(&self, token: &str) -> Result<Option<Session>> {
        let session = repositories::session::get_active_session_by_token(&self.pool, token).await?;
        Ok(session.map(Session::from))
    }
}

/// Writes availability to the `dashboards` table and returns the updated row.
#[derive(Clone)]
pub struct PgAvailabilityService {
    pool: DbPool,
}

impl PgAvailabilityService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityService for PgAvailabilityService {
    async fn update_availability(&self, user_id: &str, availability: Value) -> Result<Value> {
        let dashboard =
            repositories::dashboard::update_availability(&self.pool, user_id, &availability)
                .await?;
        Ok(serde_json::to_value(dashboard)?)
    }
}
