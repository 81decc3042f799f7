use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated caller, resolved fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identifier of the user that owns the session
    pub id: String,
    pub expires: DateTime<Utc>,
}

impl Session {
    /// Whether the session is still valid at `now`. A session expiring exactly
    /// at `now` is no longer active.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }

    pub fn owns(&self, user_id: &str) -> bool {
        self.id == user_id
    }
}
