use crate::models::DbDashboard;
use eyre::{eyre, Result};
use serde_json::Value;
use sqlx::{Pool, Postgres};

/// Replaces the availability stored on a user's dashboard.
///
/// Fails when the user has no dashboard row.
pub async fn update_availability(
    pool: &Pool<Postgres>,
    user_id: &str,
    availability: &Value,
) -> Result<DbDashboard> {
    tracing::debug!("Updating availability for user_id={}", user_id);

    let dashboard = sqlx::query_as::<_, DbDashboard>(
        r#"
        UPDATE dashboards
        SET availability = $2, updated_at = NOW()
        WHERE user_id = $1
        RETURNING id, user_id, availability, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(availability)
    .fetch_optional(pool)
    .await?;

    dashboard.ok_or_else(|| eyre!("No dashboard found for user_id {}", user_id))
}
