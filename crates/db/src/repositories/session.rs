use crate::models::DbSession;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Fetches a session by token, ignoring sessions that have already expired.
pub async fn get_active_session_by_token(
    pool: &Pool<Postgres>,
    session_token: &str,
) -> Result<Option<DbSession>> {
    let session = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT id, session_token, user_id, expires
        FROM sessions
        WHERE session_token = $1 AND expires > NOW()
        "#,
    )
    .bind(session_token)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}
