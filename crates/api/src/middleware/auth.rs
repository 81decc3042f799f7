//! # Authentication Module
//!
//! Resolves the caller's session from request headers. The token is read from
//! the configured session cookies first and from an `Authorization: Bearer`
//! header otherwise, then looked up through the injected [`SessionStore`].
//!
//! [`SessionStore`]: dashboard_core::services::SessionStore

use axum::http::HeaderMap;
use axum_extra::{
    extract::CookieJar,
    headers::{Authorization, HeaderMapExt, authorization::Bearer},
};
use chrono::Utc;
use dashboard_core::models::session::Session;
use tracing::{debug, warn};

use crate::ApiState;

/// Extracts the session token presented with a request, if any
///
/// # Arguments
///
/// * `headers` - Request headers
/// * `cookie_names` - Cookie names to check, in priority order
///
/// # Returns
///
/// * `Option<String>` - The first non-empty token found
pub fn session_token(headers: &HeaderMap, cookie_names: &[String]) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    let from_cookie = cookie_names
        .iter()
        .filter_map(|name| jar.get(name))
        .map(|cookie| cookie.value())
        .find(|value| !value.is_empty());

    if let Some(token) = from_cookie {
        return Some(token.to_string());
    }

    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .filter(|token| !token.is_empty())
}

/// Resolves the active session for a request
///
/// Missing tokens, unknown tokens, expired sessions and session store failures
/// all resolve to `None`; the caller answers each with the same 401.
pub async fn resolve_session(state: &ApiState, headers: &HeaderMap) -> Option<Session> {
    let token = session_token(headers, &state.session_cookies)?;

    let session = match state.sessions.find_session(&token).await {
        Ok(session) => session,
        Err(e) => {
            warn!("Session lookup failed: {:?}", e);
            return None;
        }
    };

    match session {
        Some(session) if session.is_active_at(Utc::now()) => Some(session),
        Some(session) => {
            debug!("Rejecting expired session for user_id={}", session.id);
            None
        }
        None => None,
    }
}
