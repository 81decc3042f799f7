//! # Dashboard API
//!
//! The API crate provides the web server for the dashboard service. Its main
//! endpoint lets an authenticated user replace the availability stored on their
//! dashboard.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Session resolution and error-to-response mapping
//! - **Config**: Handle environment and application configuration
//!
//! Handlers never touch storage directly. They reach the session store and the
//! availability service through the trait objects held in [`ApiState`].

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::Router;
use dashboard_core::services::{AvailabilityService, SessionStore};
use dashboard_db::services::{PgAvailabilityService, PgSessionStore};
use eyre::{Result, WrapErr};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState {
///     sessions: Arc::new(PgSessionStore::new(pool.clone())),
///     availability: Arc::new(PgAvailabilityService::new(pool)),
///     session_cookies: vec!["next-auth.session-token".to_string()],
/// });
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// Resolves session tokens to sessions
    pub sessions: Arc<dyn SessionStore>,
    /// Applies availability updates
    pub availability: Arc<dyn AvailabilityService>,
    /// Cookie names checked for the session token
    pub session_cookies: Vec<String>,
}

/// Builds the application router with all routes attached to `state`
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Availability management endpoints
        .merge(routes::availability::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes logging, wires the Postgres-backed collaborators
/// into the shared state, configures routes and middleware, and serves until
/// the listener fails.
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool for database operations
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        sessions: Arc::new(PgSessionStore::new(db_pool.clone())),
        availability: Arc::new(PgAvailabilityService::new(db_pool)),
        session_cookies: config.session_cookies.clone(),
    });

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<axum::http::HeaderValue>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([axum::http::Method::PUT, axum::http::Method::OPTIONS])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Request timeout and tracing middleware
    let app = app
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
        .layer(TraceLayer::new_for_http());

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
