use thiserror::Error;

/// Failures of the availability update flow.
///
/// The `Display` text of each variant is the exact message returned to the
/// caller, so it must not carry internal details.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Authorization Required")]
    AuthorizationRequired,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Server did not understand the request due to invalid syntax")]
    InvalidSyntax,

    #[error("Session id mismatch")]
    SessionMismatch,

    #[error("Unable to update availability for user with user_id: {user_id}")]
    UpdateFailed {
        user_id: String,
        #[source]
        source: eyre::Report,
    },
}

pub type DashboardResult<T> = Result<T, DashboardError>;
