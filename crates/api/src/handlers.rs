/// Availability update endpoint
pub mod availability;
