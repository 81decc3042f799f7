pub mod availability;
pub mod session;
