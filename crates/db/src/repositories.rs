pub mod dashboard;
pub mod session;
