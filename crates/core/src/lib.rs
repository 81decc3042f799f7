//! # Dashboard Core
//!
//! Domain types shared by the API and database crates: the request and session
//! models, the error taxonomy, and the collaborator traits the API depends on.

pub mod errors;
pub mod models;
pub mod services;
