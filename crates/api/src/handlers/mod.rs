//! Request handlers, one module per resource.
//!
//! Handlers delegate to the repositories in `playlife_db` or to the wizard
//! registry and map errors via [`AppError`](crate::error::AppError).

pub mod admin;
pub mod auth;
pub mod mission_wizard;
pub mod missions;
pub mod structures;
