//! Row structs and DTOs.
//!
//! Rows whose columns carry enum values (`missions`, `structures`) are read
//! into a `*Row` struct and converted into the typed domain record, so an
//! unknown status string fails at the store boundary.

pub mod mission;
pub mod profile;
pub mod role;
pub mod session;
pub mod structure;
pub mod user;
