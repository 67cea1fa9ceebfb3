//! Domain core for Playlife Connect.
//!
//! Holds the mission draft and its multi-step wizard, the per-step
//! validation rules, media upload rules, the submission adapter with its
//! collaborator traits, the explicit caller [`session::Session`], and the
//! structure moderation rules. Nothing here performs I/O directly; storage
//! and persistence are reached through the traits in [`submission`].

pub mod error;
pub mod media;
pub mod mission;
pub mod pagination;
pub mod roles;
pub mod session;
pub mod structure;
pub mod submission;
pub mod types;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod test_support;
