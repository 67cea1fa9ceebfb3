//! Well-known role names.
//!
//! These must match the seed data in the `roles` migration.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_TRAVELER: &str = "traveler";
pub const ROLE_FACILITATOR: &str = "facilitator";
pub const ROLE_ADMIN: &str = "admin";

/// Account role. Travelers and facilitators are the two member profiles
/// chosen at registration; admins moderate structures and missions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Traveler,
    Facilitator,
    Admin,
}

impl Role {
    /// Parse a role name from the database or a token claim.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            ROLE_TRAVELER => Ok(Self::Traveler),
            ROLE_FACILITATOR => Ok(Self::Facilitator),
            ROLE_ADMIN => Ok(Self::Admin),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: traveler, facilitator, admin"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traveler => ROLE_TRAVELER,
            Self::Facilitator => ROLE_FACILITATOR,
            Self::Admin => ROLE_ADMIN,
        }
    }

    /// Whether a member may pick this role for themselves at registration.
    pub fn is_self_assignable(&self) -> bool {
        !matches!(self, Self::Admin)
    }
}
