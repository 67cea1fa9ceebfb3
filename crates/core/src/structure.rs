//! Partner structures and their moderation lifecycle.
//!
//! A structure is submitted as `pending` and moved to `approved` or
//! `rejected` by an administrator. Moderation is one-shot: a structure that
//! already has a verdict cannot be moderated again.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl StructureStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid structure status '{s}'. Must be one of: pending, approved, rejected"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Administrator verdict on a pending structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationDecision {
    Approve,
    Reject,
}

impl ModerationDecision {
    pub fn resulting_status(self) -> StructureStatus {
        match self {
            Self::Approve => StructureStatus::Approved,
            Self::Reject => StructureStatus::Rejected,
        }
    }
}

/// Apply `decision` to a structure currently in `current`.
pub fn moderate(
    current: StructureStatus,
    decision: ModerationDecision,
) -> Result<StructureStatus, CoreError> {
    if current != StructureStatus::Pending {
        return Err(CoreError::Conflict(format!(
            "Structure has already been {}",
            current.as_str()
        )));
    }
    Ok(decision.resulting_status())
}

/// A persisted partner structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Structure {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub structure_type: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website_url: Option<String>,
    pub image_url: Option<String>,
    pub status: StructureStatus,
    pub submitted_by: Option<DbId>,
    pub moderated_by: Option<DbId>,
    pub moderated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
