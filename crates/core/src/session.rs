//! Explicit caller session.
//!
//! A [`Session`] is handed to every component that needs to know who is
//! acting. It is created with [`Session::init`] once the caller's identity
//! is known, updated with [`Session::refresh`] when the profile changes, and
//! emptied with [`Session::clear`] on sign-out. Nothing reads identity from
//! process-wide state.

use serde::Serialize;

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// The authenticated identity inside a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: DbId,
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    /// A session with no authenticated caller.
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    /// Start a session for an authenticated user.
    pub fn init(user_id: DbId, role: Role) -> Self {
        Self {
            identity: Some(Identity { user_id, role }),
        }
    }

    /// Replace the role after the profile was re-read.
    ///
    /// Has no effect on a cleared session.
    pub fn refresh(&mut self, role: Role) {
        if let Some(identity) = self.identity.as_mut() {
            identity.role = role;
        }
    }

    /// Sign out.
    pub fn clear(&mut self) {
        self.identity = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn user_id(&self) -> Option<DbId> {
        self.identity.map(|i| i.user_id)
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.map(|i| i.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    /// Return the user id or an `Unauthorized` error.
    pub fn require_user(&self) -> Result<DbId, CoreError> {
        self.user_id()
            .ok_or_else(|| CoreError::Unauthorized("Sign-in required".into()))
    }

    /// Whether the caller may modify a record owned by `owner_id`.
    pub fn can_manage(&self, owner_id: DbId) -> bool {
        match self.identity {
            Some(identity) => identity.role == Role::Admin || identity.user_id == owner_id,
            None => false,
        }
    }
}
