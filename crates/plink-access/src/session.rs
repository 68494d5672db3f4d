//! Session expiry bookkeeping.
//!
//! [`SessionStore`] owns the signed-in session and the permissions resolved
//! for it. Signing out drops both together so stale grants never outlive
//! the session they were computed for.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AccessError, Result};
use crate::ids::{ModuleId, RoleId};
use crate::permissions::{CrudAction, PermissionGrant, PermissionSet};

/// Configuration for proactive token refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Refresh this many seconds before the session expires.
    pub refresh_lead_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_lead_secs: 300, // 5 minutes
        }
    }
}

impl SessionConfig {
    pub fn refresh_lead(&self) -> Duration {
        i64::try_from(self.refresh_lead_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub roles: Vec<RoleId>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// True once `now` is within `lead` of expiry, or past it.
    pub fn needs_refresh(&self, now: DateTime<Utc>, lead: Duration) -> bool {
        match self.expires_at.checked_sub_signed(lead) {
            Some(refresh_at) => now >= refresh_at,
            None => true,
        }
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    SignedOut,
    Active,
    RefreshDue,
    Expired,
}

/// The single owner of the current session and its permissions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    config: SessionConfig,
    session: Option<Session>,
    permissions: PermissionSet,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            session: None,
            permissions: PermissionSet::empty(),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Start a session, resolving its permissions from the grant rows.
    ///
    /// Replaces any previous session.
    pub fn sign_in(&mut self, session: Session, grants: &[PermissionGrant]) {
        self.permissions = PermissionSet::from_grants(&session.roles, grants);
        info!(
            user_id = %session.user_id,
            roles = session.roles.len(),
            expires_at = %session.expires_at,
            "signed in"
        );
        self.session = Some(session);
    }

    /// End the session and drop its permissions.
    pub fn sign_out(&mut self) -> Option<Session> {
        self.permissions = PermissionSet::empty();
        let previous = self.session.take();
        if let Some(session) = &previous {
            info!(user_id = %session.user_id, "signed out");
        }
        previous
    }

    /// Move the expiry of the active session forward.
    pub fn refresh(&mut self, expires_at: DateTime<Utc>) -> Result<()> {
        let session = self.session.as_mut().ok_or(AccessError::NotSignedIn)?;
        if expires_at <= session.expires_at {
            return Err(AccessError::ExpiryNotExtended {
                current: session.expires_at,
                requested: expires_at,
            });
        }
        debug!(
            user_id = %session.user_id,
            from = %session.expires_at,
            to = %expires_at,
            "session refreshed"
        );
        session.expires_at = expires_at;
        Ok(())
    }

    pub fn status(&self, now: DateTime<Utc>) -> SessionStatus {
        match &self.session {
            None => SessionStatus::SignedOut,
            Some(session) if session.is_expired(now) => SessionStatus::Expired,
            Some(session) if session.needs_refresh(now, self.config.refresh_lead()) => {
                SessionStatus::RefreshDue
            }
            Some(_) => SessionStatus::Active,
        }
    }

    /// Permissions in force at `now`; nothing is granted without a live session.
    pub fn permissions(&self, now: DateTime<Utc>) -> &PermissionSet {
        match self.status(now) {
            SessionStatus::Active | SessionStatus::RefreshDue => &self.permissions,
            SessionStatus::Expired => {
                warn!("permissions requested for an expired session");
                PermissionSet::none_granted()
            }
            SessionStatus::SignedOut => PermissionSet::none_granted(),
        }
    }

    pub fn can(&self, now: DateTime<Utc>, module: &ModuleId, action: CrudAction) -> bool {
        self.permissions(now).can(module, action)
    }
}
