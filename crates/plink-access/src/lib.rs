//! Role-based access control for the hospital administration screens.
//!
//! - `permissions` - reduce role x module CRUD grant rows into a lookup
//! - `session` - session expiry tracking and the owner of resolved permissions

#![deny(unsafe_code)]

mod error;
mod ids;
mod permissions;
mod session;

pub use error::{AccessError, Result};
pub use ids::{ModuleId, RoleId};
pub use permissions::{CrudAction, CrudFlags, PermissionGrant, PermissionSet};
pub use session::{Session, SessionConfig, SessionStatus, SessionStore};
