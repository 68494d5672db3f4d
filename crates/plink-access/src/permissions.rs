//! Permission resolution.
//!
//! The backend returns one flattened row per role and module with CRUD
//! flags. A user holding several roles gets the union of their grants.
//! Lookups are keyed on stable module identifiers; module descriptions are
//! kept for display only.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AccessError;
use crate::ids::{ModuleId, RoleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrudAction {
    Create,
    Read,
    Update,
    Delete,
}

impl CrudAction {
    pub const ALL: [CrudAction; 4] = [Self::Create, Self::Read, Self::Update, Self::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for CrudAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrudAction {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(AccessError::UnknownAction(s.to_string())),
        }
    }
}

/// CRUD grant flags. Missing flags deserialize as not granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudFlags {
    #[serde(rename = "can_create")]
    pub create: bool,
    #[serde(rename = "can_read")]
    pub read: bool,
    #[serde(rename = "can_update")]
    pub update: bool,
    #[serde(rename = "can_delete")]
    pub delete: bool,
}

impl CrudFlags {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }

    pub fn allows(&self, action: CrudAction) -> bool {
        match action {
            CrudAction::Create => self.create,
            CrudAction::Read => self.read,
            CrudAction::Update => self.update,
            CrudAction::Delete => self.delete,
        }
    }

    /// OR-combine two grants.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            create: self.create || other.create,
            read: self.read || other.read,
            update: self.update || other.update,
            delete: self.delete || other.delete,
        }
    }
}

/// One role x module row as returned by the permissions RPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub role_id: RoleId,
    pub module_id: ModuleId,
    #[serde(default)]
    pub module_description: Option<String>,
    #[serde(flatten)]
    pub flags: CrudFlags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ModuleAccess {
    flags: CrudFlags,
    description: Option<String>,
}

/// Effective permissions of one user across all of their roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    modules: BTreeMap<ModuleId, ModuleAccess>,
}

static NO_PERMISSIONS: PermissionSet = PermissionSet {
    modules: BTreeMap::new(),
};

impl PermissionSet {
    pub(crate) fn none_granted() -> &'static PermissionSet {
        &NO_PERMISSIONS
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Reduce the grants of `roles` into one lookup, OR-combining per module.
    ///
    /// Grants for roles the user does not hold are ignored.
    pub fn from_grants(roles: &[RoleId], grants: &[PermissionGrant]) -> Self {
        let mut modules: BTreeMap<ModuleId, ModuleAccess> = BTreeMap::new();
        for grant in grants.iter().filter(|g| roles.contains(&g.role_id)) {
            let entry = modules
                .entry(grant.module_id.clone())
                .or_insert_with(|| ModuleAccess {
                    flags: CrudFlags::none(),
                    description: None,
                });
            entry.flags = entry.flags.union(grant.flags);
            if entry.description.is_none() {
                entry.description.clone_from(&grant.module_description);
            }
        }
        debug!(
            roles = roles.len(),
            grants = grants.len(),
            modules = modules.len(),
            "resolved permissions"
        );
        Self { modules }
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Unknown modules are denied.
    pub fn can(&self, module: &ModuleId, action: CrudAction) -> bool {
        self.flags(module).allows(action)
    }

    pub fn flags(&self, module: &ModuleId) -> CrudFlags {
        self.modules
            .get(module)
            .map(|access| access.flags)
            .unwrap_or_default()
    }

    /// Modules with at least one grant row, in identifier order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.keys()
    }

    pub fn description(&self, module: &ModuleId) -> Option<&str> {
        self.modules.get(module)?.description.as_deref()
    }

    /// Look a module up by its display description, ignoring case.
    ///
    /// Only for migrating checks that were written against labels; new code
    /// should hold a [`ModuleId`].
    pub fn find_by_description(&self, label: &str) -> Option<&ModuleId> {
        let label = label.trim().to_lowercase();
        self.modules.iter().find_map(|(id, access)| {
            access
                .description
                .as_deref()
                .filter(|d| d.trim().to_lowercase() == label)
                .map(|_| id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(role: &str, module: &str, flags: CrudFlags) -> PermissionGrant {
        PermissionGrant {
            role_id: RoleId::new(role).unwrap(),
            module_id: ModuleId::new(module).unwrap(),
            module_description: Some(format!("{module} screen")),
            flags,
        }
    }

    fn read_only() -> CrudFlags {
        CrudFlags {
            read: true,
            ..CrudFlags::none()
        }
    }

    #[test]
    fn test_grants_are_or_combined_across_roles() {
        let grants = vec![
            grant("nurse", "queue", read_only()),
            grant(
                "clerk",
                "queue",
                CrudFlags {
                    create: true,
                    ..CrudFlags::none()
                },
            ),
            grant("admin", "roles", CrudFlags::all()),
        ];
        let roles = vec![RoleId::new("nurse").unwrap(), RoleId::new("clerk").unwrap()];
        let set = PermissionSet::from_grants(&roles, &grants);

        let queue = ModuleId::new("queue").unwrap();
        assert!(set.can(&queue, CrudAction::Read));
        assert!(set.can(&queue, CrudAction::Create));
        assert!(!set.can(&queue, CrudAction::Delete));

        let roles_module = ModuleId::new("roles").unwrap();
        assert!(!set.can(&roles_module, CrudAction::Read));
        assert_eq!(set.modules().count(), 1);
    }

    #[test]
    fn test_unknown_module_is_denied() {
        let set = PermissionSet::empty();
        let module = ModuleId::new("referrals").unwrap();
        for action in CrudAction::ALL {
            assert!(!set.can(&module, action));
        }
        assert!(set.is_empty());
    }

    #[test]
    fn test_description_lookup_ignores_case() {
        let roles = vec![RoleId::new("nurse").unwrap()];
        let set = PermissionSet::from_grants(&roles, &[grant("nurse", "notes", read_only())]);

        let notes = ModuleId::new("notes").unwrap();
        assert_eq!(set.description(&notes), Some("notes screen"));
        assert_eq!(set.find_by_description("  NOTES Screen"), Some(&notes));
        assert_eq!(set.find_by_description("queue screen"), None);
    }

    #[test]
    fn test_description_lookup_folds_non_ascii_case() {
        let roles = vec![RoleId::new("nurse").unwrap()];
        let set = PermissionSet::from_grants(
            &roles,
            &[PermissionGrant {
                module_description: Some("Énfasis Clínico".to_string()),
                ..grant("nurse", "emphasis", read_only())
            }],
        );

        let emphasis = ModuleId::new("emphasis").unwrap();
        assert_eq!(set.find_by_description("ÉNFASIS CLÍNICO"), Some(&emphasis));
        assert_eq!(set.find_by_description("énfasis clínico "), Some(&emphasis));
    }

    #[test]
    fn test_grant_rows_deserialize_with_missing_flags() {
        let json = r#"{
            "role_id": "Nurse",
            "module_id": "Patient-Tags",
            "module_description": "Patient Tags",
            "can_read": true
        }"#;
        let grant: PermissionGrant = serde_json::from_str(json).unwrap();
        assert_eq!(grant.role_id.as_str(), "nurse");
        assert_eq!(grant.module_id.as_str(), "patient-tags");
        assert!(grant.flags.read);
        assert!(!grant.flags.update);
    }

    #[test]
    fn test_action_parses() {
        assert_eq!("Update".parse::<CrudAction>().unwrap(), CrudAction::Update);
        assert!(matches!(
            "archive".parse::<CrudAction>(),
            Err(AccessError::UnknownAction(_))
        ));
    }
}
