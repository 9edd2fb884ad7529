//! Roles: named, ordered permission bundles.

use crate::permission::Permission;
use serde::{Deserialize, Serialize};

/// Role name granting an unconditional bypass of every access check.
pub const SUPER_ADMIN_ROLE: &str = "SUPER_ADMIN";

/// Role substituted when an unknown role name is requested at assignment.
pub const DEFAULT_RESIDENT_ROLE: &str = "RESIDENT";

/// A named, ordered set of permissions.
///
/// Roles are created once and rarely mutated; the catalog keys them by
/// unique name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub name: String,
    pub description: String,
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            permissions: Vec::new(),
        }
    }

    /// Append a permission, preserving order and skipping duplicates.
    pub fn with_permission(mut self, permission: Permission) -> Self {
        if !self.permissions.contains(&permission) {
            self.permissions.push(permission);
        }
        self
    }

    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        for permission in permissions {
            if !self.permissions.contains(&permission) {
                self.permissions.push(permission);
            }
        }
        self
    }

    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}
