//! Role catalog and effective-permission resolution.

use crate::error::AccessError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;
use strata_types::{Permission, Principal, Role, DEFAULT_RESIDENT_ROLE, SUPER_ADMIN_ROLE};

/// The closed set of roles known to the platform.
///
/// Read-mostly: roles are seeded at startup and rarely change afterwards,
/// so the catalog sits behind a single `RwLock`.
pub struct RoleCatalog {
    roles: RwLock<BTreeMap<String, Role>>,
}

impl RoleCatalog {
    /// An empty catalog, for tests that build their own role set.
    pub fn empty() -> Self {
        Self {
            roles: RwLock::new(BTreeMap::new()),
        }
    }

    /// A catalog seeded with the built-in platform roles.
    pub fn with_builtin_roles() -> Self {
        let catalog = Self::empty();
        for role in builtin_roles() {
            // A freshly created lock cannot be poisoned.
            let _ = catalog.insert_role(role);
        }
        catalog
    }

    /// Register a role. Replaces any existing role of the same name.
    pub fn insert_role(&self, role: Role) -> Result<(), AccessError> {
        let mut roles = self
            .roles
            .write()
            .map_err(|_| AccessError::CatalogUnavailable)?;
        roles.insert(role.name.clone(), role);
        Ok(())
    }

    /// Look up a role by name. Unknown names are an error; callers that
    /// take role names from user input should go through
    /// [`RoleCatalog::resolve_assignment`] instead.
    pub fn role(&self, name: &str) -> Result<Role, AccessError> {
        let roles = self
            .roles
            .read()
            .map_err(|_| AccessError::CatalogUnavailable)?;
        roles
            .get(name)
            .cloned()
            .ok_or_else(|| AccessError::UnknownRole(name.to_string()))
    }

    /// Resolve a role name for assignment, falling back to the default
    /// resident role when the name is unknown.
    ///
    /// The substitution is observable in the returned [`RoleResolution`]
    /// and logged; it is never silent. Fails only if the default role
    /// itself is missing from the catalog.
    pub fn resolve_assignment(&self, name: &str) -> Result<RoleResolution, AccessError> {
        match self.role(name) {
            Ok(role) => Ok(RoleResolution::Exact(role)),
            Err(AccessError::UnknownRole(requested)) => {
                let fallback = self.role(DEFAULT_RESIDENT_ROLE)?;
                tracing::warn!(
                    requested = %requested,
                    fallback = %fallback.name,
                    "unknown role requested, substituting default role"
                );
                Ok(RoleResolution::Fallback {
                    requested,
                    role: fallback,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Whether the principal holds the named role. A pure check against
    /// the principal's assigned names; the catalog is not consulted.
    pub fn has_role(&self, principal: &Principal, name: &str) -> bool {
        principal.roles.iter().any(|role| role == name)
    }

    /// Union of permissions across every role assigned to the principal.
    ///
    /// Unknown role names contribute nothing, and a principal with zero
    /// roles yields the empty set: resolution fails closed.
    pub fn effective_permissions(&self, principal: &Principal) -> BTreeSet<Permission> {
        let roles = match self.roles.read() {
            Ok(roles) => roles,
            Err(_) => {
                tracing::error!("role catalog lock poisoned, resolving to empty permission set");
                return BTreeSet::new();
            }
        };

        principal
            .roles
            .iter()
            .filter_map(|name| roles.get(name))
            .flat_map(|role| role.permissions.iter().copied())
            .collect()
    }
}

/// Outcome of resolving a role name for assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "resolution")]
pub enum RoleResolution {
    /// The requested role exists and was resolved directly.
    Exact(Role),

    /// The requested name was unknown; the default role was substituted.
    Fallback { requested: String, role: Role },
}

impl RoleResolution {
    pub fn role(&self) -> &Role {
        match self {
            RoleResolution::Exact(role) => role,
            RoleResolution::Fallback { role, .. } => role,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RoleResolution::Fallback { .. })
    }
}

fn builtin_roles() -> Vec<Role> {
    vec![
        Role::new(SUPER_ADMIN_ROLE, "Platform operator with unconditional access")
            .with_permission(Permission::ManagePlatform),
        Role::new("ORG_MANAGER", "Manages an organization and its communities")
            .with_permissions([
                Permission::ManageOrganization,
                Permission::ViewOrganization,
                Permission::ManageCommunity,
            ]),
        Role::new("COMMUNITY_ADMIN", "Administers a single community")
            .with_permissions([
                Permission::ManageCommunity,
                Permission::ManageCommunityExpenses,
                Permission::ViewCommunityExpenses,
                Permission::ManageCommunityResidents,
                Permission::ViewCommunityResidents,
            ]),
        Role::new(DEFAULT_RESIDENT_ROLE, "Resident of one or more units")
            .with_permissions([
                Permission::ViewCommunityExpenses,
                Permission::ViewCommunityResidents,
                Permission::ManageOwnUnit,
                Permission::ViewOwnUnit,
            ]),
    ]
}
