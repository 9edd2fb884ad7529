//! The access decision function.

use crate::catalog::RoleCatalog;
use crate::tenancy::TenancyContext;
use std::sync::Arc;
use strata_types::{
    CommunityId, OrganizationId, Permission, PermissionCategory, Principal, ScopeKind, UnitId,
    SUPER_ADMIN_ROLE,
};

/// The resource a scope-bound permission is being checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Organization(OrganizationId),
    Community(CommunityId),
    Unit(UnitId),
}

/// Stateless decision function over the current role/tenancy snapshot.
///
/// `can_access` never errors and never panics: any malformed or missing
/// scope resolves to `false`, and the caller translates a `false` into a
/// Forbidden response at the boundary.
#[derive(Clone)]
pub struct AccessEvaluator {
    catalog: Arc<RoleCatalog>,
}

impl AccessEvaluator {
    pub fn new(catalog: Arc<RoleCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// May `principal` exercise `permission` against `scope`?
    ///
    /// Decision order:
    /// 1. `SUPER_ADMIN` bypasses everything.
    /// 2. The permission must be in the principal's effective set.
    /// 3. Global permissions need no scope.
    /// 4. Organization scope requires membership.
    /// 5. Community scope requires an admin binding for administrative
    ///    permissions; residency permissions also accept a confirmed unit
    ///    in the community.
    /// 6. Unit scope requires a confirmed binding to that exact unit.
    pub fn can_access(
        &self,
        principal: &Principal,
        permission: Permission,
        scope: Option<Scope>,
    ) -> bool {
        if self.catalog.has_role(principal, SUPER_ADMIN_ROLE) {
            return true;
        }

        if !self
            .catalog
            .effective_permissions(principal)
            .contains(&permission)
        {
            return false;
        }

        let tenancy = TenancyContext::for_principal(principal);
        match permission.scope_kind() {
            ScopeKind::Global => true,
            ScopeKind::Organization => match scope {
                Some(Scope::Organization(organization)) => {
                    tenancy.is_organization_member(organization)
                }
                _ => false,
            },
            ScopeKind::Community => match scope {
                Some(Scope::Community(community)) => match permission.category() {
                    PermissionCategory::Administrative => tenancy.is_community_admin(community),
                    PermissionCategory::Residency => {
                        tenancy.is_community_admin(community)
                            || tenancy.has_confirmed_unit_in(community)
                    }
                },
                _ => false,
            },
            ScopeKind::Unit => match scope {
                Some(Scope::Unit(unit)) => tenancy.has_confirmed_unit(unit),
                _ => false,
            },
        }
    }
}
