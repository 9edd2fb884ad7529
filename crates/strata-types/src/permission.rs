//! The closed permission vocabulary.
//!
//! Scope is structural: every permission carries a [`ScopeKind`] resolved
//! by a match, never by inspecting the tag text. Community-scoped
//! permissions additionally carry a [`PermissionCategory`] because the
//! evaluator treats administrative and residency-viewing permissions
//! differently.

use serde::{Deserialize, Serialize};

/// A permission tag from the closed platform vocabulary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Platform-wide administration, no scope requirement.
    ManagePlatform,
    ManageOrganization,
    ViewOrganization,
    ManageCommunity,
    ManageCommunityExpenses,
    ViewCommunityExpenses,
    ManageCommunityResidents,
    ViewCommunityResidents,
    ManageOwnUnit,
    ViewOwnUnit,
}

/// The resource scope a permission binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Global,
    Organization,
    Community,
    Unit,
}

/// Whether a permission grants administration or residency-level access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCategory {
    Administrative,
    Residency,
}

impl Permission {
    pub fn scope_kind(&self) -> ScopeKind {
        match self {
            Permission::ManagePlatform => ScopeKind::Global,
            Permission::ManageOrganization | Permission::ViewOrganization => {
                ScopeKind::Organization
            }
            Permission::ManageCommunity
            | Permission::ManageCommunityExpenses
            | Permission::ViewCommunityExpenses
            | Permission::ManageCommunityResidents
            | Permission::ViewCommunityResidents => ScopeKind::Community,
            Permission::ManageOwnUnit | Permission::ViewOwnUnit => ScopeKind::Unit,
        }
    }

    pub fn category(&self) -> PermissionCategory {
        match self {
            Permission::ManagePlatform
            | Permission::ManageOrganization
            | Permission::ManageCommunity
            | Permission::ManageCommunityExpenses
            | Permission::ManageCommunityResidents
            | Permission::ManageOwnUnit => PermissionCategory::Administrative,
            Permission::ViewOrganization
            | Permission::ViewCommunityExpenses
            | Permission::ViewCommunityResidents
            | Permission::ViewOwnUnit => PermissionCategory::Residency,
        }
    }

    /// Canonical tag used on the wire and in role definitions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ManagePlatform => "MANAGE_PLATFORM",
            Permission::ManageOrganization => "MANAGE_ORGANIZATION",
            Permission::ViewOrganization => "VIEW_ORGANIZATION",
            Permission::ManageCommunity => "MANAGE_COMMUNITY",
            Permission::ManageCommunityExpenses => "MANAGE_COMMUNITY_EXPENSES",
            Permission::ViewCommunityExpenses => "VIEW_COMMUNITY_EXPENSES",
            Permission::ManageCommunityResidents => "MANAGE_COMMUNITY_RESIDENTS",
            Permission::ViewCommunityResidents => "VIEW_COMMUNITY_RESIDENTS",
            Permission::ManageOwnUnit => "MANAGE_OWN_UNIT",
            Permission::ViewOwnUnit => "VIEW_OWN_UNIT",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
