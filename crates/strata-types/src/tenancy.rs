//! Principals and their tenancy facts.
//!
//! A tenancy fact is a relationship record: the principal belongs to an
//! organization, administers a community, or holds a unit membership. The
//! authorization core only ever sees these per-principal snapshots, never
//! the underlying relationship tables.

use crate::ids::{CommunityId, OrganizationId, PrincipalId, UnitId};
use serde::{Deserialize, Serialize};

/// Confirmation state of a unit membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Confirmed,
    Pending,
}

/// A principal's membership in a single unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitMembership {
    pub unit_id: UnitId,
    pub community_id: CommunityId,
    pub status: MembershipStatus,
}

/// Snapshot of every tenancy relationship a principal holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenancyFacts {
    pub organizations: Vec<OrganizationId>,
    pub admin_of: Vec<CommunityId>,
    pub units: Vec<UnitMembership>,
}

impl TenancyFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organization(mut self, organization: OrganizationId) -> Self {
        if !self.organizations.contains(&organization) {
            self.organizations.push(organization);
        }
        self
    }

    pub fn with_admin_of(mut self, community: CommunityId) -> Self {
        if !self.admin_of.contains(&community) {
            self.admin_of.push(community);
        }
        self
    }

    pub fn with_unit(
        mut self,
        unit_id: UnitId,
        community_id: CommunityId,
        status: MembershipStatus,
    ) -> Self {
        self.units.push(UnitMembership {
            unit_id,
            community_id,
            status,
        });
        self
    }
}

/// An authenticated actor: assigned role names plus tenancy facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: PrincipalId,
    pub roles: Vec<String>,
    pub tenancy: TenancyFacts,
}

impl Principal {
    pub fn new(id: PrincipalId) -> Self {
        Self {
            id,
            roles: Vec::new(),
            tenancy: TenancyFacts::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        let role = role.into();
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    pub fn with_tenancy(mut self, tenancy: TenancyFacts) -> Self {
        self.tenancy = tenancy;
        self
    }
}
