//! Read-only tenancy projections.
//!
//! Built once per request from a principal's tenancy facts. Every query is
//! a pure lookup: a principal with no facts answers `false` everywhere and
//! nothing here can fail.

use std::collections::{HashMap, HashSet};
use strata_types::{CommunityId, MembershipStatus, OrganizationId, Principal, Unit, UnitId};

/// Projection of one principal's tenancy relationships.
#[derive(Debug, Clone, Default)]
pub struct TenancyContext {
    organizations: HashSet<OrganizationId>,
    admin_communities: HashSet<CommunityId>,
    confirmed_units: HashMap<UnitId, CommunityId>,
    unit_communities: HashMap<UnitId, CommunityId>,
}

impl TenancyContext {
    /// Project the tenancy facts of a principal.
    pub fn for_principal(principal: &Principal) -> Self {
        let facts = &principal.tenancy;
        let mut context = Self {
            organizations: facts.organizations.iter().copied().collect(),
            admin_communities: facts.admin_of.iter().copied().collect(),
            confirmed_units: HashMap::new(),
            unit_communities: HashMap::new(),
        };

        for membership in &facts.units {
            context
                .unit_communities
                .insert(membership.unit_id, membership.community_id);
            if membership.status == MembershipStatus::Confirmed {
                context
                    .confirmed_units
                    .insert(membership.unit_id, membership.community_id);
            }
        }

        context
    }

    /// Extend unit resolution with ledger-known units.
    ///
    /// The principal's own bindings only cover units they are a member of;
    /// checking a unit-scoped request against someone else's unit needs the
    /// directory of units the ledger holds. Confirmed memberships are not
    /// affected.
    pub fn with_unit_directory<I>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = Unit>,
    {
        for unit in units {
            self.unit_communities
                .entry(unit.id)
                .or_insert(unit.community_id);
        }
        self
    }

    pub fn is_organization_member(&self, organization: OrganizationId) -> bool {
        self.organizations.contains(&organization)
    }

    pub fn is_community_admin(&self, community: CommunityId) -> bool {
        self.admin_communities.contains(&community)
    }

    pub fn has_confirmed_unit(&self, unit: UnitId) -> bool {
        self.confirmed_units.contains_key(&unit)
    }

    pub fn has_confirmed_unit_in(&self, community: CommunityId) -> bool {
        self.confirmed_units
            .values()
            .any(|candidate| *candidate == community)
    }

    /// The community a unit belongs to. Covers units the principal is
    /// bound to (confirmed or pending) and any units fed in through
    /// [`TenancyContext::with_unit_directory`].
    pub fn community_of_unit(&self, unit: UnitId) -> Option<CommunityId> {
        self.unit_communities.get(&unit).copied()
    }
}
