//! Communities and units.

use crate::ids::{CommunityId, OrganizationId, UnitId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A community record as seen by the finance core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityRecord {
    pub id: CommunityId,
    pub organization_id: OrganizationId,
    pub name: String,
}

impl CommunityRecord {
    pub fn new(
        id: CommunityId,
        organization_id: OrganizationId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            organization_id,
            name: name.into(),
        }
    }
}

/// A unit within a community.
///
/// The coefficient is the unit's weight for proportional prorating,
/// typically its ownership share. It defaults to a neutral `1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: UnitId,
    pub community_id: CommunityId,
    pub label: String,
    pub coefficient: Decimal,
    pub is_active: bool,
}

impl Unit {
    pub fn new(id: UnitId, community_id: CommunityId, label: impl Into<String>) -> Self {
        Self {
            id,
            community_id,
            label: label.into(),
            coefficient: Decimal::ONE,
            is_active: true,
        }
    }

    pub fn with_coefficient(mut self, coefficient: Decimal) -> Self {
        self.coefficient = coefficient;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
