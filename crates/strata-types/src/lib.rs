//! Strata Core - shared domain types
//!
//! Types shared by the authorization core and the prorating engine:
//! identifiers, money, accounting periods, the closed permission
//! vocabulary, roles, per-principal tenancy facts, units, and the
//! declaration/obligation aggregate that is persisted atomically.

#![deny(unsafe_code)]

pub mod declaration;
pub mod ids;
pub mod money;
pub mod period;
pub mod permission;
pub mod property;
pub mod role;
pub mod tenancy;

pub use declaration::{
    Declaration, DeclarationAggregate, DeclarationItem, DeclarationKind, ObligationStatus,
    ProrateMethod, UnitObligation,
};
pub use ids::{
    CommunityId, DeclarationId, ObligationId, OrganizationId, PrincipalId, UnitId,
};
pub use money::Money;
pub use period::{Period, PeriodParseError};
pub use permission::{Permission, PermissionCategory, ScopeKind};
pub use property::{CommunityRecord, Unit};
pub use role::{Role, DEFAULT_RESIDENT_ROLE, SUPER_ADMIN_ROLE};
pub use tenancy::{MembershipStatus, Principal, TenancyFacts, UnitMembership};
