//! Identifier newtypes for the tenancy and finance domains.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// An organization owning one or more communities.
    OrganizationId
);
define_id!(
    /// A community (condominium / neighborhood) within an organization.
    CommunityId
);
define_id!(
    /// A unit (apartment, house, parking lot) within a community.
    UnitId
);
define_id!(
    /// An authenticated actor evaluated against authorization rules.
    PrincipalId
);
define_id!(
    /// A common-expense or common-income declaration.
    DeclarationId
);
define_id!(
    /// A per-unit obligation derived from a declaration.
    ObligationId
);
