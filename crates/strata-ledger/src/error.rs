use strata_types::{CommunityId, DeclarationId, Period, UnitId};
use thiserror::Error;

/// Errors returned by the ledger gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("community {0} not found")]
    CommunityNotFound(CommunityId),

    #[error("declaration {0} not found")]
    DeclarationNotFound(DeclarationId),

    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("a declaration already exists for community {community} in period {period}")]
    DuplicatePeriod {
        community: CommunityId,
        period: Period,
    },

    #[error("ledger integrity violation: {reason}")]
    IntegrityViolation { reason: String },
}

impl LedgerError {
    pub fn integrity(reason: impl Into<String>) -> Self {
        Self::IntegrityViolation {
            reason: reason.into(),
        }
    }
}
