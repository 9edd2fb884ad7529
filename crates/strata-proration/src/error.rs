use strata_ledger::LedgerError;
use strata_types::{CommunityId, DeclarationId, Period};
use thiserror::Error;

/// Errors raised by the prorating engine.
#[derive(Debug, Error)]
pub enum ProrationError {
    /// Uniform message: the boundary layer must not leak which check
    /// failed.
    #[error("operation not permitted")]
    Forbidden,

    #[error("community {0} not found")]
    CommunityNotFound(CommunityId),

    #[error("declaration {0} not found")]
    DeclarationNotFound(DeclarationId),

    #[error("a declaration already exists for community {community} in period {period}")]
    DuplicatePeriod {
        community: CommunityId,
        period: Period,
    },

    #[error("community {0} has no active units")]
    NoActiveUnits(CommunityId),

    #[error("active unit coefficients sum to zero")]
    ZeroCoefficientSum,

    #[error("declaration items are invalid: {0}")]
    InvalidItems(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// HTTP-equivalent classification for the (excluded) boundary layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    InvalidState,
    Internal,
}

impl ProrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProrationError::Forbidden => ErrorKind::Forbidden,
            ProrationError::CommunityNotFound(_) | ProrationError::DeclarationNotFound(_) => {
                ErrorKind::NotFound
            }
            // Zero active units is an invalid community state but surfaces
            // as a Conflict-class error, like the other preconditions.
            ProrationError::DuplicatePeriod { .. }
            | ProrationError::NoActiveUnits(_)
            | ProrationError::ZeroCoefficientSum => ErrorKind::Conflict,
            ProrationError::InvalidItems(_) => ErrorKind::InvalidState,
            ProrationError::Ledger(error) => match error {
                LedgerError::CommunityNotFound(_)
                | LedgerError::DeclarationNotFound(_)
                | LedgerError::UnitNotFound(_) => ErrorKind::NotFound,
                LedgerError::DuplicatePeriod { .. } => ErrorKind::Conflict,
                LedgerError::IntegrityViolation { .. } => ErrorKind::Internal,
            },
        }
    }
}
