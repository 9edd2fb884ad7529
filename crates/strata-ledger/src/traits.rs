use chrono::NaiveDate;
use strata_types::{
    CommunityId, CommunityRecord, DeclarationAggregate, DeclarationId, DeclarationItem,
    DeclarationKind, Period, ProrateMethod, Unit,
};

use crate::error::LedgerError;

/// Field-level patch applied to a declaration in one transaction.
///
/// Item replacement is delete-and-recreate; due date and prorate method
/// touch the header only. Obligations are never modified here.
#[derive(Debug, Clone, Default)]
pub struct DeclarationUpdate {
    pub items: Option<Vec<DeclarationItem>>,
    pub due_date: Option<NaiveDate>,
    pub method: Option<ProrateMethod>,
}

/// Read boundary of the ledger gateway.
pub trait LedgerReader {
    fn community(&self, id: CommunityId) -> Result<Option<CommunityRecord>, LedgerError>;

    /// Active units of a community, in a stable order.
    fn active_units(&self, community: CommunityId) -> Result<Vec<Unit>, LedgerError>;

    fn declaration(&self, id: DeclarationId)
        -> Result<Option<DeclarationAggregate>, LedgerError>;

    /// Declarations of one kind for a community, optionally narrowed to a
    /// single period, ordered by period.
    fn declarations_by_community(
        &self,
        community: CommunityId,
        kind: DeclarationKind,
        period: Option<&Period>,
    ) -> Result<Vec<DeclarationAggregate>, LedgerError>;
}

/// Write boundary of the ledger gateway. Every method is one transaction:
/// it either fully applies or leaves no trace.
pub trait LedgerWriter {
    fn upsert_community(&self, community: CommunityRecord) -> Result<(), LedgerError>;

    fn upsert_unit(&self, unit: Unit) -> Result<(), LedgerError>;

    /// Atomically persist a declaration header, its items, and its
    /// obligations.
    ///
    /// The unique `(community, kind, period)` index is enforced here and
    /// is the authoritative duplicate guard; a racing duplicate insert
    /// fails with [`LedgerError::DuplicatePeriod`] and writes nothing.
    fn insert_declaration(
        &self,
        aggregate: DeclarationAggregate,
    ) -> Result<DeclarationAggregate, LedgerError>;

    /// Apply a [`DeclarationUpdate`] atomically: either every patched
    /// field lands or none does. Obligation amounts and due dates are
    /// inherited at creation time and stay frozen.
    fn update_declaration(
        &self,
        id: DeclarationId,
        update: DeclarationUpdate,
    ) -> Result<DeclarationAggregate, LedgerError>;
}
