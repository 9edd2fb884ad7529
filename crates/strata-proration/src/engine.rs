//! Prorating engine: pure share computation plus the gated,
//! transactional declaration operations.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use strata_access::{AccessEvaluator, Scope};
use strata_ledger::{DeclarationUpdate, LedgerError, LedgerReader, LedgerWriter};
use strata_types::{
    CommunityId, Declaration, DeclarationAggregate, DeclarationId, DeclarationItem,
    DeclarationKind, Money, ObligationId, ObligationStatus, Period, Permission, Principal,
    ProrateMethod, Unit, UnitId, UnitObligation,
};

use crate::error::ProrationError;

/// One unit's computed share of a declaration total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitShare {
    pub unit_id: UnitId,
    pub amount: Money,
}

/// Input for creating a declaration.
#[derive(Debug, Clone)]
pub struct DeclarationRequest {
    pub community_id: CommunityId,
    pub kind: DeclarationKind,
    pub period: Period,
    pub due_date: NaiveDate,
    pub method: ProrateMethod,
    pub items: Vec<DeclarationItem>,
}

/// Partial update of an existing declaration.
///
/// Replacing items recomputes the declaration total but never recomputes
/// existing obligations; their amounts are frozen at creation time. Due
/// date and prorate method patches update the header only.
#[derive(Debug, Clone, Default)]
pub struct DeclarationPatch {
    pub items: Option<Vec<DeclarationItem>>,
    pub due_date: Option<NaiveDate>,
    pub method: Option<ProrateMethod>,
}

/// Compute per-unit shares of `total` across `units`.
///
/// Pure: no I/O, no state. Each share is rounded to two decimal places
/// independently (ties away from zero) and the rounding remainder is not
/// redistributed, so the rounded shares may drift from `total` by up to
/// one cent per unit.
pub fn recompute(
    method: ProrateMethod,
    total: Money,
    units: &[Unit],
) -> Result<Vec<UnitShare>, ProrationError> {
    if units.is_empty() {
        return Ok(Vec::new());
    }

    match method {
        ProrateMethod::Equal => {
            let count = Decimal::from(units.len() as u64);
            Ok(units
                .iter()
                .map(|unit| UnitShare {
                    unit_id: unit.id,
                    amount: Money::new(total.amount() / count).rounded(),
                })
                .collect())
        }
        ProrateMethod::Coefficient => {
            let coefficient_sum: Decimal = units.iter().map(|unit| unit.coefficient).sum();
            if coefficient_sum.is_zero() {
                return Err(ProrationError::ZeroCoefficientSum);
            }
            Ok(units
                .iter()
                .map(|unit| UnitShare {
                    unit_id: unit.id,
                    amount: Money::new(total.amount() * unit.coefficient / coefficient_sum)
                        .rounded(),
                })
                .collect())
        }
    }
}

/// Creates and maintains declaration aggregates.
///
/// Holds no mutable state of its own; every call is independently
/// transactional through the ledger gateway.
pub struct ProrationEngine<L> {
    ledger: Arc<L>,
    access: AccessEvaluator,
}

impl<L> ProrationEngine<L>
where
    L: LedgerReader + LedgerWriter,
{
    pub fn new(ledger: Arc<L>, access: AccessEvaluator) -> Self {
        Self { ledger, access }
    }

    /// Create a declaration for `(community, period)` and prorate its
    /// total across the community's active units, atomically.
    ///
    /// Preconditions, all checked before any write: the principal may
    /// manage the community's expenses, the community exists and has at
    /// least one active unit, the items are valid, and (for the
    /// coefficient method) the active-unit coefficients do not sum to
    /// zero. Duplicate periods are rejected by the ledger's unique index,
    /// not by a prior existence check.
    pub fn declare(
        &self,
        principal: &Principal,
        request: DeclarationRequest,
    ) -> Result<DeclarationAggregate, ProrationError> {
        if !self.access.can_access(
            principal,
            Permission::ManageCommunityExpenses,
            Some(Scope::Community(request.community_id)),
        ) {
            return Err(ProrationError::Forbidden);
        }

        validate_items(&request.items)?;

        self.ledger
            .community(request.community_id)?
            .ok_or(ProrationError::CommunityNotFound(request.community_id))?;

        let units = self.ledger.active_units(request.community_id)?;
        if units.is_empty() {
            return Err(ProrationError::NoActiveUnits(request.community_id));
        }

        let total: Money = request.items.iter().map(|item| item.amount).sum();
        let shares = recompute(request.method, total, &units)?;

        let declaration_id = DeclarationId::new();
        let aggregate = DeclarationAggregate {
            header: Declaration {
                id: declaration_id,
                community_id: request.community_id,
                kind: request.kind,
                period: request.period,
                due_date: request.due_date,
                method: request.method,
                created_at: Utc::now(),
            },
            items: request.items,
            obligations: shares
                .into_iter()
                .map(|share| UnitObligation {
                    id: ObligationId::new(),
                    declaration_id,
                    unit_id: share.unit_id,
                    amount: share.amount,
                    status: ObligationStatus::Pending,
                    due_date: request.due_date,
                })
                .collect(),
        };

        tracing::info!(
            declaration = %declaration_id,
            community = %request.community_id,
            period = %request.period,
            total = %total,
            units = aggregate.obligations.len(),
            "declaring prorated {:?}",
            request.kind
        );

        self.ledger
            .insert_declaration(aggregate)
            .map_err(|error| match error {
                LedgerError::DuplicatePeriod { community, period } => {
                    ProrationError::DuplicatePeriod { community, period }
                }
                other => ProrationError::Ledger(other),
            })
    }

    /// Apply a patch to an existing declaration as one transaction.
    ///
    /// Item replacement is delete-and-recreate; the total is recomputed
    /// from the new items. Due date and method patches touch the header
    /// only. Existing obligations are deliberately left frozen;
    /// recomputing them is a separate, explicit operation for the
    /// payment collaborators.
    pub fn update_declaration(
        &self,
        principal: &Principal,
        id: DeclarationId,
        patch: DeclarationPatch,
    ) -> Result<DeclarationAggregate, ProrationError> {
        let existing = self
            .ledger
            .declaration(id)?
            .ok_or(ProrationError::DeclarationNotFound(id))?;

        if !self.access.can_access(
            principal,
            Permission::ManageCommunityExpenses,
            Some(Scope::Community(existing.header.community_id)),
        ) {
            return Err(ProrationError::Forbidden);
        }

        if let Some(items) = &patch.items {
            validate_items(items)?;
        }

        Ok(self.ledger.update_declaration(
            id,
            DeclarationUpdate {
                items: patch.items,
                due_date: patch.due_date,
                method: patch.method,
            },
        )?)
    }

    /// Fetch one declaration, gated by the residency-viewing permission
    /// for its community.
    pub fn declaration(
        &self,
        principal: &Principal,
        id: DeclarationId,
    ) -> Result<DeclarationAggregate, ProrationError> {
        let aggregate = self
            .ledger
            .declaration(id)?
            .ok_or(ProrationError::DeclarationNotFound(id))?;

        if !self.access.can_access(
            principal,
            Permission::ViewCommunityExpenses,
            Some(Scope::Community(aggregate.header.community_id)),
        ) {
            return Err(ProrationError::Forbidden);
        }
        Ok(aggregate)
    }

    /// List a community's declarations of one kind, optionally narrowed
    /// to a period.
    pub fn declarations_by_community(
        &self,
        principal: &Principal,
        community: CommunityId,
        kind: DeclarationKind,
        period: Option<Period>,
    ) -> Result<Vec<DeclarationAggregate>, ProrationError> {
        if !self.access.can_access(
            principal,
            Permission::ViewCommunityExpenses,
            Some(Scope::Community(community)),
        ) {
            return Err(ProrationError::Forbidden);
        }

        Ok(self
            .ledger
            .declarations_by_community(community, kind, period.as_ref())?)
    }
}

fn validate_items(items: &[DeclarationItem]) -> Result<(), ProrationError> {
    if items.is_empty() {
        return Err(ProrationError::InvalidItems(
            "a declaration needs at least one item".to_string(),
        ));
    }
    for item in items {
        if item.name.trim().is_empty() {
            return Err(ProrationError::InvalidItems(
                "item names must not be blank".to_string(),
            ));
        }
        if item.amount.is_negative() {
            return Err(ProrationError::InvalidItems(format!(
                "item '{}' has a negative amount",
                item.name
            )));
        }
    }
    Ok(())
}
