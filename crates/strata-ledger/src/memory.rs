//! In-memory ledger used for tests, local demos, and embedding.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use strata_types::{
    CommunityId, CommunityRecord, DeclarationAggregate, DeclarationId, DeclarationItem,
    DeclarationKind, Period, Unit, UnitId,
};

use crate::error::LedgerError;
use crate::traits::{DeclarationUpdate, LedgerReader, LedgerWriter};

/// In-memory implementation of the ledger gateway.
///
/// State lives behind one `RwLock`; each write method validates the whole
/// operation before touching the maps, so a failed write leaves zero rows.
#[derive(Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    communities: HashMap<CommunityId, CommunityRecord>,
    units: HashMap<UnitId, Unit>,
    declarations: HashMap<DeclarationId, DeclarationAggregate>,
    // Unique index on (community, kind, period).
    period_index: HashMap<(CommunityId, DeclarationKind, Period), DeclarationId>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored declarations, for atomicity assertions in tests.
    pub fn declaration_count(&self) -> usize {
        self.inner
            .read()
            .map(|state| state.declarations.len())
            .unwrap_or(0)
    }
}

impl LedgerReader for InMemoryLedger {
    fn community(&self, id: CommunityId) -> Result<Option<CommunityRecord>, LedgerError> {
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::integrity("ledger read lock poisoned"))?;
        Ok(state.communities.get(&id).cloned())
    }

    fn active_units(&self, community: CommunityId) -> Result<Vec<Unit>, LedgerError> {
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::integrity("ledger read lock poisoned"))?;

        let mut units: Vec<Unit> = state
            .units
            .values()
            .filter(|unit| unit.community_id == community && unit.is_active)
            .cloned()
            .collect();
        units.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
        Ok(units)
    }

    fn declaration(
        &self,
        id: DeclarationId,
    ) -> Result<Option<DeclarationAggregate>, LedgerError> {
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::integrity("ledger read lock poisoned"))?;
        Ok(state.declarations.get(&id).cloned())
    }

    fn declarations_by_community(
        &self,
        community: CommunityId,
        kind: DeclarationKind,
        period: Option<&Period>,
    ) -> Result<Vec<DeclarationAggregate>, LedgerError> {
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::integrity("ledger read lock poisoned"))?;

        let mut declarations: Vec<DeclarationAggregate> = state
            .declarations
            .values()
            .filter(|aggregate| {
                aggregate.header.community_id == community
                    && aggregate.header.kind == kind
                    && period.map_or(true, |period| aggregate.header.period == *period)
            })
            .cloned()
            .collect();
        declarations.sort_by_key(|aggregate| aggregate.header.period);
        Ok(declarations)
    }
}

impl LedgerWriter for InMemoryLedger {
    fn upsert_community(&self, community: CommunityRecord) -> Result<(), LedgerError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LedgerError::integrity("ledger write lock poisoned"))?;
        state.communities.insert(community.id, community);
        Ok(())
    }

    fn upsert_unit(&self, unit: Unit) -> Result<(), LedgerError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LedgerError::integrity("ledger write lock poisoned"))?;
        if !state.communities.contains_key(&unit.community_id) {
            return Err(LedgerError::CommunityNotFound(unit.community_id));
        }
        state.units.insert(unit.id, unit);
        Ok(())
    }

    fn insert_declaration(
        &self,
        aggregate: DeclarationAggregate,
    ) -> Result<DeclarationAggregate, LedgerError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LedgerError::integrity("ledger write lock poisoned"))?;

        // Validate the whole aggregate first; nothing is written until
        // every check has passed.
        let header = &aggregate.header;
        if !state.communities.contains_key(&header.community_id) {
            return Err(LedgerError::CommunityNotFound(header.community_id));
        }

        let mut obligated_units = HashSet::new();
        for obligation in &aggregate.obligations {
            if obligation.declaration_id != header.id {
                return Err(LedgerError::integrity(format!(
                    "obligation {} does not reference declaration {}",
                    obligation.id, header.id
                )));
            }
            let unit = state
                .units
                .get(&obligation.unit_id)
                .ok_or(LedgerError::UnitNotFound(obligation.unit_id))?;
            if unit.community_id != header.community_id {
                return Err(LedgerError::integrity(format!(
                    "obligation {} references unit {} outside community {}",
                    obligation.id, obligation.unit_id, header.community_id
                )));
            }
            // Unique (declaration, unit) index.
            if !obligated_units.insert(obligation.unit_id) {
                return Err(LedgerError::integrity(format!(
                    "duplicate obligation for unit {} in declaration {}",
                    obligation.unit_id, header.id
                )));
            }
        }

        let key = (header.community_id, header.kind, header.period);
        if state.period_index.contains_key(&key) {
            return Err(LedgerError::DuplicatePeriod {
                community: header.community_id,
                period: header.period,
            });
        }

        tracing::debug!(
            declaration = %header.id,
            community = %header.community_id,
            period = %header.period,
            items = aggregate.items.len(),
            obligations = aggregate.obligations.len(),
            "committing declaration aggregate"
        );

        state.period_index.insert(key, header.id);
        state.declarations.insert(header.id, aggregate.clone());
        Ok(aggregate)
    }

    fn update_declaration(
        &self,
        id: DeclarationId,
        update: DeclarationUpdate,
    ) -> Result<DeclarationAggregate, LedgerError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LedgerError::integrity("ledger write lock poisoned"))?;

        let aggregate = state
            .declarations
            .get_mut(&id)
            .ok_or(LedgerError::DeclarationNotFound(id))?;

        // All patched fields land under the same write lock.
        if let Some(items) = update.items {
            aggregate.items = items;
        }
        if let Some(due_date) = update.due_date {
            aggregate.header.due_date = due_date;
        }
        if let Some(method) = update.method {
            aggregate.header.method = method;
        }
        Ok(aggregate.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use strata_types::{
        Declaration, DeclarationItem, Money, ObligationId, ObligationStatus, OrganizationId,
        ProrateMethod, UnitObligation,
    };

    fn seeded_ledger() -> (InMemoryLedger, CommunityId, Vec<UnitId>) {
        let ledger = InMemoryLedger::new();
        let community = CommunityId::new();
        ledger
            .upsert_community(CommunityRecord::new(
                community,
                OrganizationId::new(),
                "Cedar Grove",
            ))
            .unwrap();

        let mut unit_ids = Vec::new();
        for label in ["A-101", "A-102", "B-201"] {
            let unit = Unit::new(UnitId::new(), community, label);
            unit_ids.push(unit.id);
            ledger.upsert_unit(unit).unwrap();
        }
        (ledger, community, unit_ids)
    }

    fn aggregate_for(
        community: CommunityId,
        period: &str,
        unit_ids: &[UnitId],
        share: &str,
    ) -> DeclarationAggregate {
        let declaration_id = DeclarationId::new();
        let due_date = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let share: Money = share.parse().unwrap();

        DeclarationAggregate {
            header: Declaration {
                id: declaration_id,
                community_id: community,
                kind: DeclarationKind::Expense,
                period: period.parse().unwrap(),
                due_date,
                method: ProrateMethod::Equal,
                created_at: Utc::now(),
            },
            items: vec![DeclarationItem::new("Cleaning", "90.00".parse().unwrap())],
            obligations: unit_ids
                .iter()
                .map(|unit_id| UnitObligation {
                    id: ObligationId::new(),
                    declaration_id,
                    unit_id: *unit_id,
                    amount: share,
                    status: ObligationStatus::Pending,
                    due_date,
                })
                .collect(),
        }
    }

    #[test]
    fn insert_and_read_back_round_trips() {
        let (ledger, community, unit_ids) = seeded_ledger();
        let aggregate = aggregate_for(community, "2024-05", &unit_ids, "30.00");
        let id = aggregate.header.id;

        ledger.insert_declaration(aggregate).unwrap();
        let stored = ledger.declaration(id).unwrap().unwrap();
        assert_eq!(stored.obligations.len(), 3);
        assert_eq!(stored.total_amount(), "90.00".parse().unwrap());

        let listed = ledger
            .declarations_by_community(community, DeclarationKind::Expense, None)
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn duplicate_period_is_rejected_by_the_unique_index() {
        let (ledger, community, unit_ids) = seeded_ledger();
        ledger
            .insert_declaration(aggregate_for(community, "2024-05", &unit_ids, "30.00"))
            .unwrap();

        let error = ledger
            .insert_declaration(aggregate_for(community, "2024-05", &unit_ids, "10.00"))
            .unwrap_err();
        assert!(matches!(error, LedgerError::DuplicatePeriod { .. }));
        assert_eq!(ledger.declaration_count(), 1);
    }

    #[test]
    fn same_period_different_kind_is_allowed() {
        let (ledger, community, unit_ids) = seeded_ledger();
        ledger
            .insert_declaration(aggregate_for(community, "2024-05", &unit_ids, "30.00"))
            .unwrap();

        let mut income = aggregate_for(community, "2024-05", &unit_ids, "30.00");
        income.header.kind = DeclarationKind::Income;
        for obligation in &mut income.obligations {
            obligation.declaration_id = income.header.id;
        }
        ledger.insert_declaration(income).unwrap();
        assert_eq!(ledger.declaration_count(), 2);
    }

    #[test]
    fn failed_insert_writes_nothing() {
        let (ledger, community, unit_ids) = seeded_ledger();

        // Duplicate unit in the obligation set trips the unique
        // (declaration, unit) index.
        let mut aggregate = aggregate_for(community, "2024-05", &unit_ids, "30.00");
        let duplicate = aggregate.obligations[0].clone();
        aggregate.obligations.push(duplicate);

        let error = ledger.insert_declaration(aggregate).unwrap_err();
        assert!(matches!(error, LedgerError::IntegrityViolation { .. }));
        assert_eq!(ledger.declaration_count(), 0);
        assert!(ledger
            .declarations_by_community(community, DeclarationKind::Expense, None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn obligation_for_foreign_unit_is_rejected() {
        let (ledger, community, _) = seeded_ledger();
        let foreign_unit = UnitId::new();
        let aggregate = aggregate_for(community, "2024-05", &[foreign_unit], "90.00");

        let error = ledger.insert_declaration(aggregate).unwrap_err();
        assert_eq!(error, LedgerError::UnitNotFound(foreign_unit));
        assert_eq!(ledger.declaration_count(), 0);
    }

    #[test]
    fn replacing_items_leaves_obligations_untouched() {
        let (ledger, community, unit_ids) = seeded_ledger();
        let aggregate = aggregate_for(community, "2024-05", &unit_ids, "30.00");
        let id = aggregate.header.id;
        ledger.insert_declaration(aggregate).unwrap();

        let updated = ledger
            .update_declaration(
                id,
                DeclarationUpdate {
                    items: Some(vec![
                        DeclarationItem::new("Cleaning", "120.00".parse().unwrap()),
                        DeclarationItem::new("Gardening", "60.00".parse().unwrap()),
                    ]),
                    ..DeclarationUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.total_amount(), "180.00".parse().unwrap());
        assert_eq!(updated.obligations_total(), "90.00".parse().unwrap());
    }

    #[test]
    fn combined_update_applies_every_field_in_one_transaction() {
        let (ledger, community, unit_ids) = seeded_ledger();
        let aggregate = aggregate_for(community, "2024-05", &unit_ids, "30.00");
        let id = aggregate.header.id;
        ledger.insert_declaration(aggregate).unwrap();

        let new_due = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let updated = ledger
            .update_declaration(
                id,
                DeclarationUpdate {
                    items: Some(vec![DeclarationItem::new(
                        "Cleaning",
                        "120.00".parse().unwrap(),
                    )]),
                    due_date: Some(new_due),
                    method: Some(ProrateMethod::Coefficient),
                },
            )
            .unwrap();

        assert_eq!(updated.total_amount(), "120.00".parse().unwrap());
        assert_eq!(updated.header.due_date, new_due);
        assert_eq!(updated.header.method, ProrateMethod::Coefficient);
        // Header patches never reach the obligations.
        assert_eq!(updated.obligations_total(), "90.00".parse().unwrap());
        assert!(updated
            .obligations
            .iter()
            .all(|obligation| obligation.due_date != new_due));
    }

    #[test]
    fn update_of_missing_declaration_changes_nothing() {
        let (ledger, community, unit_ids) = seeded_ledger();
        ledger
            .insert_declaration(aggregate_for(community, "2024-05", &unit_ids, "30.00"))
            .unwrap();

        let ghost = DeclarationId::new();
        let error = ledger
            .update_declaration(
                ghost,
                DeclarationUpdate {
                    due_date: Some(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()),
                    ..DeclarationUpdate::default()
                },
            )
            .unwrap_err();
        assert_eq!(error, LedgerError::DeclarationNotFound(ghost));
        assert_eq!(ledger.declaration_count(), 1);
    }

    #[test]
    fn inactive_units_are_excluded_from_active_listing() {
        let (ledger, community, _) = seeded_ledger();
        ledger
            .upsert_unit(Unit::new(UnitId::new(), community, "C-001").inactive())
            .unwrap();

        let units = ledger.active_units(community).unwrap();
        assert_eq!(units.len(), 3);
        assert!(units.iter().all(|unit| unit.is_active));
    }
}
