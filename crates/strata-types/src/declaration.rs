//! Declarations, line items, and per-unit obligations.
//!
//! A declaration plus its items and obligations is one aggregate: it is
//! created atomically and never partially exists. `total_amount` is always
//! recomputed from the items, never stored or mutated independently.

use crate::ids::{CommunityId, DeclarationId, ObligationId, UnitId};
use crate::money::Money;
use crate::period::Period;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Whether a declaration records a common expense or a common income.
///
/// The two are symmetric; the kind only partitions the per-period
/// uniqueness key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Expense,
    Income,
}

/// Strategy used to distribute a declaration total across units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProrateMethod {
    Equal,
    Coefficient,
}

/// A single line item of a declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationItem {
    pub name: String,
    pub amount: Money,
    pub category: Option<String>,
}

impl DeclarationItem {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            name: name.into(),
            amount,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Declaration header for one community and period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub id: DeclarationId,
    pub community_id: CommunityId,
    pub kind: DeclarationKind,
    pub period: Period,
    pub due_date: NaiveDate,
    pub method: ProrateMethod,
    pub created_at: DateTime<Utc>,
}

/// Payment state of a per-unit obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationStatus {
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

/// The prorated amount one unit owes (or receives) for a declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitObligation {
    pub id: ObligationId,
    pub declaration_id: DeclarationId,
    pub unit_id: UnitId,
    pub amount: Money,
    pub status: ObligationStatus,
    pub due_date: NaiveDate,
}

/// The atomically persisted unit: header, ordered items, and obligations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationAggregate {
    pub header: Declaration,
    pub items: Vec<DeclarationItem>,
    pub obligations: Vec<UnitObligation>,
}

impl DeclarationAggregate {
    /// Sum of the item amounts. Recomputed on every call so the total can
    /// never drift from the items.
    pub fn total_amount(&self) -> Money {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Sum of the obligation amounts, for conservation checks.
    pub fn obligations_total(&self) -> Money {
        self.obligations
            .iter()
            .map(|obligation| obligation.amount)
            .sum()
    }
}
