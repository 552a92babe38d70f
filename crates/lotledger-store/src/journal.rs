//! The transaction journal.

use lotledger_core::{ProductId, Transaction, TxKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only log of entry/output events, with compensating removal.
///
/// Rows document creations; a row is removed only when its referenced
/// entry or output is deleted. This is referential cleanup, not a
/// general-purpose event log: under normal operation there is at most one
/// row per `(reference_id, kind)` pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    rows: Vec<Transaction>,
}

impl Journal {
    /// Create an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the journal holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row.
    pub fn record(&mut self, transaction: Transaction) {
        self.rows.push(transaction);
    }

    /// Remove the row documenting `(reference_id, kind)`.
    ///
    /// Returns whether a row was removed.
    pub fn retract(&mut self, reference_id: Uuid, kind: TxKind) -> bool {
        let before = self.rows.len();
        self.rows
            .retain(|row| !(row.reference_id == reference_id && row.kind == kind));
        self.rows.len() < before
    }

    /// Rows in append order.
    #[must_use]
    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    /// All rows, newest first.
    #[must_use]
    pub fn all(&self) -> Vec<&Transaction> {
        let mut rows: Vec<&Transaction> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    /// A product's rows, newest first.
    #[must_use]
    pub fn for_product(&self, product_id: ProductId) -> Vec<&Transaction> {
        let mut rows: Vec<&Transaction> = self
            .rows
            .iter()
            .filter(|row| row.product_id == product_id)
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    /// Whether any row belongs to the product.
    #[must_use]
    pub fn any_for_product(&self, product_id: ProductId) -> bool {
        self.rows.iter().any(|row| row.product_id == product_id)
    }
}
