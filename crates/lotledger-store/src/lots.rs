//! The lot store: stock entries keyed by id, orderable for FIFO.

use std::collections::HashMap;

use lotledger_core::{Decimal, EntryId, ProductId, StockEntry};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// A lot plus the monotonic sequence number assigned at insert.
///
/// The sequence is the FIFO tie-break for lots sharing an `entry_date`; it
/// is persisted with the snapshot so ordering survives reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredLot {
    entry: StockEntry,
    seq: u64,
}

/// Collection of [`StockEntry`] records, queryable by product and orderable
/// by entry date.
///
/// The store has no side effects beyond itself: it never cascades into
/// product aggregates or the journal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LotStore {
    lots: HashMap<EntryId, StoredLot>,
    next_seq: u64,
}

impl LotStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lots held, exhausted ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    /// Whether the store holds no lots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Look up a lot.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&StockEntry> {
        self.lots.get(&id).map(|stored| &stored.entry)
    }

    /// Iterate over all lots in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &StockEntry> {
        self.lots.values().map(|stored| &stored.entry)
    }

    /// Insert a new lot, assigning its FIFO sequence number.
    pub fn insert(&mut self, entry: StockEntry) -> Result<(), StoreError> {
        if self.lots.contains_key(&entry.id) {
            return Err(StoreError::DuplicateId(entry.id.as_uuid()));
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.lots.insert(entry.id, StoredLot { entry, seq });
        Ok(())
    }

    /// Replace a lot's fields, keeping its sequence number.
    ///
    /// Rejects a replacement whose remaining quantity falls outside
    /// `[0, quantity]`.
    pub fn replace(&mut self, entry: StockEntry) -> Result<(), StoreError> {
        if entry.remaining_quantity < Decimal::ZERO || entry.remaining_quantity > entry.quantity {
            return Err(StoreError::InvariantViolation {
                id: entry.id.as_uuid(),
                quantity: entry.quantity,
                attempted: entry.remaining_quantity,
            });
        }
        match self.lots.get_mut(&entry.id) {
            Some(stored) => {
                stored.entry = entry;
                Ok(())
            }
            None => Err(StoreError::NotFound(entry.id.as_uuid())),
        }
    }

    /// Adjust a lot's remaining quantity by a signed delta.
    ///
    /// Negative deltas consume, positive deltas restore. The result must
    /// stay within `[0, quantity]`.
    pub fn apply_delta(&mut self, id: EntryId, delta: Decimal) -> Result<(), StoreError> {
        let stored = self
            .lots
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id.as_uuid()))?;
        let attempted = stored.entry.remaining_quantity + delta;
        if attempted < Decimal::ZERO || attempted > stored.entry.quantity {
            return Err(StoreError::InvariantViolation {
                id: id.as_uuid(),
                quantity: stored.entry.quantity,
                attempted,
            });
        }
        stored.entry.remaining_quantity = attempted;
        Ok(())
    }

    /// Remove a lot and return it.
    pub fn remove(&mut self, id: EntryId) -> Result<StockEntry, StoreError> {
        self.lots
            .remove(&id)
            .map(|stored| stored.entry)
            .ok_or(StoreError::NotFound(id.as_uuid()))
    }

    /// All lots for a product, ordered by `entry_date` ascending with ties
    /// broken by insertion sequence.
    ///
    /// Used both for FIFO allocation and for display; exhausted lots are
    /// included (callers filter where it matters).
    #[must_use]
    pub fn list_by_product(&self, product_id: ProductId) -> Vec<&StockEntry> {
        let mut stored: Vec<&StoredLot> = self
            .lots
            .values()
            .filter(|stored| stored.entry.product_id == product_id)
            .collect();
        stored.sort_by_key(|stored| (stored.entry.entry_date, stored.seq));
        stored.into_iter().map(|stored| &stored.entry).collect()
    }

    /// Whether any lot belongs to the product.
    #[must_use]
    pub fn has_for_product(&self, product_id: ProductId) -> bool {
        self.lots
            .values()
            .any(|stored| stored.entry.product_id == product_id)
    }
}
