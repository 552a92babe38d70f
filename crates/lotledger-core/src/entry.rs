//! Stock entry (lot) type.
//!
//! A [`StockEntry`] records one discrete receipt of inventory: a quantity
//! bought at a fixed unit price on a given date. The lot keeps both its
//! original `quantity` and the `remaining_quantity` still available to
//! withdrawals; the difference is what FIFO allocation has consumed so far.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::{EntryId, ProductId};

/// Consumption state of a lot, derived from its two quantities.
///
/// Only an [`Open`](LotState::Open) lot may be deleted or freely shrunk;
/// consumed lots stay in the store for audit and move back toward `Open`
/// only when a withdrawal that touched them is deleted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LotState {
    /// Nothing has been withdrawn from this lot.
    Open,
    /// Some, but not all, of the lot has been withdrawn.
    PartiallyConsumed,
    /// The lot is fully consumed. It remains stored but is never allocated.
    Exhausted,
}

/// One receipt of inventory at a fixed unit cost and date.
///
/// Invariant: `0 <= remaining_quantity <= quantity` at all times. The lot
/// store enforces this on every delta it applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    /// Unique lot id.
    pub id: EntryId,
    /// The product this lot belongs to.
    pub product_id: ProductId,
    /// Original received quantity.
    pub quantity: Decimal,
    /// Quantity not yet consumed by withdrawals.
    pub remaining_quantity: Decimal,
    /// Cost basis per unit, frozen onto allocation lines at withdrawal time.
    pub unit_price: Decimal,
    /// Receipt date; the FIFO ordering key.
    pub entry_date: NaiveDate,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl StockEntry {
    /// Create a new lot with `remaining_quantity` equal to `quantity`.
    #[must_use]
    pub fn new(
        product_id: ProductId,
        quantity: Decimal,
        unit_price: Decimal,
        entry_date: NaiveDate,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            product_id,
            quantity,
            remaining_quantity: quantity,
            unit_price,
            entry_date,
            notes,
        }
    }

    /// Quantity already consumed by withdrawals.
    #[must_use]
    pub fn consumed(&self) -> Decimal {
        self.quantity - self.remaining_quantity
    }

    /// Whether the lot has nothing left to allocate.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining_quantity.is_zero()
    }

    /// Whether no withdrawal has touched this lot yet.
    #[must_use]
    pub fn is_untouched(&self) -> bool {
        self.remaining_quantity == self.quantity
    }

    /// Derive the lot's consumption state.
    #[must_use]
    pub fn state(&self) -> LotState {
        if self.is_untouched() {
            LotState::Open
        } else if self.is_exhausted() {
            LotState::Exhausted
        } else {
            LotState::PartiallyConsumed
        }
    }

    /// Book value of what remains in this lot.
    #[must_use]
    pub fn remaining_value(&self) -> Decimal {
        self.remaining_quantity * self.unit_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn lot(quantity: Decimal, remaining: Decimal) -> StockEntry {
        let mut entry = StockEntry::new(
            ProductId::new(),
            quantity,
            dec!(2.50),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            None,
        );
        entry.remaining_quantity = remaining;
        entry
    }

    #[test]
    fn test_new_starts_full() {
        let entry = lot(dec!(10), dec!(10));
        assert!(entry.is_untouched());
        assert_eq!(entry.state(), LotState::Open);
        assert_eq!(entry.consumed(), dec!(0));
    }

    #[test]
    fn test_partially_consumed() {
        let entry = lot(dec!(10), dec!(4));
        assert_eq!(entry.state(), LotState::PartiallyConsumed);
        assert_eq!(entry.consumed(), dec!(6));
        assert!(!entry.is_exhausted());
    }

    #[test]
    fn test_exhausted() {
        let entry = lot(dec!(10), dec!(0));
        assert_eq!(entry.state(), LotState::Exhausted);
        assert!(entry.is_exhausted());
    }

    #[test]
    fn test_remaining_value() {
        let entry = lot(dec!(10), dec!(4));
        assert_eq!(entry.remaining_value(), dec!(10.00));
    }

    #[test]
    fn test_fractional_quantities() {
        let entry = lot(dec!(2.5), dec!(1.25));
        assert_eq!(entry.consumed(), dec!(1.25));
        assert_eq!(entry.state(), LotState::PartiallyConsumed);
    }
}
