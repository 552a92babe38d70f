//! Pure FIFO allocation.
//!
//! Given a product's lots and a requested withdrawal quantity, [`allocate`]
//! decides which lots satisfy it and at what cost. It performs no mutation;
//! applying the computed deltas to the lot store is the caller's job, which
//! keeps the walk unit-testable as a pure function.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entry::StockEntry;
use crate::id::EntryId;

/// One slice of an allocation: how much to draw from which lot, at the lot's
/// frozen unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationLine {
    /// The lot to draw from.
    pub entry_id: EntryId,
    /// Amount taken from that lot.
    pub quantity: Decimal,
    /// The lot's unit price at allocation time.
    pub unit_price: Decimal,
}

impl AllocationLine {
    /// Cost of this slice: `quantity * unit_price`.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// A computed FIFO split, lines in consumption order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Per-lot slices, oldest lot first.
    pub lines: Vec<AllocationLine>,
    /// Exact sum of per-line costs.
    pub total_cost: Decimal,
}

impl Allocation {
    /// Sum of the allocated line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> Decimal {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

/// Error returned when an allocation cannot be performed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// The live lots cannot cover the requested quantity. Carries the
    /// available total so callers can produce a precise message.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Quantity that was requested.
        requested: Decimal,
        /// Total remaining quantity across all live lots.
        available: Decimal,
    },
}

/// Select lots in FIFO order to fulfill `quantity`.
///
/// Exhausted lots are skipped. Live lots are consumed oldest `entry_date`
/// first; lots sharing a date are consumed in the order given, so callers
/// that pass lots in insertion order get a stable tie-break. Availability is
/// checked up front: on [`AllocationError::InsufficientStock`] no lines are
/// produced at all.
///
/// # Examples
///
/// ```
/// use lotledger_core::{allocate, ProductId, StockEntry};
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let product = ProductId::new();
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let lots = vec![StockEntry::new(product, dec!(10), dec!(4.00), date, None)];
///
/// let allocation = allocate(&lots, dec!(3)).unwrap();
/// assert_eq!(allocation.lines.len(), 1);
/// assert_eq!(allocation.total_cost, dec!(12.00));
/// ```
pub fn allocate<'a, I>(lots: I, quantity: Decimal) -> Result<Allocation, AllocationError>
where
    I: IntoIterator<Item = &'a StockEntry>,
{
    let mut live: Vec<&StockEntry> = lots
        .into_iter()
        .filter(|lot| !lot.is_exhausted())
        .collect();
    // Stable: equal dates keep the caller's (insertion) order.
    live.sort_by_key(|lot| lot.entry_date);

    let available: Decimal = live.iter().map(|lot| lot.remaining_quantity).sum();
    if available < quantity {
        return Err(AllocationError::InsufficientStock {
            requested: quantity,
            available,
        });
    }

    let mut remaining_to_fulfill = quantity;
    let mut lines = Vec::new();
    let mut total_cost = Decimal::ZERO;

    for lot in live {
        if remaining_to_fulfill.is_zero() {
            break;
        }
        let take = remaining_to_fulfill.min(lot.remaining_quantity);
        total_cost += take * lot.unit_price;
        lines.push(AllocationLine {
            entry_id: lot.id,
            quantity: take,
            unit_price: lot.unit_price,
        });
        remaining_to_fulfill -= take;
    }

    Ok(Allocation { lines, total_cost })
}
