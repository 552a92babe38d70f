//! Weighted-average valuation of a product's live lots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entry::StockEntry;

/// A product's derived totals, recomputed from its lots.
///
/// The computation is pure and idempotent: running it twice over the same
/// lots yields identical values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuation {
    /// Sum of live lot remaining quantities.
    pub current_stock: Decimal,
    /// Stock-weighted mean unit price, zero when nothing is on hand.
    pub average_cost: Decimal,
}

impl Valuation {
    /// Compute the valuation over a product's lots.
    ///
    /// Exhausted lots contribute nothing; they stay in the store for audit
    /// but carry no stock.
    #[must_use]
    pub fn of<'a, I>(lots: I) -> Self
    where
        I: IntoIterator<Item = &'a StockEntry>,
    {
        let mut current_stock = Decimal::ZERO;
        let mut total_value = Decimal::ZERO;

        for lot in lots {
            if lot.is_exhausted() {
                continue;
            }
            current_stock += lot.remaining_quantity;
            total_value += lot.remaining_quantity * lot.unit_price;
        }

        let average_cost = if current_stock.is_zero() {
            Decimal::ZERO
        } else {
            total_value / current_stock
        };

        Self {
            current_stock,
            average_cost,
        }
    }

    /// A zero valuation, as carried by a product with no lots.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            current_stock: Decimal::ZERO,
            average_cost: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ProductId;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn lot(quantity: Decimal, remaining: Decimal, price: Decimal) -> StockEntry {
        let mut entry = StockEntry::new(
            ProductId::new(),
            quantity,
            price,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            None,
        );
        entry.remaining_quantity = remaining;
        entry
    }

    #[test]
    fn test_weighted_average() {
        // The worked example: 80 @ 5.00 and 50 @ 5.50.
        let lots = vec![
            lot(dec!(80), dec!(80), dec!(5.00)),
            lot(dec!(50), dec!(50), dec!(5.50)),
        ];
        let valuation = Valuation::of(&lots);
        assert_eq!(valuation.current_stock, dec!(130));
        assert_eq!(valuation.average_cost.round_dp(4), dec!(5.1923));
    }

    #[test]
    fn test_after_fifo_consumption() {
        // Same lots after withdrawing 20 units FIFO (from the first lot).
        let lots = vec![
            lot(dec!(80), dec!(60), dec!(5.00)),
            lot(dec!(50), dec!(50), dec!(5.50)),
        ];
        let valuation = Valuation::of(&lots);
        assert_eq!(valuation.current_stock, dec!(110));
        assert_eq!(valuation.average_cost.round_dp(4), dec!(5.2273));
    }

    #[test]
    fn test_zero_stock_zero_cost() {
        let lots = vec![lot(dec!(10), dec!(0), dec!(5.00))];
        let valuation = Valuation::of(&lots);
        assert_eq!(valuation, Valuation::zero());
    }

    #[test]
    fn test_empty_lots() {
        let valuation = Valuation::of(std::iter::empty::<&StockEntry>());
        assert_eq!(valuation, Valuation::zero());
    }

    #[test]
    fn test_idempotent() {
        let lots = vec![
            lot(dec!(80), dec!(60), dec!(5.00)),
            lot(dec!(50), dec!(50), dec!(5.50)),
        ];
        assert_eq!(Valuation::of(&lots), Valuation::of(&lots));
    }
}
