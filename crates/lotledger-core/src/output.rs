//! Stock output (withdrawal) types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocate::Allocation;
use crate::id::{EntryId, LineId, OutputId, ProductId};

/// A withdrawal event.
///
/// `total_cost` is the literal sum of the allocation line costs, not a
/// re-derivation from the product's average cost. Both totals are fixed once
/// persisted; changing a withdrawal's quantity replaces the record wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOutput {
    /// Unique withdrawal id.
    pub id: OutputId,
    /// The product withdrawn from.
    pub product_id: ProductId,
    /// Requested (and fulfilled) amount.
    pub total_quantity: Decimal,
    /// Exact FIFO-computed cost of the withdrawal.
    pub total_cost: Decimal,
    /// Optional external reference (order number, ticket, ...).
    pub reference_number: Option<String>,
    /// Date of the withdrawal.
    pub output_date: NaiveDate,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// One allocation line: the slice of a withdrawal drawn from a single lot.
///
/// `unit_price` is copied from the lot at allocation time and stays frozen
/// even if the lot's price is edited later. Lines are created and deleted
/// only together with their parent [`StockOutput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOutputLine {
    /// Unique line id.
    pub id: LineId,
    /// Parent withdrawal.
    pub output_id: OutputId,
    /// Source lot (non-owning reference; lookup only).
    pub entry_id: EntryId,
    /// Amount drawn from that lot.
    pub quantity: Decimal,
    /// Lot unit price at allocation time.
    pub unit_price: Decimal,
}

impl StockOutput {
    /// Build a withdrawal record and its lines from a computed allocation.
    ///
    /// The caller supplies the id so that a delete-and-recreate flow can keep
    /// the original identity.
    #[must_use]
    pub fn from_allocation(
        id: OutputId,
        product_id: ProductId,
        allocation: &Allocation,
        output_date: NaiveDate,
        reference_number: Option<String>,
        notes: Option<String>,
    ) -> (Self, Vec<StockOutputLine>) {
        let output = Self {
            id,
            product_id,
            total_quantity: allocation.total_quantity(),
            total_cost: allocation.total_cost,
            reference_number,
            output_date,
            notes,
        };
        let lines = allocation
            .lines
            .iter()
            .map(|line| StockOutputLine {
                id: LineId::new(),
                output_id: id,
                entry_id: line.entry_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();
        (output, lines)
    }
}

impl StockOutputLine {
    /// Cost of this line: `quantity * unit_price`.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocate::AllocationLine;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_allocation() {
        let product_id = ProductId::new();
        let entry_a = EntryId::new();
        let entry_b = EntryId::new();
        let allocation = Allocation {
            lines: vec![
                AllocationLine {
                    entry_id: entry_a,
                    quantity: dec!(80),
                    unit_price: dec!(5.00),
                },
                AllocationLine {
                    entry_id: entry_b,
                    quantity: dec!(20),
                    unit_price: dec!(5.50),
                },
            ],
            total_cost: dec!(510.00),
        };

        let id = OutputId::new();
        let (output, lines) = StockOutput::from_allocation(
            id,
            product_id,
            &allocation,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            Some("SO-1042".to_string()),
            None,
        );

        assert_eq!(output.id, id);
        assert_eq!(output.total_quantity, dec!(100));
        assert_eq!(output.total_cost, dec!(510.00));
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.output_id == id));
        // Lines preserve FIFO order and frozen prices.
        assert_eq!(lines[0].entry_id, entry_a);
        assert_eq!(lines[0].cost(), dec!(400.00));
        assert_eq!(lines[1].cost(), dec!(110.00));
    }
}
