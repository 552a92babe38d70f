//! Read-only reporting over the stock ledger.
//!
//! The reporting collaborator reads journal rows and, for output-typed
//! rows, the allocation-line detail, to reconstruct a FIFO audit trail. It
//! never mutates ledger state.
//!
//! Three report shapes are provided:
//!
//! - [`stock_summary`] - per-product on-hand quantity and valuation
//! - [`movements`] - journal rows over an optional date range, newest first
//! - [`fifo_trail`] - a product's withdrawals with their per-lot splits

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use lotledger_core::{EntryId, OutputId, ProductId, TxKind};
use lotledger_ledger::{Ledger, LedgerError};

/// One row of the per-product stock report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockSummary {
    /// The product.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// SKU code.
    pub sku: String,
    /// Unit label, if any.
    pub units: Option<String>,
    /// Derived on-hand quantity.
    pub current_stock: Decimal,
    /// Derived weighted-average unit cost.
    pub average_cost: Decimal,
    /// `current_stock * average_cost`.
    pub stock_value: Decimal,
}

/// One journal row joined with its product's display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movement {
    /// Entry or output.
    pub kind: TxKind,
    /// The product moved.
    pub product_id: ProductId,
    /// Product display name at report time.
    pub product_name: String,
    /// Moved quantity.
    pub quantity: Decimal,
    /// Movement date.
    pub date: NaiveDate,
    /// Id of the documented entry or output.
    pub reference_id: Uuid,
    /// Notes copied from the documented record.
    pub notes: Option<String>,
}

/// One slice of a withdrawal in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrailLine {
    /// The source lot.
    pub entry_id: EntryId,
    /// The lot's receipt date (its FIFO key).
    pub entry_date: NaiveDate,
    /// Amount drawn from that lot.
    pub quantity: Decimal,
    /// Unit price frozen at allocation time.
    pub unit_price: Decimal,
    /// `quantity * unit_price`.
    pub cost: Decimal,
}

/// One withdrawal with its FIFO split, for the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputTrail {
    /// The withdrawal.
    pub output_id: OutputId,
    /// Withdrawal date.
    pub output_date: NaiveDate,
    /// External reference, if any.
    pub reference_number: Option<String>,
    /// Fulfilled quantity.
    pub total_quantity: Decimal,
    /// Exact FIFO cost.
    pub total_cost: Decimal,
    /// Per-lot slices in consumption order.
    pub lines: Vec<TrailLine>,
}

/// Per-product stock and valuation, sorted by product name.
#[must_use]
pub fn stock_summary(ledger: &Ledger) -> Vec<StockSummary> {
    ledger
        .products()
        .into_iter()
        .map(|product| StockSummary {
            product_id: product.id,
            name: product.name.clone(),
            sku: product.sku.clone(),
            units: product.units.clone(),
            current_stock: product.current_stock,
            average_cost: product.average_cost,
            stock_value: product.stock_value(),
        })
        .collect()
}

/// Journal rows within `[from, to]` (both bounds optional), newest first.
#[must_use]
pub fn movements(
    ledger: &Ledger,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Movement> {
    ledger
        .transactions()
        .into_iter()
        .filter(|row| from.map_or(true, |from| row.date >= from))
        .filter(|row| to.map_or(true, |to| row.date <= to))
        .map(|row| Movement {
            kind: row.kind,
            product_id: row.product_id,
            product_name: ledger
                .product(row.product_id)
                .map(|product| product.name.clone())
                .unwrap_or_default(),
            quantity: row.quantity,
            date: row.date,
            reference_id: row.reference_id,
            notes: row.notes.clone(),
        })
        .collect()
}

/// Reconstruct a product's FIFO audit trail from its output-typed journal
/// rows and their allocation lines, newest first.
pub fn fifo_trail(
    ledger: &Ledger,
    product_id: ProductId,
) -> Result<Vec<OutputTrail>, LedgerError> {
    ledger.product(product_id)?;

    let mut trails = Vec::new();
    for row in ledger.transactions_for_product(product_id) {
        if row.kind != TxKind::Output {
            continue;
        }
        let output_id = OutputId(row.reference_id);
        let output = ledger.output(output_id)?;
        let lines = ledger
            .lines_for_output(output_id)?
            .iter()
            .map(|line| {
                Ok(TrailLine {
                    entry_id: line.entry_id,
                    entry_date: ledger.entry(line.entry_id)?.entry_date,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    cost: line.cost(),
                })
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;
        trails.push(OutputTrail {
            output_id,
            output_date: output.output_date,
            reference_number: output.reference_number.clone(),
            total_quantity: output.total_quantity,
            total_cost: output.total_cost,
            lines,
        });
    }
    Ok(trails)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn seeded_ledger() -> (Ledger, ProductId) {
        let mut ledger = Ledger::new();
        let product = ledger
            .create_product("Arabica beans", "COF-001", "", Some("kg".to_string()))
            .unwrap()
            .id;
        ledger
            .add_entry(product, dec!(80), dec!(5.00), date(1), None)
            .unwrap();
        ledger
            .add_entry(product, dec!(50), dec!(5.50), date(9), None)
            .unwrap();
        ledger
            .withdraw(product, dec!(100), date(10), Some("SO-1".to_string()), None)
            .unwrap();
        (ledger, product)
    }

    #[test]
    fn test_stock_summary() {
        let (ledger, product) = seeded_ledger();
        let summary = stock_summary(&ledger);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].product_id, product);
        assert_eq!(summary[0].current_stock, dec!(30));
        // 30 units left, all from the 5.50 lot.
        assert_eq!(summary[0].average_cost, dec!(5.50));
        assert_eq!(summary[0].stock_value, dec!(165.00));
    }

    #[test]
    fn test_movements_range_filter() {
        let (ledger, _) = seeded_ledger();

        let all = movements(&ledger, None, None);
        assert_eq!(all.len(), 3);
        // Newest first.
        assert_eq!(all[0].date, date(10));
        assert_eq!(all[0].kind, TxKind::Output);

        let early = movements(&ledger, None, Some(date(5)));
        assert_eq!(early.len(), 1);
        assert_eq!(early[0].date, date(1));

        let window = movements(&ledger, Some(date(2)), Some(date(9)));
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].kind, TxKind::Entry);
    }

    #[test]
    fn test_fifo_trail_joins_lines() {
        let (ledger, product) = seeded_ledger();
        let trails = fifo_trail(&ledger, product).unwrap();

        assert_eq!(trails.len(), 1);
        let trail = &trails[0];
        assert_eq!(trail.reference_number.as_deref(), Some("SO-1"));
        assert_eq!(trail.total_cost, dec!(510.00));
        assert_eq!(trail.lines.len(), 2);
        // Oldest lot first, prices frozen.
        assert_eq!(trail.lines[0].entry_date, date(1));
        assert_eq!(trail.lines[0].quantity, dec!(80));
        assert_eq!(trail.lines[0].cost, dec!(400.00));
        assert_eq!(trail.lines[1].entry_date, date(9));
        assert_eq!(trail.lines[1].cost, dec!(110.00));

        let line_sum: Decimal = trail.lines.iter().map(|line| line.cost).sum();
        assert_eq!(trail.total_cost, line_sum);
    }

    #[test]
    fn test_fifo_trail_unknown_product() {
        let (ledger, _) = seeded_ledger();
        assert!(matches!(
            fifo_trail(&ledger, ProductId::new()),
            Err(LedgerError::ProductNotFound(_))
        ));
    }
}
