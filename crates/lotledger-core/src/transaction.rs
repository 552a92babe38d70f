//! Journal transaction type.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::id::{ProductId, TxId};
use crate::{StockEntry, StockOutput};

/// Which side of the ledger a journal row documents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    /// Stock received (a lot was created).
    Entry,
    /// Stock withdrawn (an output was created).
    Output,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => write!(f, "entry"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// An append-only journal row.
///
/// One row is written per entry/output creation and removed only as a
/// compensating action when the referenced record is deleted.
/// `reference_id` holds the raw id of the documented [`StockEntry`] or
/// [`StockOutput`]; `kind` says which.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique row id.
    pub id: TxId,
    /// Entry or output.
    pub kind: TxKind,
    /// Product the movement belongs to.
    pub product_id: ProductId,
    /// Moved quantity, always positive.
    pub quantity: Decimal,
    /// Movement date (entry date or output date).
    pub date: NaiveDate,
    /// Id of the documented entry or output.
    pub reference_id: Uuid,
    /// Notes copied from the documented record.
    pub notes: Option<String>,
}

impl Transaction {
    /// Journal row for a freshly created lot.
    #[must_use]
    pub fn for_entry(entry: &StockEntry) -> Self {
        Self {
            id: TxId::new(),
            kind: TxKind::Entry,
            product_id: entry.product_id,
            quantity: entry.quantity,
            date: entry.entry_date,
            reference_id: entry.id.as_uuid(),
            notes: entry.notes.clone(),
        }
    }

    /// Journal row for a freshly created withdrawal.
    #[must_use]
    pub fn for_output(output: &StockOutput) -> Self {
        Self {
            id: TxId::new(),
            kind: TxKind::Output,
            product_id: output.product_id,
            quantity: output.total_quantity,
            date: output.output_date,
            reference_id: output.id.as_uuid(),
            notes: output.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_for_entry() {
        let entry = StockEntry::new(
            ProductId::new(),
            dec!(12),
            dec!(3.00),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Some("PO-77".to_string()),
        );
        let tx = Transaction::for_entry(&entry);
        assert_eq!(tx.kind, TxKind::Entry);
        assert_eq!(tx.product_id, entry.product_id);
        assert_eq!(tx.quantity, dec!(12));
        assert_eq!(tx.reference_id, entry.id.as_uuid());
        assert_eq!(tx.notes.as_deref(), Some("PO-77"));
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TxKind::Entry).unwrap(), "\"entry\"");
        assert_eq!(
            serde_json::to_string(&TxKind::Output).unwrap(),
            "\"output\""
        );
    }
}
