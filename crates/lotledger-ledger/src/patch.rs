//! Partial-update structures.
//!
//! Each operation that edits a record names exactly the fields it is allowed
//! to change; a `None` leaves the field alone. Fields that are themselves
//! optional use a nested `Option` so a patch can also clear them.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Fields a product-metadata update may change.
///
/// Derived stock/cost fields are deliberately absent; only revaluation
/// writes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    /// New display name.
    pub name: Option<String>,
    /// New SKU (checked for uniqueness).
    pub sku: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Set or clear the unit label.
    pub units: Option<Option<String>>,
}

/// Fields a stock-entry update may change.
///
/// A new quantity is rejected below the lot's already-consumed amount; on
/// success the remaining quantity is recomputed as
/// `new_quantity - consumed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    /// New original quantity.
    pub quantity: Option<Decimal>,
    /// New unit price. Prices already frozen onto allocation lines keep
    /// their value.
    pub unit_price: Option<Decimal>,
    /// New entry date (changes FIFO order for future allocations).
    pub entry_date: Option<NaiveDate>,
    /// Set or clear the notes.
    pub notes: Option<Option<String>>,
}

/// Fields a withdrawal update may change: metadata only.
///
/// Totals and allocation are immutable here; changing a withdrawal's
/// quantity goes through delete-and-recreate instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPatch {
    /// New output date.
    pub output_date: Option<NaiveDate>,
    /// Set or clear the external reference.
    pub reference_number: Option<Option<String>>,
    /// Set or clear the notes.
    pub notes: Option<Option<String>>,
}
