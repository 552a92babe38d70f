//! Product type with derived stock and cost fields.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::ProductId;
use crate::valuation::Valuation;

/// A tracked product.
///
/// `current_stock` and `average_cost` are derived fields: they are never set
/// by callers and only ever recomputed from the product's live lots via
/// [`Valuation`]. A freshly registered product carries zero stock and cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Stock-keeping unit code, unique across the registry.
    pub sku: String,
    /// Free-form description.
    pub description: String,
    /// Optional unit label ("kg", "pcs", ...).
    pub units: Option<String>,
    /// Sum of live lot remaining quantities. Derived.
    pub current_stock: Decimal,
    /// Stock-weighted mean unit price of live lots. Derived.
    pub average_cost: Decimal,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Bumped on every metadata change and revaluation.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Register a new product with zero stock and cost.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        description: impl Into<String>,
        units: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            name: name.into(),
            sku: sku.into(),
            description: description.into(),
            units,
            current_stock: Decimal::ZERO,
            average_cost: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Write a recomputed valuation onto the derived fields.
    pub fn apply_valuation(&mut self, valuation: &Valuation) {
        self.current_stock = valuation.current_stock;
        self.average_cost = valuation.average_cost;
        self.updated_at = Utc::now();
    }

    /// Book value of everything on hand, at the running average cost.
    #[must_use]
    pub fn stock_value(&self) -> Decimal {
        self.current_stock * self.average_cost
    }
}
