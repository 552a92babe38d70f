//! The ledger service proper.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use lotledger_core::{
    allocate, Allocation, EntryId, OutputId, Product, ProductId, StockEntry, StockOutput,
    StockOutputLine, Transaction, TxKind, Valuation,
};
use lotledger_store::{Dataset, StoreError};

use crate::error::LedgerError;
use crate::patch::{EntryPatch, OutputPatch, ProductPatch};

/// The stock-ledger service: sole owner and mutator of the four collections.
///
/// Constructed once (empty or from a loaded [`Dataset`]) and handed to the
/// presentation layer; collaborators read through the accessor methods and
/// never reach into the collections directly.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    data: Dataset,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing dataset (e.g. loaded from a snapshot).
    #[must_use]
    pub fn with_dataset(data: Dataset) -> Self {
        Self { data }
    }

    /// Borrow the underlying dataset, e.g. for saving a snapshot.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// Take the dataset back out of the ledger.
    #[must_use]
    pub fn into_dataset(self) -> Dataset {
        self.data
    }

    fn internal(err: StoreError) -> LedgerError {
        LedgerError::Invariant(err.to_string())
    }

    // ------------------------------------------------------------------
    // Product registry
    // ------------------------------------------------------------------

    /// Register a product with zero stock and cost.
    pub fn create_product(
        &mut self,
        name: &str,
        sku: &str,
        description: &str,
        units: Option<String>,
    ) -> Result<Product, LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::Validation(
                "product name cannot be empty".to_string(),
            ));
        }
        if sku.trim().is_empty() {
            return Err(LedgerError::Validation(
                "product SKU cannot be empty".to_string(),
            ));
        }
        if self.data.products.find_by_sku(sku).is_some() {
            return Err(LedgerError::DuplicateSku(sku.to_string()));
        }

        let product = Product::new(name, sku, description, units);
        self.data
            .products
            .insert(product.clone())
            .map_err(Self::internal)?;
        debug!(product = %product.id, %sku, "product registered");
        Ok(product)
    }

    /// Update a product's display fields.
    pub fn update_product(
        &mut self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, LedgerError> {
        let mut product = self
            .data
            .products
            .get(id)
            .ok_or(LedgerError::ProductNotFound(id))?
            .clone();

        if let Some(sku) = &patch.sku {
            if sku.trim().is_empty() {
                return Err(LedgerError::Validation(
                    "product SKU cannot be empty".to_string(),
                ));
            }
            if let Some(existing) = self.data.products.find_by_sku(sku) {
                if existing.id != id {
                    return Err(LedgerError::DuplicateSku(sku.clone()));
                }
            }
            product.sku = sku.clone();
        }
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(LedgerError::Validation(
                    "product name cannot be empty".to_string(),
                ));
            }
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(units) = patch.units {
            product.units = units;
        }
        product.updated_at = chrono::Utc::now();

        self.data
            .products
            .replace(product.clone())
            .map_err(Self::internal)?;
        Ok(product)
    }

    /// Delete a product.
    ///
    /// Allowed only while the product owns zero lots and zero withdrawals.
    pub fn delete_product(&mut self, id: ProductId) -> Result<(), LedgerError> {
        if self.data.products.get(id).is_none() {
            return Err(LedgerError::ProductNotFound(id));
        }
        if self.data.lots.has_for_product(id) || self.data.outputs.has_for_product(id) {
            return Err(LedgerError::ProductInUse(id));
        }
        self.data.products.remove(id).map_err(Self::internal)?;
        debug!(product = %id, "product deleted");
        Ok(())
    }

    /// Look up a product.
    pub fn product(&self, id: ProductId) -> Result<&Product, LedgerError> {
        self.data
            .products
            .get(id)
            .ok_or(LedgerError::ProductNotFound(id))
    }

    /// All products, sorted by name.
    #[must_use]
    pub fn products(&self) -> Vec<&Product> {
        self.data.products.all()
    }

    // ------------------------------------------------------------------
    // Stock entries (lots)
    // ------------------------------------------------------------------

    /// Receive stock: create a lot with `remaining_quantity = quantity`,
    /// journal the event and revalue the product.
    pub fn add_entry(
        &mut self,
        product_id: ProductId,
        quantity: Decimal,
        unit_price: Decimal,
        entry_date: NaiveDate,
        notes: Option<String>,
    ) -> Result<StockEntry, LedgerError> {
        self.product(product_id)?;
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::Validation(
                "entry quantity must be positive".to_string(),
            ));
        }
        if unit_price < Decimal::ZERO {
            return Err(LedgerError::Validation(
                "unit price cannot be negative".to_string(),
            ));
        }

        let entry = StockEntry::new(product_id, quantity, unit_price, entry_date, notes);
        self.data
            .lots
            .insert(entry.clone())
            .map_err(Self::internal)?;
        self.data.journal.record(Transaction::for_entry(&entry));
        self.revalue(product_id)?;
        debug!(product = %product_id, lot = %entry.id, %quantity, "stock received");
        Ok(entry)
    }

    /// Edit a lot.
    ///
    /// The quantity may shrink only down to what withdrawals have already
    /// consumed; the remaining quantity is recomputed from the difference.
    pub fn update_entry(
        &mut self,
        id: EntryId,
        patch: EntryPatch,
    ) -> Result<StockEntry, LedgerError> {
        let mut entry = self
            .data
            .lots
            .get(id)
            .ok_or(LedgerError::EntryNotFound(id))?
            .clone();

        if let Some(quantity) = patch.quantity {
            if quantity <= Decimal::ZERO {
                return Err(LedgerError::Validation(
                    "entry quantity must be positive".to_string(),
                ));
            }
            let consumed = entry.consumed();
            if quantity < consumed {
                return Err(LedgerError::ConsumedQuantity {
                    id,
                    requested: quantity,
                    consumed,
                });
            }
            entry.quantity = quantity;
            entry.remaining_quantity = quantity - consumed;
        }
        if let Some(unit_price) = patch.unit_price {
            if unit_price < Decimal::ZERO {
                return Err(LedgerError::Validation(
                    "unit price cannot be negative".to_string(),
                ));
            }
            entry.unit_price = unit_price;
        }
        if let Some(entry_date) = patch.entry_date {
            entry.entry_date = entry_date;
        }
        if let Some(notes) = patch.notes {
            entry.notes = notes;
        }

        self.data
            .lots
            .replace(entry.clone())
            .map_err(Self::internal)?;
        self.revalue(entry.product_id)?;
        Ok(entry)
    }

    /// Delete a lot. Allowed only while it is untouched.
    pub fn delete_entry(&mut self, id: EntryId) -> Result<(), LedgerError> {
        let entry = self
            .data
            .lots
            .get(id)
            .ok_or(LedgerError::EntryNotFound(id))?
            .clone();
        if !entry.is_untouched() {
            return Err(LedgerError::PartiallyConsumed {
                id,
                consumed: entry.consumed(),
                quantity: entry.quantity,
            });
        }

        self.data.lots.remove(id).map_err(Self::internal)?;
        self.data.journal.retract(id.as_uuid(), TxKind::Entry);
        self.revalue(entry.product_id)?;
        debug!(product = %entry.product_id, lot = %id, "stock entry deleted");
        Ok(())
    }

    /// Look up a lot.
    pub fn entry(&self, id: EntryId) -> Result<&StockEntry, LedgerError> {
        self.data.lots.get(id).ok_or(LedgerError::EntryNotFound(id))
    }

    /// A product's lots, entry date ascending.
    #[must_use]
    pub fn entries_for_product(&self, product_id: ProductId) -> Vec<&StockEntry> {
        self.data.lots.list_by_product(product_id)
    }

    // ------------------------------------------------------------------
    // Stock outputs (withdrawals)
    // ------------------------------------------------------------------

    /// Withdraw stock by FIFO lot consumption.
    ///
    /// Runs the allocation dry first; on success the output, its lines, the
    /// lot deltas and the journal row are applied together and the product
    /// is revalued. On [`LedgerError::InsufficientStock`] nothing is
    /// mutated.
    pub fn withdraw(
        &mut self,
        product_id: ProductId,
        quantity: Decimal,
        output_date: NaiveDate,
        reference_number: Option<String>,
        notes: Option<String>,
    ) -> Result<StockOutput, LedgerError> {
        self.product(product_id)?;
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::Validation(
                "withdrawal quantity must be positive".to_string(),
            ));
        }

        let allocation = allocate(self.data.lots.list_by_product(product_id), quantity)?;
        self.apply_output(
            OutputId::new(),
            product_id,
            &allocation,
            output_date,
            reference_number,
            notes,
        )
    }

    /// Apply a computed allocation as a new output under the given id.
    fn apply_output(
        &mut self,
        id: OutputId,
        product_id: ProductId,
        allocation: &Allocation,
        output_date: NaiveDate,
        reference_number: Option<String>,
        notes: Option<String>,
    ) -> Result<StockOutput, LedgerError> {
        let (output, lines) = StockOutput::from_allocation(
            id,
            product_id,
            allocation,
            output_date,
            reference_number,
            notes,
        );
        for line in &lines {
            self.data
                .lots
                .apply_delta(line.entry_id, -line.quantity)
                .map_err(Self::internal)?;
        }
        self.data
            .outputs
            .insert(output.clone(), lines)
            .map_err(Self::internal)?;
        self.data.journal.record(Transaction::for_output(&output));
        self.revalue(product_id)?;
        debug!(
            product = %product_id,
            output = %output.id,
            quantity = %output.total_quantity,
            cost = %output.total_cost,
            "stock withdrawn"
        );
        Ok(output)
    }

    /// Edit a withdrawal's metadata. Totals and allocation never change
    /// here; for a new quantity see [`Ledger::change_output_quantity`].
    pub fn update_output(
        &mut self,
        id: OutputId,
        patch: OutputPatch,
    ) -> Result<StockOutput, LedgerError> {
        let mut output = self
            .data
            .outputs
            .get(id)
            .ok_or(LedgerError::OutputNotFound(id))?
            .clone();

        if let Some(output_date) = patch.output_date {
            output.output_date = output_date;
        }
        if let Some(reference_number) = patch.reference_number {
            output.reference_number = reference_number;
        }
        if let Some(notes) = patch.notes {
            output.notes = notes;
        }

        self.data
            .outputs
            .replace(output.clone())
            .map_err(Self::internal)?;
        Ok(output)
    }

    /// Delete a withdrawal, restoring every consumed quantity onto its
    /// source lot. The restore is exact: lots end up as they were before
    /// the withdrawal.
    pub fn delete_output(&mut self, id: OutputId) -> Result<(), LedgerError> {
        if self.data.outputs.get(id).is_none() {
            return Err(LedgerError::OutputNotFound(id));
        }
        let (output, lines) = self.data.outputs.remove(id).map_err(Self::internal)?;
        for line in &lines {
            self.data
                .lots
                .apply_delta(line.entry_id, line.quantity)
                .map_err(Self::internal)?;
        }
        self.data.journal.retract(id.as_uuid(), TxKind::Output);
        self.revalue(output.product_id)?;
        debug!(
            product = %output.product_id,
            output = %id,
            quantity = %output.total_quantity,
            "withdrawal deleted, stock restored"
        );
        Ok(())
    }

    /// Change a withdrawal's quantity by replacing the record wholesale:
    /// the original allocation is restored, then a fresh FIFO allocation is
    /// applied under the same id, date, reference and notes.
    ///
    /// Availability after the hypothetical restore is checked before
    /// anything is mutated, so a failed call leaves the ledger untouched
    /// and the recreate step cannot run out of stock midway.
    pub fn change_output_quantity(
        &mut self,
        id: OutputId,
        new_quantity: Decimal,
    ) -> Result<StockOutput, LedgerError> {
        let output = self
            .data
            .outputs
            .get(id)
            .ok_or(LedgerError::OutputNotFound(id))?
            .clone();
        if new_quantity <= Decimal::ZERO {
            return Err(LedgerError::Validation(
                "withdrawal quantity must be positive".to_string(),
            ));
        }

        let on_hand: Decimal = self
            .data
            .lots
            .list_by_product(output.product_id)
            .iter()
            .map(|lot| lot.remaining_quantity)
            .sum();
        let available = on_hand + output.total_quantity;
        if new_quantity > available {
            return Err(LedgerError::InsufficientStock {
                requested: new_quantity,
                available,
            });
        }

        self.delete_output(id)?;
        let allocation = allocate(self.data.lots.list_by_product(output.product_id), new_quantity)
            .map_err(|err| LedgerError::Invariant(format!("recreate after restore failed: {err}")))?;
        self.apply_output(
            id,
            output.product_id,
            &allocation,
            output.output_date,
            output.reference_number,
            output.notes,
        )
    }

    /// Look up a withdrawal.
    pub fn output(&self, id: OutputId) -> Result<&StockOutput, LedgerError> {
        self.data
            .outputs
            .get(id)
            .ok_or(LedgerError::OutputNotFound(id))
    }

    /// A product's withdrawals, newest first.
    #[must_use]
    pub fn outputs_for_product(&self, product_id: ProductId) -> Vec<&StockOutput> {
        self.data.outputs.list_by_product(product_id)
    }

    /// The FIFO allocation detail of a withdrawal, in consumption order.
    pub fn lines_for_output(&self, id: OutputId) -> Result<&[StockOutputLine], LedgerError> {
        self.data
            .outputs
            .lines(id)
            .ok_or(LedgerError::OutputNotFound(id))
    }

    // ------------------------------------------------------------------
    // Journal reads
    // ------------------------------------------------------------------

    /// All journal rows, newest first.
    #[must_use]
    pub fn transactions(&self) -> Vec<&Transaction> {
        self.data.journal.all()
    }

    /// A product's journal rows, newest first.
    #[must_use]
    pub fn transactions_for_product(&self, product_id: ProductId) -> Vec<&Transaction> {
        self.data.journal.for_product(product_id)
    }

    // ------------------------------------------------------------------
    // Valuation
    // ------------------------------------------------------------------

    /// Recompute a product's derived stock and average cost from its lots.
    ///
    /// Runs automatically after every mutation that can change a lot's
    /// remaining quantity; calling it again is idempotent. Public for
    /// repair/backfill tooling only.
    pub fn revalue(&mut self, product_id: ProductId) -> Result<(), LedgerError> {
        let valuation = Valuation::of(self.data.lots.list_by_product(product_id));
        let mut product = self
            .data
            .products
            .get(product_id)
            .ok_or(LedgerError::ProductNotFound(product_id))?
            .clone();
        product.apply_valuation(&valuation);
        self.data.products.replace(product).map_err(Self::internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn ledger_with_product() -> (Ledger, ProductId) {
        let mut ledger = Ledger::new();
        let product = ledger
            .create_product("Arabica beans", "COF-001", "", Some("kg".to_string()))
            .unwrap();
        (ledger, product.id)
    }

    #[test]
    fn test_create_product_duplicate_sku() {
        let (mut ledger, _) = ledger_with_product();
        let err = ledger
            .create_product("Other beans", "COF-001", "", None)
            .unwrap_err();
        assert_eq!(err, LedgerError::DuplicateSku("COF-001".to_string()));
    }

    #[test]
    fn test_create_product_empty_name() {
        let mut ledger = Ledger::new();
        assert!(matches!(
            ledger.create_product("  ", "SKU", "", None),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn test_add_entry_validation() {
        let (mut ledger, product) = ledger_with_product();
        assert!(matches!(
            ledger.add_entry(product, dec!(0), dec!(1.00), date(1), None),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            ledger.add_entry(product, dec!(1), dec!(-0.01), date(1), None),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            ledger.add_entry(ProductId::new(), dec!(1), dec!(1.00), date(1), None),
            Err(LedgerError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_delete_product_in_use() {
        let (mut ledger, product) = ledger_with_product();
        ledger
            .add_entry(product, dec!(5), dec!(1.00), date(1), None)
            .unwrap();
        assert_eq!(
            ledger.delete_product(product).unwrap_err(),
            LedgerError::ProductInUse(product)
        );
    }

    #[test]
    fn test_delete_product_after_cleanup() {
        let (mut ledger, product) = ledger_with_product();
        let entry = ledger
            .add_entry(product, dec!(5), dec!(1.00), date(1), None)
            .unwrap();
        ledger.delete_entry(entry.id).unwrap();
        ledger.delete_product(product).unwrap();
        assert!(ledger.products().is_empty());
    }

    #[test]
    fn test_update_output_metadata_only() {
        let (mut ledger, product) = ledger_with_product();
        ledger
            .add_entry(product, dec!(10), dec!(2.00), date(1), None)
            .unwrap();
        let output = ledger
            .withdraw(product, dec!(4), date(2), None, None)
            .unwrap();

        let updated = ledger
            .update_output(
                output.id,
                OutputPatch {
                    output_date: Some(date(5)),
                    reference_number: Some(Some("SO-2".to_string())),
                    notes: None,
                },
            )
            .unwrap();

        assert_eq!(updated.output_date, date(5));
        assert_eq!(updated.reference_number.as_deref(), Some("SO-2"));
        // Totals untouched.
        assert_eq!(updated.total_quantity, dec!(4));
        assert_eq!(updated.total_cost, dec!(8.00));
    }

    #[test]
    fn test_revalue_missing_product() {
        let mut ledger = Ledger::new();
        assert!(matches!(
            ledger.revalue(ProductId::new()),
            Err(LedgerError::ProductNotFound(_))
        ));
    }
}
