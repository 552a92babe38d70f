//! The output store: withdrawals and their allocation lines.

use std::collections::HashMap;

use lotledger_core::{OutputId, ProductId, StockOutput, StockOutputLine};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Collection of [`StockOutput`] records with exclusive ownership of their
/// [`StockOutputLine`] sets.
///
/// Lines enter and leave the store only together with their parent output;
/// they are never mutated independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputStore {
    outputs: HashMap<OutputId, StockOutput>,
    lines: HashMap<OutputId, Vec<StockOutputLine>>,
}

impl OutputStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of withdrawals held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Look up a withdrawal.
    #[must_use]
    pub fn get(&self, id: OutputId) -> Option<&StockOutput> {
        self.outputs.get(&id)
    }

    /// The FIFO allocation detail of a withdrawal, in consumption order.
    #[must_use]
    pub fn lines(&self, id: OutputId) -> Option<&[StockOutputLine]> {
        self.lines.get(&id).map(Vec::as_slice)
    }

    /// Insert a withdrawal together with its lines.
    pub fn insert(
        &mut self,
        output: StockOutput,
        lines: Vec<StockOutputLine>,
    ) -> Result<(), StoreError> {
        if self.outputs.contains_key(&output.id) {
            return Err(StoreError::DuplicateId(output.id.as_uuid()));
        }
        self.lines.insert(output.id, lines);
        self.outputs.insert(output.id, output);
        Ok(())
    }

    /// Replace a withdrawal record, leaving its lines untouched.
    ///
    /// Only metadata may differ; totals and allocation belong to the
    /// delete-and-recreate flow.
    pub fn replace(&mut self, output: StockOutput) -> Result<(), StoreError> {
        match self.outputs.get_mut(&output.id) {
            Some(slot) => {
                *slot = output;
                Ok(())
            }
            None => Err(StoreError::NotFound(output.id.as_uuid())),
        }
    }

    /// Remove a withdrawal and its lines together.
    pub fn remove(
        &mut self,
        id: OutputId,
    ) -> Result<(StockOutput, Vec<StockOutputLine>), StoreError> {
        let output = self
            .outputs
            .remove(&id)
            .ok_or(StoreError::NotFound(id.as_uuid()))?;
        let lines = self.lines.remove(&id).unwrap_or_default();
        Ok((output, lines))
    }

    /// All withdrawals for a product, newest first.
    #[must_use]
    pub fn list_by_product(&self, product_id: ProductId) -> Vec<&StockOutput> {
        let mut outputs: Vec<&StockOutput> = self
            .outputs
            .values()
            .filter(|output| output.product_id == product_id)
            .collect();
        outputs.sort_by(|a, b| b.output_date.cmp(&a.output_date));
        outputs
    }

    /// Whether any withdrawal belongs to the product.
    #[must_use]
    pub fn has_for_product(&self, product_id: ProductId) -> bool {
        self.outputs
            .values()
            .any(|output| output.product_id == product_id)
    }
}
