//! Ledger error kinds.

use lotledger_core::{AllocationError, Decimal, EntryId, OutputId, ProductId};
use thiserror::Error;

/// Errors returned by ledger operations.
///
/// All kinds are returned to the immediate caller as distinguishable values
/// and never swallowed; the ledger performs no automatic retry. A failed
/// multi-step operation leaves the ledger exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Bad input: non-positive quantity, negative price, empty name/SKU.
    #[error("{0}")]
    Validation(String),

    /// The product's live lots cannot cover the requested withdrawal.
    /// Carries the available total for a precise user-facing message.
    #[error("insufficient stock: requested {requested}, only {available} available")]
    InsufficientStock {
        /// Quantity that was requested.
        requested: Decimal,
        /// Total remaining quantity across the product's lots.
        available: Decimal,
    },

    /// Deletion blocked: withdrawals have already consumed from this lot.
    #[error("lot {id} has already been drawn on: {consumed} of {quantity} consumed")]
    PartiallyConsumed {
        /// The lot.
        id: EntryId,
        /// How much has been consumed.
        consumed: Decimal,
        /// The lot's original quantity.
        quantity: Decimal,
    },

    /// Shrink blocked: the new quantity is below what withdrawals already
    /// consumed from this lot.
    #[error("cannot shrink lot {id} to {requested}: {consumed} already consumed")]
    ConsumedQuantity {
        /// The lot.
        id: EntryId,
        /// The rejected new quantity.
        requested: Decimal,
        /// How much has been consumed.
        consumed: Decimal,
    },

    /// Unknown product id.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Unknown stock entry id.
    #[error("stock entry not found: {0}")]
    EntryNotFound(EntryId),

    /// Unknown stock output id.
    #[error("stock output not found: {0}")]
    OutputNotFound(OutputId),

    /// Another product already carries this SKU.
    #[error("a product with SKU `{0}` already exists")]
    DuplicateSku(String),

    /// Deletion blocked: the product still owns lots or withdrawals.
    #[error("product {0} still owns stock entries or withdrawals")]
    ProductInUse(ProductId),

    /// An internal consistency check failed. Unreachable under correct call
    /// discipline; raised, it indicates a bug rather than bad input.
    #[error("ledger invariant violated: {0}")]
    Invariant(String),
}

impl From<AllocationError> for LedgerError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::InsufficientStock {
                requested,
                available,
            } => Self::InsufficientStock {
                requested,
                available,
            },
        }
    }
}
