//! Keyed collections backing the stock ledger.
//!
//! This crate holds the four entity collections and their persistence:
//!
//! - [`LotStore`] - stock entries (lots), orderable for FIFO allocation
//! - [`ProductStore`] - the product registry
//! - [`OutputStore`] - withdrawals with exclusively-owned allocation lines
//! - [`Journal`] - the append/retract transaction log
//! - [`Dataset`] - all four together, loadable from / savable to a JSON
//!   snapshot file
//!
//! Stores hold data and enforce only their own local invariants (id
//! uniqueness, lot quantity bounds). Cross-entity rules - consumption
//! guards, cascade restores, revaluation - belong to the ledger service,
//! which owns these collections and is their only mutator.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod journal;
pub mod lots;
pub mod outputs;
pub mod products;
pub mod snapshot;

pub use journal::Journal;
pub use lots::LotStore;
pub use outputs::OutputStore;
pub use products::ProductStore;
pub use snapshot::{Dataset, SnapshotError};

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the collections themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An insert collided with an existing id. Should not occur under
    /// correct id generation.
    #[error("duplicate id: {0}")]
    DuplicateId(Uuid),

    /// The requested id is not in the collection.
    #[error("not found: {0}")]
    NotFound(Uuid),

    /// A mutation would leave a lot's remaining quantity outside
    /// `[0, quantity]`. Indicates a bug in the caller, not bad user input.
    #[error(
        "lot {id}: remaining quantity {attempted} outside [0, {quantity}]"
    )]
    InvariantViolation {
        /// The lot whose bounds would be violated.
        id: Uuid,
        /// The lot's original quantity (upper bound).
        quantity: Decimal,
        /// The remaining quantity the mutation attempted to set.
        attempted: Decimal,
    },
}
