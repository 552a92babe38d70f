//! Core types for lotledger
//!
//! This crate provides the fundamental types used throughout the lotledger
//! project:
//!
//! - [`Product`] - A tracked product with derived stock and average cost
//! - [`StockEntry`] - One receipt lot: a quantity bought at a fixed unit price
//! - [`StockOutput`] / [`StockOutputLine`] - A withdrawal and its per-lot split
//! - [`Transaction`] - A journal row documenting an entry or output event
//! - [`allocate`] - The pure FIFO allocation walk
//! - [`Valuation`] - Weighted-average cost recomputed from live lots
//!
//! # Example
//!
//! ```
//! use lotledger_core::{allocate, ProductId, StockEntry, Valuation};
//! use rust_decimal_macros::dec;
//! use chrono::NaiveDate;
//!
//! let product = ProductId::new();
//! let date = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
//!
//! let lots = vec![
//!     StockEntry::new(product, dec!(80), dec!(5.00), date(1), None),
//!     StockEntry::new(product, dec!(50), dec!(5.50), date(9), None),
//! ];
//!
//! // Withdraw 100 units: 80 from the March 1 lot, 20 from the March 9 lot.
//! let allocation = allocate(&lots, dec!(100)).unwrap();
//! assert_eq!(allocation.lines.len(), 2);
//! assert_eq!(allocation.total_cost, dec!(510.00)); // 80*5.00 + 20*5.50
//!
//! // Valuation is a pure fold over the surviving lots.
//! let valuation = Valuation::of(&lots);
//! assert_eq!(valuation.current_stock, dec!(130));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod allocate;
pub mod entry;
pub mod id;
pub mod output;
pub mod product;
pub mod transaction;
pub mod valuation;

pub use allocate::{allocate, Allocation, AllocationError, AllocationLine};
pub use entry::{LotState, StockEntry};
pub use id::{EntryId, LineId, OutputId, ProductId, TxId};
pub use output::{StockOutput, StockOutputLine};
pub use product::Product;
pub use transaction::{Transaction, TxKind};
pub use valuation::Valuation;

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
