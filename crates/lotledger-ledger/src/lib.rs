//! The stock-ledger service.
//!
//! [`Ledger`] is the only component permitted to mutate the lot store, the
//! withdrawal collection and the journal. It enforces every cross-entity
//! rule:
//!
//! - withdrawals consume lots oldest-first and record the exact FIFO cost
//! - a lot that has been (partially) consumed can neither be deleted nor
//!   shrunk below what was used
//! - deleting a withdrawal restores exactly what it took
//! - a product's derived stock and average cost are recomputed after every
//!   mutation that can touch a lot's remaining quantity
//!
//! # Example
//!
//! ```
//! use lotledger_ledger::Ledger;
//! use rust_decimal_macros::dec;
//! use chrono::NaiveDate;
//!
//! let mut ledger = Ledger::new();
//! let date = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
//!
//! let beans = ledger.create_product("Arabica beans", "COF-001", "", None).unwrap();
//! ledger.add_entry(beans.id, dec!(80), dec!(5.00), date(1), None).unwrap();
//! ledger.add_entry(beans.id, dec!(50), dec!(5.50), date(9), None).unwrap();
//!
//! let output = ledger.withdraw(beans.id, dec!(100), date(10), None, None).unwrap();
//! assert_eq!(output.total_cost, dec!(510.00)); // 80*5.00 + 20*5.50
//!
//! let beans = ledger.product(beans.id).unwrap();
//! assert_eq!(beans.current_stock, dec!(30));
//! ```
//!
//! # Concurrency
//!
//! Every mutating operation is an allocate-then-apply (or delete-then-
//! restore) sequence that must not interleave with other mutations of the
//! same product. Methods take `&mut self`, so a single owner is serialized
//! by construction; for shared use, [`SharedLedger`] wraps the ledger in a
//! read-write lock that serializes all mutations while letting reads run
//! concurrently.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod patch;
mod service;
mod shared;

pub use error::LedgerError;
pub use patch::{EntryPatch, OutputPatch, ProductPatch};
pub use service::Ledger;
pub use shared::SharedLedger;
