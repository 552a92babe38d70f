//! Lotledger CLI.
//!
//! The reference consumer of the stock-ledger library: a single `lotledger`
//! binary operating on a JSON snapshot file.
//!
//! # Example Usage
//!
//! ```bash
//! lotledger product add --name "Arabica beans" --sku COF-001 --units kg
//! lotledger entry add <product-id> --quantity 80 --price 5.00 --date 2024-03-01
//! lotledger withdraw <product-id> --quantity 20 --date 2024-03-10
//! lotledger report stock
//! lotledger report trail <product-id>
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
