//! `lotledger entry` subcommands.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use lotledger_core::{EntryId, ProductId};
use lotledger_ledger::{EntryPatch, Ledger};

/// Stock-entry (lot) management.
#[derive(Debug, Subcommand)]
pub enum EntryCommand {
    /// Receive stock into a new lot.
    Add(AddArgs),
    /// List a product's lots in FIFO order.
    List {
        /// Product id.
        product: ProductId,
    },
    /// Edit a lot. Its quantity can shrink only down to what withdrawals
    /// have already consumed.
    Edit(EditArgs),
    /// Delete a lot (only while untouched by withdrawals).
    Rm {
        /// Entry id.
        id: EntryId,
    },
}

/// Arguments for `entry add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Product id.
    pub product: ProductId,
    /// Received quantity.
    #[arg(long)]
    pub quantity: Decimal,
    /// Unit price (the lot's cost basis).
    #[arg(long)]
    pub price: Decimal,
    /// Receipt date (YYYY-MM-DD), the FIFO ordering key.
    #[arg(long)]
    pub date: NaiveDate,
    /// Free-form notes.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for `entry edit`.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Entry id.
    pub id: EntryId,
    /// New original quantity.
    #[arg(long)]
    pub quantity: Option<Decimal>,
    /// New unit price.
    #[arg(long)]
    pub price: Option<Decimal>,
    /// New receipt date (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// New notes.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Dispatch an entry subcommand. Returns whether the ledger was mutated.
pub fn run(command: &EntryCommand, ledger: &mut Ledger) -> Result<bool> {
    match command {
        EntryCommand::Add(args) => {
            let entry = ledger.add_entry(
                args.product,
                args.quantity,
                args.price,
                args.date,
                args.notes.clone(),
            )?;
            println!(
                "received {} @ {} into lot {}",
                entry.quantity, entry.unit_price, entry.id
            );
            Ok(true)
        }
        EntryCommand::List { product } => {
            for lot in ledger.entries_for_product(*product) {
                println!(
                    "{}  {}  {:>12} of {:>12} left @ {}  [{:?}]",
                    lot.id,
                    lot.entry_date,
                    lot.remaining_quantity,
                    lot.quantity,
                    lot.unit_price,
                    lot.state(),
                );
            }
            Ok(false)
        }
        EntryCommand::Edit(args) => {
            let patch = EntryPatch {
                quantity: args.quantity,
                unit_price: args.price,
                entry_date: args.date,
                notes: args.notes.clone().map(Some),
            };
            let entry = ledger.update_entry(args.id, patch)?;
            println!(
                "updated lot {}: {} of {} remaining",
                entry.id, entry.remaining_quantity, entry.quantity
            );
            Ok(true)
        }
        EntryCommand::Rm { id } => {
            ledger.delete_entry(*id)?;
            println!("deleted lot {id}");
            Ok(true)
        }
    }
}
