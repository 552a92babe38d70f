//! `lotledger withdraw` and `lotledger output` subcommands.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use lotledger_core::{OutputId, ProductId};
use lotledger_ledger::{Ledger, LedgerError, OutputPatch};

/// Arguments for `withdraw`.
#[derive(Debug, Args)]
pub struct WithdrawArgs {
    /// Product id.
    pub product: ProductId,
    /// Quantity to withdraw.
    #[arg(long)]
    pub quantity: Decimal,
    /// Withdrawal date (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,
    /// External reference (order number, ticket, ...).
    #[arg(long)]
    pub reference: Option<String>,
    /// Free-form notes.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Withdrawal management.
#[derive(Debug, Subcommand)]
pub enum OutputCommand {
    /// List a product's withdrawals, newest first.
    List {
        /// Product id.
        product: ProductId,
    },
    /// Show a withdrawal's FIFO allocation lines.
    Lines {
        /// Output id.
        id: OutputId,
    },
    /// Edit a withdrawal's metadata (never its totals or allocation).
    Edit(EditArgs),
    /// Change a withdrawal's quantity by replacing its allocation.
    SetQuantity {
        /// Output id.
        id: OutputId,
        /// The new quantity.
        quantity: Decimal,
    },
    /// Delete a withdrawal, returning the stock to its lots.
    Rm {
        /// Output id.
        id: OutputId,
    },
}

/// Arguments for `output edit`.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Output id.
    pub id: OutputId,
    /// New withdrawal date (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// New external reference.
    #[arg(long)]
    pub reference: Option<String>,
    /// New notes.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Run a withdrawal. Returns whether the ledger was mutated.
pub fn withdraw(args: &WithdrawArgs, ledger: &mut Ledger) -> Result<bool> {
    match ledger.withdraw(
        args.product,
        args.quantity,
        args.date,
        args.reference.clone(),
        args.notes.clone(),
    ) {
        Ok(output) => {
            println!(
                "withdrew {} at FIFO cost {} (output {})",
                output.total_quantity, output.total_cost, output.id
            );
            Ok(true)
        }
        Err(LedgerError::InsufficientStock { available, .. }) => {
            bail!("insufficient stock: only {available} available")
        }
        Err(err) => Err(err.into()),
    }
}

/// Dispatch an output subcommand. Returns whether the ledger was mutated.
pub fn run(command: &OutputCommand, ledger: &mut Ledger) -> Result<bool> {
    match command {
        OutputCommand::List { product } => {
            for output in ledger.outputs_for_product(*product) {
                let reference = output.reference_number.as_deref().unwrap_or("-");
                println!(
                    "{}  {}  {:>12} for {:>12}  ref {}",
                    output.id, output.output_date, output.total_quantity, output.total_cost, reference,
                );
            }
            Ok(false)
        }
        OutputCommand::Lines { id } => {
            for line in ledger.lines_for_output(*id)? {
                println!(
                    "lot {}  {:>12} @ {:>10} = {}",
                    line.entry_id,
                    line.quantity,
                    line.unit_price,
                    line.cost(),
                );
            }
            Ok(false)
        }
        OutputCommand::Edit(args) => {
            let patch = OutputPatch {
                output_date: args.date,
                reference_number: args.reference.clone().map(Some),
                notes: args.notes.clone().map(Some),
            };
            let output = ledger.update_output(args.id, patch)?;
            println!("updated output {}", output.id);
            Ok(true)
        }
        OutputCommand::SetQuantity { id, quantity } => {
            match ledger.change_output_quantity(*id, *quantity) {
                Ok(output) => {
                    println!(
                        "output {} now {} at FIFO cost {}",
                        output.id, output.total_quantity, output.total_cost
                    );
                    Ok(true)
                }
                Err(LedgerError::InsufficientStock { available, .. }) => {
                    bail!("insufficient stock: only {available} available (counting the restored withdrawal)")
                }
                Err(err) => Err(err.into()),
            }
        }
        OutputCommand::Rm { id } => {
            ledger.delete_output(*id)?;
            println!("deleted output {id}, stock returned to its lots");
            Ok(true)
        }
    }
}
