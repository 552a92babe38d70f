//! `lotledger report` subcommands.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;

use lotledger_core::ProductId;
use lotledger_ledger::Ledger;
use lotledger_query::{fifo_trail, movements, stock_summary};

/// Read-only reports.
#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Per-product on-hand stock and valuation.
    Stock,
    /// Journal movements, newest first.
    Movements {
        /// Include movements on or after this date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Include movements on or before this date (YYYY-MM-DD).
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// A product's FIFO audit trail: each withdrawal with its per-lot split.
    Trail {
        /// Product id.
        product: ProductId,
    },
}

/// Dispatch a report subcommand. Reports never mutate the ledger.
pub fn run(command: &ReportCommand, ledger: &Ledger) -> Result<bool> {
    match command {
        ReportCommand::Stock => {
            for row in stock_summary(ledger) {
                let units = row.units.as_deref().unwrap_or("units");
                println!(
                    "{:<24} {:<12} {:>12} {}  avg {:>10}  value {}",
                    row.name,
                    row.sku,
                    row.current_stock,
                    units,
                    row.average_cost.round_dp(4),
                    row.stock_value.round_dp(2),
                );
            }
        }
        ReportCommand::Movements { from, to } => {
            for movement in movements(ledger, *from, *to) {
                println!(
                    "{}  {}  {:<24} {:>12}",
                    movement.date, movement.kind, movement.product_name, movement.quantity,
                );
            }
        }
        ReportCommand::Trail { product } => {
            for trail in fifo_trail(ledger, *product)? {
                let reference = trail.reference_number.as_deref().unwrap_or("-");
                println!(
                    "{}  output {}  {} for {}  ref {}",
                    trail.output_date, trail.output_id, trail.total_quantity, trail.total_cost, reference,
                );
                for line in &trail.lines {
                    println!(
                        "    {}  lot {}  {} @ {} = {}",
                        line.entry_date, line.entry_id, line.quantity, line.unit_price, line.cost,
                    );
                }
            }
        }
    }
    Ok(false)
}
