//! Command-line argument parsing and dispatch.

pub mod entry;
pub mod output;
pub mod product;
pub mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use lotledger_ledger::Ledger;
use lotledger_store::Dataset;

/// FIFO inventory ledger.
#[derive(Debug, Parser)]
#[command(name = "lotledger", version, about)]
pub struct Cli {
    /// Path of the ledger snapshot file.
    #[arg(long, global = true, default_value = "lotledger.json")]
    pub file: PathBuf,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage the product catalog.
    #[command(subcommand)]
    Product(product::ProductCommand),
    /// Manage stock entries (receipt lots).
    #[command(subcommand)]
    Entry(entry::EntryCommand),
    /// Withdraw stock by FIFO lot consumption.
    Withdraw(output::WithdrawArgs),
    /// Manage stock withdrawals.
    #[command(subcommand)]
    Output(output::OutputCommand),
    /// Read-only reports.
    #[command(subcommand)]
    Report(report::ReportCommand),
}

/// Main entry point for the `lotledger` binary.
pub fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_span_events(FmtSpan::CLOSE)
            .init();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let data = Dataset::load_or_default(&cli.file)?;
    let mut ledger = Ledger::with_dataset(data);

    let mutated = match &cli.command {
        Command::Product(command) => product::run(command, &mut ledger)?,
        Command::Entry(command) => entry::run(command, &mut ledger)?,
        Command::Withdraw(args) => output::withdraw(args, &mut ledger)?,
        Command::Output(command) => output::run(command, &mut ledger)?,
        Command::Report(command) => report::run(command, &ledger)?,
    };

    if mutated {
        ledger.dataset().save(&cli.file)?;
    }
    Ok(())
}
