//! `lotledger product` subcommands.

use anyhow::Result;
use clap::{Args, Subcommand};

use lotledger_core::ProductId;
use lotledger_ledger::{Ledger, ProductPatch};

/// Catalog management.
#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Register a new product.
    Add(AddArgs),
    /// List all products with their derived totals.
    List,
    /// Edit a product's display fields.
    Edit(EditArgs),
    /// Delete a product (only while it owns no stock history).
    Rm {
        /// Product id.
        id: ProductId,
    },
}

/// Arguments for `product add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Display name.
    #[arg(long)]
    pub name: String,
    /// Unique SKU code.
    #[arg(long)]
    pub sku: String,
    /// Free-form description.
    #[arg(long, default_value = "")]
    pub description: String,
    /// Unit label ("kg", "pcs", ...).
    #[arg(long)]
    pub units: Option<String>,
}

/// Arguments for `product edit`.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Product id.
    pub id: ProductId,
    /// New display name.
    #[arg(long)]
    pub name: Option<String>,
    /// New SKU code.
    #[arg(long)]
    pub sku: Option<String>,
    /// New description.
    #[arg(long)]
    pub description: Option<String>,
    /// New unit label.
    #[arg(long)]
    pub units: Option<String>,
}

/// Dispatch a product subcommand. Returns whether the ledger was mutated.
pub fn run(command: &ProductCommand, ledger: &mut Ledger) -> Result<bool> {
    match command {
        ProductCommand::Add(args) => {
            let product = ledger.create_product(
                &args.name,
                &args.sku,
                &args.description,
                args.units.clone(),
            )?;
            println!("registered product {} ({})", product.name, product.id);
            Ok(true)
        }
        ProductCommand::List => {
            for product in ledger.products() {
                let units = product.units.as_deref().unwrap_or("units");
                println!(
                    "{}  {:<24} {:<12} {} {} @ {}",
                    product.id,
                    product.name,
                    product.sku,
                    product.current_stock,
                    units,
                    product.average_cost.round_dp(4),
                );
            }
            Ok(false)
        }
        ProductCommand::Edit(args) => {
            let patch = ProductPatch {
                name: args.name.clone(),
                sku: args.sku.clone(),
                description: args.description.clone(),
                units: args.units.clone().map(Some),
            };
            let product = ledger.update_product(args.id, patch)?;
            println!("updated product {}", product.id);
            Ok(true)
        }
        ProductCommand::Rm { id } => {
            ledger.delete_product(*id)?;
            println!("deleted product {id}");
            Ok(true)
        }
    }
}
