//! Snapshot persistence round-trip tests.

use chrono::NaiveDate;
use lotledger_core::{allocate, Product, ProductId, StockEntry, StockOutput, Transaction};
use lotledger_store::{Dataset, SnapshotError};
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
}

fn populated_dataset() -> (Dataset, ProductId) {
    let mut data = Dataset::default();

    let product = Product::new("Arabica beans", "COF-001", "Single origin", Some("kg".into()));
    let product_id = product.id;
    data.products.insert(product).unwrap();

    let older = StockEntry::new(product_id, dec!(80), dec!(5.00), date(1), None);
    let newer = StockEntry::new(product_id, dec!(50), dec!(5.50), date(9), None);
    data.journal.record(Transaction::for_entry(&older));
    data.journal.record(Transaction::for_entry(&newer));
    data.lots.insert(older.clone()).unwrap();
    data.lots.insert(newer).unwrap();

    let allocation = allocate(data.lots.list_by_product(product_id), dec!(20)).unwrap();
    let (output, lines) = StockOutput::from_allocation(
        lotledger_core::OutputId::new(),
        product_id,
        &allocation,
        date(10),
        Some("SO-1".into()),
        None,
    );
    for line in &lines {
        data.lots.apply_delta(line.entry_id, -line.quantity).unwrap();
    }
    data.journal.record(Transaction::for_output(&output));
    data.outputs.insert(output, lines).unwrap();

    (data, product_id)
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");

    let (data, product_id) = populated_dataset();
    data.save(&path).unwrap();

    let loaded = Dataset::load(&path).unwrap();

    // Collections come back whole.
    assert_eq!(loaded.products.len(), 1);
    assert_eq!(loaded.lots.len(), 2);
    assert_eq!(loaded.outputs.len(), 1);
    assert_eq!(loaded.journal.len(), 3);

    // FIFO ordering survives the reload, consumption state included.
    let lots = loaded.lots.list_by_product(product_id);
    assert_eq!(lots[0].entry_date, date(1));
    assert_eq!(lots[0].remaining_quantity, dec!(60));
    assert_eq!(lots[1].remaining_quantity, dec!(50));

    // Output lines survive with frozen prices.
    let outputs = loaded.outputs.list_by_product(product_id);
    let lines = loaded.outputs.lines(outputs[0].id).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].unit_price, dec!(5.00));
}

#[test]
fn test_save_overwrites_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");

    let (data, _) = populated_dataset();
    data.save(&path).unwrap();
    data.save(&path).unwrap();

    let loaded = Dataset::load(&path).unwrap();
    assert_eq!(loaded.products.len(), 1);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_load_or_default_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.json");

    let data = Dataset::load_or_default(&path).unwrap();
    assert!(data.products.is_empty());
    assert!(data.lots.is_empty());
}

#[test]
fn test_load_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.json");

    assert!(matches!(
        Dataset::load(&path),
        Err(SnapshotError::Read { .. })
    ));
}

#[test]
fn test_load_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, b"{ not json").unwrap();

    assert!(matches!(
        Dataset::load(&path),
        Err(SnapshotError::Malformed { .. })
    ));
}
