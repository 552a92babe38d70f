//! Shared-ledger wrapper for concurrent callers.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::service::Ledger;

/// A cloneable handle serializing access to one [`Ledger`].
///
/// Mutations take the write lock, so the allocate-then-apply and
/// delete-then-restore sequences never interleave - a strictly stronger
/// guarantee than the per-product serialization the ledger requires. Reads
/// (reports, catalog listings) share the read lock and run concurrently.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    /// Wrap a ledger for shared use.
    #[must_use]
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Run a read-only closure under the read lock.
    pub fn read<T>(&self, f: impl FnOnce(&Ledger) -> T) -> T {
        f(&self.inner.read())
    }

    /// Run a mutating closure under the write lock.
    pub fn write<T>(&self, f: impl FnOnce(&mut Ledger) -> T) -> T {
        f(&mut self.inner.write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_concurrent_withdrawals_conserve_stock() {
        let shared = SharedLedger::new(Ledger::new());
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let product = shared
            .write(|ledger| ledger.create_product("Beans", "SKU-1", "", None))
            .unwrap()
            .id;
        shared
            .write(|ledger| ledger.add_entry(product, dec!(100), dec!(2.00), date, None))
            .unwrap();

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    shared
                        .write(|ledger| ledger.withdraw(product, dec!(5), date, None, None))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        shared.read(|ledger| {
            let on_hand: Decimal = ledger
                .entries_for_product(product)
                .iter()
                .map(|lot| lot.remaining_quantity)
                .sum();
            assert_eq!(on_hand, dec!(50));
            assert_eq!(ledger.product(product).unwrap().current_stock, dec!(50));
        });
    }
}
