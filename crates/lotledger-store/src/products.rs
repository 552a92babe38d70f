//! The product registry.

use std::collections::HashMap;

use lotledger_core::{Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Flat keyed collection of [`Product`] records.
///
/// SKU uniqueness is a ledger-service rule; the registry only offers the
/// lookup needed to enforce it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductStore {
    products: HashMap<ProductId, Product>,
}

impl ProductStore {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Find a product by SKU.
    #[must_use]
    pub fn find_by_sku(&self, sku: &str) -> Option<&Product> {
        self.products.values().find(|product| product.sku == sku)
    }

    /// All products, sorted by name for display.
    #[must_use]
    pub fn all(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.values().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    /// Register a product.
    pub fn insert(&mut self, product: Product) -> Result<(), StoreError> {
        if self.products.contains_key(&product.id) {
            return Err(StoreError::DuplicateId(product.id.as_uuid()));
        }
        self.products.insert(product.id, product);
        Ok(())
    }

    /// Replace an existing product record.
    pub fn replace(&mut self, product: Product) -> Result<(), StoreError> {
        match self.products.get_mut(&product.id) {
            Some(slot) => {
                *slot = product;
                Ok(())
            }
            None => Err(StoreError::NotFound(product.id.as_uuid())),
        }
    }

    /// Remove a product and return it.
    pub fn remove(&mut self, id: ProductId) -> Result<Product, StoreError> {
        self.products
            .remove(&id)
            .ok_or(StoreError::NotFound(id.as_uuid()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut store = ProductStore::new();
        let product = Product::new("Beans", "SKU-1", "", None);
        let id = product.id;

        store.insert(product).unwrap();
        assert_eq!(store.get(id).unwrap().sku, "SKU-1");

        store.remove(id).unwrap();
        assert!(store.get(id).is_none());
        assert!(matches!(store.remove(id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_find_by_sku() {
        let mut store = ProductStore::new();
        store
            .insert(Product::new("Beans", "SKU-1", "", None))
            .unwrap();

        assert!(store.find_by_sku("SKU-1").is_some());
        assert!(store.find_by_sku("SKU-2").is_none());
    }

    #[test]
    fn test_all_sorted_by_name() {
        let mut store = ProductStore::new();
        store
            .insert(Product::new("Zinc plates", "SKU-Z", "", None))
            .unwrap();
        store
            .insert(Product::new("Aluminium rods", "SKU-A", "", None))
            .unwrap();

        let names: Vec<&str> = store.all().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Aluminium rods", "Zinc plates"]);
    }

    #[test]
    fn test_replace_missing() {
        let mut store = ProductStore::new();
        let product = Product::new("Beans", "SKU-1", "", None);
        assert!(matches!(
            store.replace(product),
            Err(StoreError::NotFound(_))
        ));
    }
}
