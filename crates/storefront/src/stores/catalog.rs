//! Product catalog store.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use thiserror::Error;

use minimart_core::ProductId;

use crate::models::{Product, ProductDraft};

/// Errors from catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No product with the given ID exists.
    #[error("Product not found")]
    NotFound(ProductId),

    /// The requested quantity exceeds the product's stock.
    #[error("Not enough stock for {name}")]
    InsufficientStock { name: String },
}

#[derive(Debug, Default)]
struct CatalogState {
    products: Vec<Product>,
    next_id: u64,
}

/// In-memory product catalog.
///
/// Products are kept in insertion order. Stock never goes negative: every
/// decrement validates before it mutates.
#[derive(Debug)]
pub struct ProductCatalog {
    state: RwLock<CatalogState>,
}

impl ProductCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CatalogState {
                products: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a catalog seeded with the demo products.
    #[must_use]
    pub fn with_demo_data() -> Self {
        let products = vec![
            Product {
                id: ProductId::new("p1"),
                name: "Mechanical Keyboard".to_string(),
                description: "Premium mechanical keyboard with RGB lighting".to_string(),
                price: Decimal::new(12999, 2),
                image_url: "https://example.com/keyboard.jpg".to_string(),
                stock: 50,
            },
            Product {
                id: ProductId::new("p2"),
                name: "Wireless Mouse".to_string(),
                description: "Ergonomic wireless mouse with long battery life".to_string(),
                price: Decimal::new(4999, 2),
                image_url: "https://example.com/mouse.jpg".to_string(),
                stock: 100,
            },
            Product {
                id: ProductId::new("p3"),
                name: "Monitor Stand".to_string(),
                description: "Adjustable monitor stand for better ergonomics".to_string(),
                price: Decimal::new(7999, 2),
                image_url: "https://example.com/stand.jpg".to_string(),
                stock: 30,
            },
        ];
        let next_id = products.len() as u64 + 1;

        Self {
            state: RwLock::new(CatalogState { products, next_id }),
        }
    }

    /// List all products in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Product> {
        self.read().products.clone()
    }

    /// Look up a product by ID. No side effects.
    #[must_use]
    pub fn find_by_id(&self, id: &ProductId) -> Option<Product> {
        self.read().products.iter().find(|p| &p.id == id).cloned()
    }

    /// Insert a new product, assigning it a fresh ID.
    pub fn insert(&self, draft: ProductDraft) -> Product {
        let mut state = self.write();
        let id = ProductId::new(format!("p{}", state.next_id));
        state.next_id += 1;

        let product = Product {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image_url: draft.image_url,
            stock: draft.stock,
        };
        state.products.push(product.clone());
        product
    }

    /// Replace a product's fields, preserving its ID.
    ///
    /// Returns the updated product, or `None` if no such product exists.
    pub fn update(&self, id: &ProductId, draft: ProductDraft) -> Option<Product> {
        let mut state = self.write();
        let product = state.products.iter_mut().find(|p| &p.id == id)?;

        product.name = draft.name;
        product.description = draft.description;
        product.price = draft.price;
        product.image_url = draft.image_url;
        product.stock = draft.stock;
        Some(product.clone())
    }

    /// Remove a product from the catalog.
    ///
    /// Returns whether a product was removed. Past orders keep their own
    /// snapshots and are unaffected.
    pub fn remove(&self, id: &ProductId) -> bool {
        let mut state = self.write();
        let before = state.products.len();
        state.products.retain(|p| &p.id != id);
        state.products.len() < before
    }

    /// Decrement a single product's stock.
    ///
    /// Returns the remaining stock on success.
    ///
    /// # Errors
    ///
    /// `NotFound` if the product does not exist; `InsufficientStock` if
    /// `quantity` exceeds the current stock. Stock is untouched on error.
    pub fn decrement_stock(&self, id: &ProductId, quantity: u32) -> Result<u32, CatalogError> {
        let mut state = self.write();
        let product = state
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        if quantity > product.stock {
            return Err(CatalogError::InsufficientStock {
                name: product.name.clone(),
            });
        }
        product.stock -= quantity;
        Ok(product.stock)
    }

    /// Decrement stock for several products, all or nothing.
    ///
    /// Every line is validated before any stock is mutated, under a single
    /// write lock, so a failure on any line leaves every product's stock
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// `NotFound` if any line references a missing product;
    /// `InsufficientStock` if any line's quantity exceeds its product's
    /// stock.
    pub fn decrement_all(&self, lines: &[(ProductId, u32)]) -> Result<(), CatalogError> {
        let mut state = self.write();

        // Validation pass: reads only.
        for (id, quantity) in lines {
            let product = state
                .products
                .iter()
                .find(|p| &p.id == id)
                .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
            if *quantity > product.stock {
                return Err(CatalogError::InsufficientStock {
                    name: product.name.clone(),
                });
            }
        }

        // Commit pass: every line already validated.
        for (id, quantity) in lines {
            if let Some(product) = state.products.iter_mut().find(|p| &p.id == id) {
                product.stock -= quantity;
            }
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn draft(name: &str, price: Decimal, stock: u32) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: String::new(),
            price,
            image_url: String::new(),
            stock,
        }
    }

    #[test]
    fn test_demo_catalog_contents() {
        let catalog = ProductCatalog::with_demo_data();
        let products = catalog.list();
        assert_eq!(products.len(), 3);

        let keyboard = catalog.find_by_id(&ProductId::new("p1")).unwrap();
        assert_eq!(keyboard.name, "Mechanical Keyboard");
        assert_eq!(keyboard.price, dec!(129.99));
        assert_eq!(keyboard.stock, 50);
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let catalog = ProductCatalog::with_demo_data();
        let first = catalog.insert(draft("Webcam", dec!(59.99), 10));
        let second = catalog.insert(draft("Desk Mat", dec!(19.99), 25));
        assert_eq!(first.id, ProductId::new("p4"));
        assert_eq!(second.id, ProductId::new("p5"));
    }

    #[test]
    fn test_ids_survive_deletes() {
        let catalog = ProductCatalog::new();
        let first = catalog.insert(draft("A", dec!(1.00), 1));
        assert!(catalog.remove(&first.id));

        // Counter does not reuse the freed slot.
        let second = catalog.insert(draft("B", dec!(2.00), 1));
        assert_eq!(second.id, ProductId::new("p2"));
    }

    #[test]
    fn test_update_preserves_id() {
        let catalog = ProductCatalog::with_demo_data();
        let updated = catalog
            .update(&ProductId::new("p2"), draft("Wired Mouse", dec!(29.99), 40))
            .unwrap();
        assert_eq!(updated.id, ProductId::new("p2"));
        assert_eq!(updated.name, "Wired Mouse");
        assert_eq!(updated.stock, 40);

        assert!(
            catalog
                .update(&ProductId::new("p99"), draft("x", dec!(1.00), 1))
                .is_none()
        );
    }

    #[test]
    fn test_decrement_stock() {
        let catalog = ProductCatalog::with_demo_data();
        let remaining = catalog
            .decrement_stock(&ProductId::new("p1"), 2)
            .unwrap();
        assert_eq!(remaining, 48);
    }

    #[test]
    fn test_decrement_stock_insufficient() {
        let catalog = ProductCatalog::with_demo_data();
        let err = catalog
            .decrement_stock(&ProductId::new("p3"), 31)
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::InsufficientStock {
                name: "Monitor Stand".to_string()
            }
        );
        // Stock untouched on failure.
        assert_eq!(catalog.find_by_id(&ProductId::new("p3")).unwrap().stock, 30);
    }

    #[test]
    fn test_decrement_stock_not_found() {
        let catalog = ProductCatalog::new();
        let err = catalog
            .decrement_stock(&ProductId::new("p1"), 1)
            .unwrap_err();
        assert_eq!(err, CatalogError::NotFound(ProductId::new("p1")));
    }

    #[test]
    fn test_decrement_all_is_all_or_nothing() {
        let catalog = ProductCatalog::with_demo_data();
        let lines = vec![
            (ProductId::new("p1"), 2),
            (ProductId::new("p3"), 31), // exceeds stock of 30
        ];

        let err = catalog.decrement_all(&lines).unwrap_err();
        assert!(matches!(err, CatalogError::InsufficientStock { .. }));

        // First line validated fine, but nothing was decremented.
        assert_eq!(catalog.find_by_id(&ProductId::new("p1")).unwrap().stock, 50);
        assert_eq!(catalog.find_by_id(&ProductId::new("p3")).unwrap().stock, 30);
    }

    #[test]
    fn test_decrement_all_success() {
        let catalog = ProductCatalog::with_demo_data();
        let lines = vec![(ProductId::new("p1"), 2), (ProductId::new("p2"), 5)];

        catalog.decrement_all(&lines).unwrap();
        assert_eq!(catalog.find_by_id(&ProductId::new("p1")).unwrap().stock, 48);
        assert_eq!(catalog.find_by_id(&ProductId::new("p2")).unwrap().stock, 95);
    }

    #[test]
    fn test_insufficient_stock_message_names_product() {
        let err = CatalogError::InsufficientStock {
            name: "Monitor Stand".to_string(),
        };
        assert_eq!(err.to_string(), "Not enough stock for Monitor Stand");
    }
}
