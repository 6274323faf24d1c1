//! # Product Repository
//!
//! The inventory lives under one key as a JSON array of products.
//!
//! ## Key Operations
//! - Insert / update with validation and barcode uniqueness
//! - Delete by id
//! - Substring search on name or barcode

use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::keys;
use crate::store::KvStore;
use dukkan_core::inventory::{ensure_unique_barcode, matches_search};
use dukkan_core::validation::{validate_new_product, validate_product_update, validate_search_query};
use dukkan_core::{NewProduct, Product, ProductUpdate};

/// Repository for inventory operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let charger = repo.insert(NewProduct { .. }).await?;
/// let found = repo.find_by_barcode("SCAN2829").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: KvStore,
}

impl ProductRepository {
    pub fn new(store: KvStore) -> Self {
        ProductRepository { store }
    }

    /// All products in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        Ok(self.store.get(keys::PRODUCTS, Vec::new()).await)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let products = self.list().await?;
        Ok(products.into_iter().find(|p| p.id == id))
    }

    /// Like [`get_by_id`](Self::get_by_id) but a missing product is an error.
    pub async fn require(&self, id: &str) -> DbResult<Product> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    pub async fn find_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        let barcode = barcode.trim();
        let products = self.list().await?;
        Ok(products.into_iter().find(|p| p.barcode == barcode))
    }

    /// Products whose name or barcode contains `query`, case-insensitive.
    /// An empty query returns everything.
    pub async fn search(&self, query: &str) -> DbResult<Vec<Product>> {
        let query = validate_search_query(query)?;
        debug!(query = %query, "Searching products");

        let products: Vec<Product> = self
            .list()
            .await?
            .into_iter()
            .filter(|p| matches_search(p, &query))
            .collect();

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    pub async fn count(&self) -> DbResult<usize> {
        Ok(self.list().await?.len())
    }

    /// Validates and appends a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the stored product with its generated id
    /// * `Err(DbError::UniqueViolation)` - barcode already in use
    /// * `Err(DbError::Rejected)` - input failed validation
    pub async fn insert(&self, input: NewProduct) -> DbResult<Product> {
        validate_new_product(&input)?;
        debug!(barcode = %input.barcode, "Inserting product");

        let mut tx = self.store.begin().await?;
        let mut products: Vec<Product> = tx.load(keys::PRODUCTS, Vec::new()).await?;
        ensure_unique_barcode(&products, &input.barcode, None)?;

        let product = Product::from_new(Uuid::new_v4().to_string(), input);
        products.push(product.clone());

        tx.set(keys::PRODUCTS, &products).await?;
        tx.commit().await?;

        debug!(id = %product.id, "Product inserted");
        Ok(product)
    }

    /// Replaces every editable field of product `id`.
    pub async fn update(&self, id: &str, input: ProductUpdate) -> DbResult<Product> {
        validate_product_update(&input)?;
        debug!(id = %id, "Updating product");

        let mut tx = self.store.begin().await?;
        let mut products: Vec<Product> = tx.load(keys::PRODUCTS, Vec::new()).await?;
        ensure_unique_barcode(&products, &input.barcode, Some(id))?;

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DbError::not_found("Product", id))?;
        product.barcode = input.barcode.trim().to_string();
        product.name = input.name.trim().to_string();
        product.quantity = input.quantity;
        product.price = input.price;
        product.available = input.available;
        let updated = product.clone();

        tx.set(keys::PRODUCTS, &products).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Removes product `id` and returns it. Saved invoices keep their copy
    /// of the name and barcode.
    pub async fn delete(&self, id: &str) -> DbResult<Product> {
        debug!(id = %id, "Deleting product");

        let mut tx = self.store.begin().await?;
        let mut products: Vec<Product> = tx.load(keys::PRODUCTS, Vec::new()).await?;
        let idx = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DbError::not_found("Product", id))?;
        let removed = products.remove(idx);

        tx.set(keys::PRODUCTS, &products).await?;
        tx.commit().await?;
        Ok(removed)
    }
}
