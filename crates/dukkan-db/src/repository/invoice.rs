//! # Invoice Repository
//!
//! Saving a sale touches two keys. Both are written in one transaction:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         save_sale                                       │
//! │                                                                         │
//! │  draft empty? ──yes──► CoreError::EmptyInvoice   (nothing opened)       │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │    products  = load(inventory-products)                                 │
//! │    invoices  = load(sales-invoices)                                     │
//! │    id        = next_invoice_id(max id, now)                             │
//! │    apply_sale(products, items, policy) ──err──► ROLLBACK                │
//! │    invoices.push(invoice)                                               │
//! │    set both keys                                                        │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::keys;
use crate::store::KvStore;
use dukkan_core::inventory::{apply_sale, StockPolicy};
use dukkan_core::invoice::{matches_search, next_invoice_id, paginate, InvoiceDraft, Page};
use dukkan_core::validation::validate_search_query;
use dukkan_core::{CoreError, Invoice, Product, INVOICES_PER_PAGE};

#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    store: KvStore,
}

fn latest_id(invoices: &[Invoice]) -> Option<&str> {
    invoices
        .iter()
        .filter_map(|i| i.id.parse::<i64>().ok().map(|n| (n, i.id.as_str())))
        .max_by_key(|(n, _)| *n)
        .map(|(_, id)| id)
}

impl InvoiceRepository {
    pub fn new(store: KvStore) -> Self {
        InvoiceRepository { store }
    }

    /// All saved invoices in the order they were saved.
    pub async fn list(&self) -> DbResult<Vec<Invoice>> {
        Ok(self.store.get(keys::INVOICES, Vec::new()).await)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        let invoices = self.list().await?;
        Ok(invoices.into_iter().find(|i| i.id == id))
    }

    pub async fn require(&self, id: &str) -> DbResult<Invoice> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Invoice", id))
    }

    pub async fn count(&self) -> DbResult<usize> {
        Ok(self.list().await?.len())
    }

    /// Saves the draft as an invoice and takes its lines out of stock.
    ///
    /// ## Returns
    /// * `Ok(Invoice)` - saved, stock decremented
    /// * `Err(DbError::Rejected(CoreError::EmptyInvoice))` - nothing on the draft
    /// * `Err(DbError::Rejected(CoreError::InsufficientStock { .. }))` - strict
    ///   policy and a line exceeds what is available
    /// * `Err(DbError::Rejected(CoreError::ProductNotFound(_)))` - a line's
    ///   product was deleted after it was added
    pub async fn save_sale(
        &self,
        draft: &InvoiceDraft,
        policy: StockPolicy,
        now: DateTime<Utc>,
    ) -> DbResult<Invoice> {
        if draft.is_empty() {
            return Err(CoreError::EmptyInvoice.into());
        }
        debug!(lines = draft.len(), ?policy, "Saving sale");

        let mut tx = self.store.begin().await?;
        let mut products: Vec<Product> = tx.load(keys::PRODUCTS, Vec::new()).await?;
        let mut invoices: Vec<Invoice> = tx.load(keys::INVOICES, Vec::new()).await?;

        let id = next_invoice_id(latest_id(&invoices), now.timestamp_millis());
        let invoice = draft.to_invoice(id, now)?;
        apply_sale(&mut products, &invoice.items, policy)?;
        invoices.push(invoice.clone());

        tx.set(keys::PRODUCTS, &products).await?;
        tx.set(keys::INVOICES, &invoices).await?;
        tx.commit().await?;

        info!(id = %invoice.id, total = %invoice.total, "Invoice saved");
        Ok(invoice)
    }

    /// Removes a saved invoice. Stock is not restored.
    pub async fn delete(&self, id: &str) -> DbResult<Invoice> {
        debug!(id = %id, "Deleting invoice");

        let mut tx = self.store.begin().await?;
        let mut invoices: Vec<Invoice> = tx.load(keys::INVOICES, Vec::new()).await?;
        let idx = invoices
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| DbError::not_found("Invoice", id))?;
        let removed = invoices.remove(idx);

        tx.set(keys::INVOICES, &invoices).await?;
        tx.commit().await?;
        Ok(removed)
    }

    /// Invoices whose id, date (`YYYY-MM-DD`), or total contains `query`.
    pub async fn search(&self, query: &str) -> DbResult<Vec<Invoice>> {
        let query = validate_search_query(query)?;
        let invoices = self.list().await?;
        Ok(invoices
            .into_iter()
            .filter(|i| matches_search(i, &query))
            .collect())
    }

    /// One page of the search results, [`INVOICES_PER_PAGE`] per page.
    pub async fn page(&self, query: &str, page: usize) -> DbResult<Page<Invoice>> {
        let matches = self.search(query).await?;
        Ok(paginate(matches, page, INVOICES_PER_PAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::TimeZone;
    use dukkan_core::{Money, NewProduct};

    async fn db_with_charger() -> (Database, Product) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(NewProduct {
                barcode: "SCAN2829".to_string(),
                name: "شاحن".to_string(),
                quantity: 1500,
                price: Money::from_major(1200),
            })
            .await
            .unwrap();
        (db, product)
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sales_on_file_database() {
        let path =
            std::env::temp_dir().join(format!("dukkan-sales-{}.db", uuid::Uuid::new_v4()));
        let db = Database::new(DbConfig::new(&path).max_connections(8))
            .await
            .unwrap();
        let charger = db
            .products()
            .insert(NewProduct {
                barcode: "SCAN2829".to_string(),
                name: "شاحن".to_string(),
                quantity: 1000,
                price: Money::from_major(1200),
            })
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let db = db.clone();
            let charger = charger.clone();
            handles.push(tokio::spawn(async move {
                let mut draft = InvoiceDraft::new();
                draft
                    .add(&charger, 1, charger.price, StockPolicy::Strict)
                    .unwrap();
                db.invoices()
                    .save_sale(&draft, StockPolicy::Strict, Utc::now())
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let invoices = db.invoices().list().await.unwrap();
        assert_eq!(invoices.len(), 8);
        let mut ids: Vec<&str> = invoices.iter().map(|i| i.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);

        let charger = db.products().require(&charger.id).await.unwrap();
        assert_eq!(charger.available, 992);

        db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }

    #[tokio::test]
    async fn test_save_sale_decrements_stock() {
        let (db, charger) = db_with_charger().await;
        let mut draft = InvoiceDraft::new();
        draft
            .add(&charger, 2, Money::from_major(1200), StockPolicy::Strict)
            .unwrap();

        let invoice = db
            .invoices()
            .save_sale(&draft, StockPolicy::Strict, noon())
            .await
            .unwrap();

        assert_eq!(invoice.items[0].total, Money::from_major(2400));
        assert_eq!(invoice.total, Money::from_major(2400));
        assert_eq!(invoice.id, noon().timestamp_millis().to_string());

        let stored = db.products().require(&charger.id).await.unwrap();
        assert_eq!(stored.available, 1498);
        assert_eq!(db.invoices().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_draft_writes_nothing() {
        let (db, _) = db_with_charger().await;
        let before = db.store().keys().await.unwrap();

        let err = db
            .invoices()
            .save_sale(&InvoiceDraft::new(), StockPolicy::Strict, noon())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Rejected(CoreError::EmptyInvoice)));
        assert_eq!(db.store().keys().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_oversell_rolls_back_both_keys() {
        let (db, charger) = db_with_charger().await;
        let mut draft = InvoiceDraft::new();
        draft
            .add(&charger, 10, Money::from_major(1200), StockPolicy::Backorder)
            .unwrap();
        draft.items[0].set_quantity(2000);

        let err = db
            .invoices()
            .save_sale(&draft, StockPolicy::Strict, noon())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::Rejected(CoreError::InsufficientStock { requested: 2000, .. })
        ));
        assert_eq!(db.products().require(&charger.id).await.unwrap().available, 1500);
        assert_eq!(db.invoices().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_backorder_allows_negative_stock() {
        let (db, charger) = db_with_charger().await;
        let mut draft = InvoiceDraft::new();
        draft
            .add(&charger, 1600, Money::from_major(1200), StockPolicy::Backorder)
            .unwrap();

        db.invoices()
            .save_sale(&draft, StockPolicy::Backorder, noon())
            .await
            .unwrap();
        assert_eq!(db.products().require(&charger.id).await.unwrap().available, -100);
    }

    #[tokio::test]
    async fn test_ids_increase_within_same_millisecond() {
        let (db, charger) = db_with_charger().await;
        let mut draft = InvoiceDraft::new();
        draft
            .add(&charger, 1, Money::from_major(1200), StockPolicy::Strict)
            .unwrap();

        let first = db.invoices().save_sale(&draft, StockPolicy::Strict, noon()).await.unwrap();
        let second = db.invoices().save_sale(&draft, StockPolicy::Strict, noon()).await.unwrap();

        let a: i64 = first.id.parse().unwrap();
        let b: i64 = second.id.parse().unwrap();
        assert_eq!(b, a + 1);
    }

    #[tokio::test]
    async fn test_search_and_page() {
        let (db, charger) = db_with_charger().await;
        let mut draft = InvoiceDraft::new();
        draft
            .add(&charger, 1, Money::from_major(1200), StockPolicy::Strict)
            .unwrap();
        for _ in 0..7 {
            db.invoices().save_sale(&draft, StockPolicy::Strict, noon()).await.unwrap();
        }

        assert_eq!(db.invoices().search("2024-03-10").await.unwrap().len(), 7);
        assert_eq!(db.invoices().search("1200.00").await.unwrap().len(), 7);
        assert!(db.invoices().search("1999-01-01").await.unwrap().is_empty());

        let second = db.invoices().page("", 2).await.unwrap();
        assert_eq!(second.total_pages, 2);
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.total_items, 7);
    }

    #[tokio::test]
    async fn test_delete_invoice() {
        let (db, charger) = db_with_charger().await;
        let mut draft = InvoiceDraft::new();
        draft
            .add(&charger, 1, Money::from_major(1200), StockPolicy::Strict)
            .unwrap();
        let invoice = db.invoices().save_sale(&draft, StockPolicy::Strict, noon()).await.unwrap();

        db.invoices().delete(&invoice.id).await.unwrap();
        assert!(db.invoices().get_by_id(&invoice.id).await.unwrap().is_none());
        assert!(matches!(
            db.invoices().delete(&invoice.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }
}
