//! # Sales Commands
//!
//! The draft invoice and the saved-invoice browser.
//!
//! ## Invoice Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│  Draft   │────►│ Preview  │────►│  Saved   │       │
//! │  │  draft   │     │  lines   │     │ + totals │     │ invoice  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                 add_to_invoice                    save_invoice          │
//! │                 remove_invoice_item               (stock decremented    │
//! │                 clear_invoice                      in the same write)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use dukkan_core::invoice::{next_invoice_id, InvoiceDraft, InvoiceTotals, Page};
use dukkan_core::{CoreError, Invoice, InvoiceItem, Money};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{failed, notify_success};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::state::{DbState, DraftState};

/// The draft as the sales screen shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub items: Vec<InvoiceItem>,
    pub total: Money,
}

impl DraftView {
    pub fn new(draft: &InvoiceDraft) -> Self {
        DraftView {
            items: draft.items.clone(),
            total: draft.total(),
        }
    }
}

impl From<&InvoiceDraft> for DraftView {
    fn from(draft: &InvoiceDraft) -> Self {
        DraftView::new(draft)
    }
}

/// An invoice together with the tax breakdown printed under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceWithTotals {
    pub invoice: Invoice,
    pub totals: InvoiceTotals,
}

async fn with_totals(db: &DbState, invoice: Invoice) -> Result<InvoiceWithTotals, ApiError> {
    let settings = db.inner().settings().load().await?;
    let totals = InvoiceTotals::for_invoice(&invoice, settings.business_info.tax_rate());
    Ok(InvoiceWithTotals { invoice, totals })
}

// =============================================================================
// Draft
// =============================================================================

pub fn get_draft(draft: &DraftState) -> DraftView {
    debug!("get_draft command");
    draft.with_draft(DraftView::new)
}

/// Adds a product line to the draft.
///
/// ## Behavior
/// - Same product already on the draft: quantities merge, the line keeps its
///   price
/// - `price` defaults to the shelf price
/// - Under the default stock policy the merged quantity may not exceed what
///   is available
///
/// Nothing is persisted.
pub async fn add_to_invoice(
    db: &DbState,
    draft: &DraftState,
    config: &AppConfig,
    product_id: &str,
    quantity: i64,
    price: Option<Money>,
) -> Result<DraftView, ApiError> {
    debug!(product_id = %product_id, quantity, "add_to_invoice command");

    let product = match db.inner().products().require(product_id).await {
        Ok(p) => p,
        Err(e) => return Err(failed(db, "خطأ", e).await),
    };
    let price = price.unwrap_or(product.price);
    let result = draft.with_draft_mut(|d| {
        let merged = d.items.iter().any(|i| i.product_id == product.id);
        d.add(&product, quantity, price, config.stock_policy())
            .map(|_| (merged, DraftView::new(d)))
    });

    match result {
        Ok((merged, view)) => {
            let (title, message) = if merged {
                ("تم التحديث", format!("تم تحديث كمية {} في الفاتورة", product.name))
            } else {
                ("تمت الإضافة", format!("تمت إضافة {} إلى الفاتورة", product.name))
            };
            notify_success(db, title, &message).await;
            Ok(view)
        }
        Err(e) => Err(failed(db, "خطأ", e).await),
    }
}

pub fn remove_invoice_item(draft: &DraftState, index: usize) -> Result<DraftView, ApiError> {
    debug!(index, "remove_invoice_item command");
    draft.with_draft_mut(|d| {
        d.remove_at(index)?;
        Ok(DraftView::new(d))
    })
}

pub fn clear_invoice(draft: &DraftState) -> DraftView {
    debug!("clear_invoice command");
    draft.with_draft_mut(|d| {
        d.clear();
        DraftView::from(&*d)
    })
}

/// Unsaved invoice built from the draft, with the tax breakdown.
///
/// The id shown is provisional; the saved invoice gets its own.
pub async fn preview_invoice(
    db: &DbState,
    draft: &DraftState,
) -> Result<InvoiceWithTotals, ApiError> {
    debug!("preview_invoice command");
    let now = Utc::now();
    let invoice = draft
        .with_draft(|d| d.to_invoice(next_invoice_id(None, now.timestamp_millis()), now));
    match invoice {
        Ok(invoice) => with_totals(db, invoice).await,
        Err(e) => Err(failed(db, "خطأ", e).await),
    }
}

/// Persists the draft as an invoice and decrements stock.
///
/// ## Flow
/// ```text
/// snapshot draft ──► empty? ──yes──► VALIDATION_ERROR + error notification
///        │                            (no storage write)
///        ▼
/// save_sale (products + invoices, one transaction)
///        │ ok                           │ err
///        ▼                              ▼
/// clear draft if unchanged        draft kept, error notification
/// success notification
/// ```
pub async fn save_invoice(
    db: &DbState,
    draft: &DraftState,
    config: &AppConfig,
) -> Result<Invoice, ApiError> {
    debug!("save_invoice command");
    let snapshot = draft.snapshot();
    if snapshot.is_empty() {
        return Err(failed(db, "خطأ", CoreError::EmptyInvoice).await);
    }

    match db
        .inner()
        .invoices()
        .save_sale(&snapshot, config.stock_policy(), Utc::now())
        .await
    {
        Ok(invoice) => {
            if !draft.clear_if_unchanged(&snapshot) {
                info!(id = %invoice.id, "Draft changed during save; kept");
            }
            notify_success(db, "تم إنشاء الفاتورة", "تم حفظ الفاتورة بنجاح").await;
            Ok(invoice)
        }
        Err(e) => Err(failed(db, "خطأ", e).await),
    }
}

// =============================================================================
// Saved Invoices
// =============================================================================

pub async fn list_invoices(db: &DbState) -> Result<Vec<Invoice>, ApiError> {
    debug!("list_invoices command");
    Ok(db.inner().invoices().list().await?)
}

pub async fn get_invoice(db: &DbState, id: &str) -> Result<InvoiceWithTotals, ApiError> {
    debug!(id = %id, "get_invoice command");
    let invoice = db.inner().invoices().require(id).await?;
    with_totals(db, invoice).await
}

/// Matches id, date (`YYYY-MM-DD`), or total.
pub async fn search_invoices(db: &DbState, query: &str) -> Result<Vec<Invoice>, ApiError> {
    debug!(query = %query, "search_invoices command");
    Ok(db.inner().invoices().search(query).await?)
}

/// One page (numbered from 1) of the invoices matching `query`.
pub async fn invoice_page(
    db: &DbState,
    query: &str,
    page: usize,
) -> Result<Page<Invoice>, ApiError> {
    debug!(query = %query, page, "invoice_page command");
    Ok(db.inner().invoices().page(query, page).await?)
}

/// Removes a saved invoice. Stock is not put back.
pub async fn delete_invoice(db: &DbState, id: &str) -> Result<Invoice, ApiError> {
    debug!(id = %id, "delete_invoice command");
    match db.inner().invoices().delete(id).await {
        Ok(invoice) => {
            notify_success(db, "تم الحذف", "تم حذف الفاتورة بنجاح").await;
            Ok(invoice)
        }
        Err(e) => Err(failed(db, "خطأ في الحذف", e).await),
    }
}
