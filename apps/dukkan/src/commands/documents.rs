//! # Document Commands
//!
//! Export to the configured directory, or hand back print-ready HTML.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  export_invoice(id)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load invoice + settings ──► invoice_document ──► Exporter::export      │
//! │                                                        │                │
//! │                          ┌─────────────────────────────┴──────┐         │
//! │                          ▼ ok                                 ▼ err     │
//! │             "تم التحضير" notification          "فشل التصدير" notification │
//! │             ExportResult { path, fileName }     ApiError, no file left  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use chrono::Utc;
use dukkan_core::report::{InventoryReport, ProductReport};
use dukkan_docs::{
    inventory_document, invoice_document, product_document, statement_document, Document,
};
use serde::Serialize;
use tracing::debug;

use super::{failed, notify_success};
use crate::error::ApiError;
use crate::state::{DbState, ExportState};

const EXPORT_FAILED: &str = "فشل التصدير";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub path: PathBuf,
    pub file_name: String,
}

/// HTML with print styles, for a platform print dialog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintView {
    pub title: String,
    pub html: String,
}

impl From<&Document> for PrintView {
    fn from(doc: &Document) -> Self {
        PrintView {
            title: doc.title.clone(),
            html: doc.print_view(),
        }
    }
}

// =============================================================================
// Builders
// =============================================================================

async fn build_invoice(db: &DbState, id: &str) -> Result<Document, ApiError> {
    let invoice = db.inner().invoices().require(id).await?;
    let settings = db.inner().settings().load().await?;
    Ok(invoice_document(&invoice, &settings.business_info))
}

async fn build_statement(db: &DbState, debtor_id: &str) -> Result<Document, ApiError> {
    let statement = db.inner().debts().statement(debtor_id).await?;
    let settings = db.inner().settings().load().await?;
    Ok(statement_document(&statement, &settings.business_info, Utc::now()))
}

async fn build_inventory(db: &DbState) -> Result<Document, ApiError> {
    let products = db.inner().products().list().await?;
    if products.is_empty() {
        return Err(ApiError::validation("لا يمكن إنشاء تقرير بدون منتجات"));
    }
    let report = InventoryReport::from_products(&products);
    Ok(inventory_document(&report, Utc::now()))
}

async fn build_product(db: &DbState, product_id: &str) -> Result<Document, ApiError> {
    let product = db.inner().products().require(product_id).await?;
    let invoices = db.inner().invoices().list().await?;
    let report = ProductReport::build(product, &invoices);
    Ok(product_document(&report, Utc::now()))
}

/// Writes `built` through the exporter and records the outcome.
async fn export(
    db: &DbState,
    exporter: &ExportState,
    built: Result<Document, ApiError>,
) -> Result<ExportResult, ApiError> {
    let document = match built {
        Ok(doc) => doc,
        Err(e) => return Err(failed(db, EXPORT_FAILED, e).await),
    };

    match exporter.inner().export(&document).await {
        Ok(path) => {
            let file_name = exporter.inner().file_name(&document);
            notify_success(db, "تم التحضير", &format!("تم حفظ {}", file_name)).await;
            Ok(ExportResult { path, file_name })
        }
        Err(e) => Err(failed(db, EXPORT_FAILED, e).await),
    }
}

// =============================================================================
// Export
// =============================================================================

/// `invoice-<id>.pdf` in the export directory.
pub async fn export_invoice(
    db: &DbState,
    exporter: &ExportState,
    id: &str,
) -> Result<ExportResult, ApiError> {
    debug!(id = %id, "export_invoice command");
    export(db, exporter, build_invoice(db, id).await).await
}

/// `debtor-statement-<name>-<millis>.pdf`
pub async fn export_statement(
    db: &DbState,
    exporter: &ExportState,
    debtor_id: &str,
) -> Result<ExportResult, ApiError> {
    debug!(debtor_id = %debtor_id, "export_statement command");
    export(db, exporter, build_statement(db, debtor_id).await).await
}

/// Refused with a validation error when there are no products.
pub async fn export_inventory_report(
    db: &DbState,
    exporter: &ExportState,
) -> Result<ExportResult, ApiError> {
    debug!("export_inventory_report command");
    export(db, exporter, build_inventory(db).await).await
}

pub async fn export_product_report(
    db: &DbState,
    exporter: &ExportState,
    product_id: &str,
) -> Result<ExportResult, ApiError> {
    debug!(product_id = %product_id, "export_product_report command");
    export(db, exporter, build_product(db, product_id).await).await
}

// =============================================================================
// Print
// =============================================================================

pub async fn print_invoice(db: &DbState, id: &str) -> Result<PrintView, ApiError> {
    debug!(id = %id, "print_invoice command");
    let doc = build_invoice(db, id).await?;
    Ok(PrintView::from(&doc))
}

pub async fn print_statement(db: &DbState, debtor_id: &str) -> Result<PrintView, ApiError> {
    debug!(debtor_id = %debtor_id, "print_statement command");
    let doc = build_statement(db, debtor_id).await?;
    Ok(PrintView::from(&doc))
}

pub async fn print_inventory_report(db: &DbState) -> Result<PrintView, ApiError> {
    debug!("print_inventory_report command");
    let doc = build_inventory(db).await?;
    Ok(PrintView::from(&doc))
}

pub async fn print_product_report(db: &DbState, product_id: &str) -> Result<PrintView, ApiError> {
    debug!(product_id = %product_id, "print_product_report command");
    let doc = build_product(db, product_id).await?;
    Ok(PrintView::from(&doc))
}
