//! # dukkan-docs: Printable Documents
//!
//! Builds the invoice, debtor statement, and report pages, and exports them
//! through a [`Renderer`].
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Invoice / Statement / InventoryReport / ProductReport  (dukkan-core)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  *_document(..) ──► Document { title, file_stem, body, blocks }         │
//! │       │                          │                                      │
//! │       │                          └──► print_view()  (A4 page box)       │
//! │       ▼                                                                 │
//! │  Exporter ──► PdfRenderer (printpdf) ──► <export dir>/<stem>.pdf        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## File Names
//! ```text
//! invoice-<id>
//! debtor-statement-<name>-<millis>
//! inventory-report-<millis>
//! product-report-<barcode>-<millis>
//! ```

pub mod document;
pub mod error;
pub mod export;
pub mod html;
pub mod invoice;
pub mod layout;
pub mod pdf;
pub mod render;
pub mod report;
pub mod statement;

pub use document::{Document, DocumentKind};
pub use error::{DocError, DocResult};
pub use export::Exporter;
pub use invoice::invoice_document;
pub use layout::{Block, Layout};
pub use pdf::PdfRenderer;
pub use render::{HtmlRenderer, Renderer};
pub use report::{inventory_document, product_document};
pub use statement::statement_document;
