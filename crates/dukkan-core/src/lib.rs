//! # dukkan-core: Pure Business Logic for Dukkan
//!
//! Every number the shop owner sees (invoice totals, stock counts, what a
//! customer still owes) is computed here, once, as a pure function.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dukkan Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Commands (apps/dukkan)                       │   │
//! │  │  add_product, add_to_invoice, save_invoice, record_transaction  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dukkan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │ invoice  │ │  ledger  │ │ report/inventory │  │   │
//! │  │   │ Product  │ │  Draft   │ │ Summary  │ │  Stock value     │  │   │
//! │  │   │ Debtor   │ │  Totals  │ │ Statement│ │  Dashboard       │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO FILES • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          dukkan-db (key-value store)  /  dukkan-docs            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Invoice, Debtor, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`invoice`] - Invoice draft, totals, tax, invoice ids
//! - [`inventory`] - Stock decrement on sale, product search
//! - [`ledger`] - Debtor balance, payment percentage, statements
//! - [`report`] - Inventory report and dashboard statistics
//! - [`notification`] - Bounded notification log
//! - [`settings`] - Business info, theme, language
//!
//! ## Example Usage
//!
//! ```rust
//! use dukkan_core::ledger::DebtorSummary;
//! use dukkan_core::money::Money;
//!
//! let summary = DebtorSummary::from_totals(
//!     Money::from_major(1500),
//!     Money::from_major(1200),
//! );
//! assert_eq!(summary.balance, Money::from_major(300));
//! assert_eq!(summary.payment_percentage, 80);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod invoice;
pub mod ledger;
pub mod money;
pub mod notification;
pub mod report;
pub mod settings;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// How many notifications are kept. Older ones fall off the end.
pub const MAX_NOTIFICATIONS: usize = 50;

/// Saved invoices shown per page in the invoice browser.
pub const INVOICES_PER_PAGE: usize = 5;

/// Tax percentage a fresh install starts with.
pub const DEFAULT_TAX_PERCENT: f64 = 15.0;

/// Upper bound for free-text search terms.
pub const MAX_SEARCH_LEN: usize = 100;

/// Most units on one invoice line, and most units a product can stock.
pub const MAX_LINE_QUANTITY: i64 = 1_000_000;

/// Most lines on one invoice.
pub const MAX_INVOICE_LINES: usize = 500;

/// Highest unit price, in minor units (10,000,000.00).
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000;

/// Highest single ledger entry, in minor units (1,000,000,000.00).
pub const MAX_ENTRY_AMOUNT: i64 = 100_000_000_000;
