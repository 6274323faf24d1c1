//! # Repository Module
//!
//! One repository per stored collection, all on top of [`KvStore`].
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command                                                                │
//! │       │  db.invoices().save_sale(items, policy, now)                    │
//! │       ▼                                                                 │
//! │  InvoiceRepository                                                      │
//! │       │  begin()                                                        │
//! │       │  load(inventory-products)  load(sales-invoices)                 │
//! │       │  apply_sale(..)            push(invoice)                        │
//! │       │  set(inventory-products)   set(sales-invoices)                  │
//! │       │  commit()                                                       │
//! │       ▼                                                                 │
//! │  kv_store table                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Plain reads use the lenient [`KvStore::get`]. Anything that writes
//! reloads inside a [`KvTransaction`](crate::KvTransaction) with a strict
//! decode first.
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - inventory CRUD and search
//! - [`InvoiceRepository`](invoice::InvoiceRepository) - saving sales, browsing invoices
//! - [`DebtRepository`](debt::DebtRepository) - debtors and their ledger
//! - [`SettingsRepository`](settings::SettingsRepository) - theme, language, business info
//! - [`NotificationRepository`](notification::NotificationRepository) - notification center
//!
//! [`KvStore`]: crate::KvStore
//! [`KvStore::get`]: crate::KvStore::get

pub mod debt;
pub mod invoice;
pub mod notification;
pub mod product;
pub mod settings;
