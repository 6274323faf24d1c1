//! # dukkan-db: Storage Layer for Dukkan
//!
//! A string-keyed JSON store on top of SQLite, and one repository per
//! collection on top of that.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dukkan Data Flow                                 │
//! │                                                                         │
//! │  Command (save_invoice)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     dukkan-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ products       │    │  (embedded)  │  │   │
//! │  │   │               │    │ invoices       │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ debts          │    │ 001_kv_store │  │   │
//! │  │   │               │    │ settings       │    │              │  │   │
//! │  │   │               │    │ notifications  │    │              │  │   │
//! │  │   └───────┬───────┘    └───────┬────────┘    └──────────────┘  │   │
//! │  │           │                    │                                │   │
//! │  │           │            ┌───────▼────────┐                       │   │
//! │  │           └───────────►│    KvStore     │ get / set / begin     │   │
//! │  │                        └────────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file: kv_store(key, value JSON, updated_at)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dukkan_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("dukkan.db")).await?;
//! let matches = db.products().search("شاحن").await?;
//! ```

pub mod error;
pub mod keys;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{KvStore, KvTransaction};

pub use repository::debt::DebtRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::notification::NotificationRepository;
pub use repository::product::ProductRepository;
pub use repository::settings::SettingsRepository;
