//! # State Module
//!
//! Each concern gets its own state type, and every command takes only the
//! states it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │   DbState    │  │  DraftState  │  │ ExportState  │  │ AppConfig  │  │
//! │  │              │  │              │  │              │  │            │  │
//! │  │  Database    │  │  Arc<Mutex<  │  │  Exporter    │  │ paths      │  │
//! │  │  (KV store   │  │  InvoiceDraft│  │  (dir +      │  │ oversell   │  │
//! │  │   on SQLite) │  │  >>          │  │   renderer)  │  │ currency   │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: pool is shared, writes go through store transactions       │
//! │  • DraftState: Arc<Mutex<T>>, never held across an await               │
//! │  • ExportState / AppConfig: read-only after startup                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod db;
mod draft;
mod export;

pub use db::DbState;
pub use draft::DraftState;
pub use export::ExportState;
