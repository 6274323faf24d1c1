//! # Commands Module
//!
//! Every operation the front end can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs            ◄─── You are here (notification helpers)
//! ├── inventory.rs      ◄─── Product CRUD and search
//! ├── sales.rs          ◄─── Invoice draft, save, saved-invoice browser
//! ├── debts.rs          ◄─── Debtors, ledger entries, statements
//! ├── reports.rs        ◄─── Inventory / product reports, dashboard
//! ├── settings.rs       ◄─── Business info, theme, language
//! ├── notifications.rs  ◄─── Notification center
//! └── documents.rs      ◄─── Export and print views
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs database
//! async fn search_products(db: &DbState, query: &str)
//!
//! // Database + draft + config
//! async fn save_invoice(db: &DbState, draft: &DraftState, config: &AppConfig)
//! ```
//!
//! ## Notifications
//! ```text
//! command ok  ──► notify(success)  ──► Ok(value)
//! command err ──► notify(error)    ──► Err(ApiError)
//! ```
//! Recording a notification never fails the command it belongs to.

pub mod debts;
pub mod documents;
pub mod inventory;
pub mod notifications;
pub mod reports;
pub mod sales;
pub mod settings;

use chrono::Utc;
use dukkan_core::NotificationType;
use tracing::warn;

use crate::error::ApiError;
use crate::state::DbState;

/// Records a notification. Failures are logged and swallowed.
pub(crate) async fn notify(db: &DbState, title: &str, message: &str, kind: NotificationType) {
    if let Err(e) = db
        .inner()
        .notifications()
        .add(title, message, kind, Utc::now())
        .await
    {
        warn!(title = %title, error = %e, "Failed to record notification");
    }
}

pub(crate) async fn notify_success(db: &DbState, title: &str, message: &str) {
    notify(db, title, message, NotificationType::Success).await;
}

/// Converts `err`, records it as an error notification, and hands it back.
pub(crate) async fn failed<E>(db: &DbState, title: &str, err: E) -> ApiError
where
    E: Into<ApiError>,
{
    let err = err.into();
    notify(db, title, &err.message, NotificationType::Error).await;
    err
}

#[cfg(test)]
pub(crate) mod testing {
    use dukkan_core::{Money, NewProduct, Product};
    use dukkan_db::{Database, DbConfig};
    use uuid::Uuid;

    use crate::config::AppConfig;
    use crate::App;

    /// In-memory store, fresh draft, export dir under the system temp dir.
    pub async fn app() -> App {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let export_dir =
            std::env::temp_dir().join(format!("dukkan-app-test-{}", Uuid::new_v4()));
        App::with_database(db, AppConfig::with_paths(":memory:", export_dir)).unwrap()
    }

    pub async fn charger(app: &App) -> Product {
        app.db
            .inner()
            .products()
            .insert(NewProduct {
                barcode: "SCAN2829".to_string(),
                name: "شاحن".to_string(),
                quantity: 1500,
                price: Money::from_major(1200),
            })
            .await
            .unwrap()
    }
}
