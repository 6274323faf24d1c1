//! Storage keys. Each names one JSON document in `kv_store`.
//!
//! ```text
//! inventory-products   Vec<Product>
//! sales-invoices       Vec<Invoice>          (save order)
//! debts-debtors        Vec<Debtor>
//! debts-transactions   Vec<DebtTransaction>
//! app-settings         AppSettings
//! app-notifications    NotificationLog       (newest first, max 50)
//! ```

pub const PRODUCTS: &str = "inventory-products";
pub const INVOICES: &str = "sales-invoices";
pub const DEBTORS: &str = "debts-debtors";
pub const TRANSACTIONS: &str = "debts-transactions";
pub const SETTINGS: &str = "app-settings";
pub const NOTIFICATIONS: &str = "app-notifications";

/// Every key the application writes.
pub const ALL: [&str; 6] = [
    PRODUCTS,
    INVOICES,
    DEBTORS,
    TRANSACTIONS,
    SETTINGS,
    NOTIFICATIONS,
];
