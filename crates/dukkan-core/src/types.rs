//! # Domain Types
//!
//! Core domain types used throughout Dukkan.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Invoice     │   │     Debtor      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (ms stamp)  │   │  id (UUID)      │       │
//! │  │  barcode (uniq) │   │  date           │   │  type           │       │
//! │  │  quantity       │   │  items ─────────┼─► │  total_debt     │       │
//! │  │  available      │   │  total          │   │  total_payment  │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │ 1..n            │
//! │                                              ┌────────▼────────┐       │
//! │                                              │ DebtTransaction │       │
//! │                                              │  debt | payment │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All types serialize with camelCase keys; that JSON is what the key-value
//! store holds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so the default 15% is 1500 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage. Negative and NaN inputs give 0.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Barcode as scanned or typed. Unique across the inventory.
    pub barcode: String,

    pub name: String,

    /// Stock entered when the product was created.
    pub quantity: i64,

    /// Shelf price.
    pub price: Money,

    /// Current stock. Goes down with every saved invoice.
    pub available: i64,
}

impl Product {
    /// Builds a product from validated input. `available` starts at `quantity`.
    pub fn from_new(id: String, input: NewProduct) -> Self {
        Product {
            id,
            barcode: input.barcode.trim().to_string(),
            name: input.name.trim().to_string(),
            quantity: input.quantity,
            price: input.price,
            available: input.quantity,
        }
    }

    /// Value of the stock on hand at shelf price.
    pub fn stock_value(&self) -> Money {
        self.price.multiply_quantity(self.available)
    }

    /// Whether `quantity` units can be sold without going below zero.
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.available >= quantity
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.available <= 0
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub barcode: String,
    pub name: String,
    pub quantity: i64,
    pub price: Money,
}

/// Input for editing a product. Every field is replaced.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductUpdate {
    pub barcode: String,
    pub name: String,
    pub quantity: i64,
    pub price: Money,
    pub available: i64,
}

// =============================================================================
// Invoice
// =============================================================================

/// A line on an invoice.
///
/// Product name and barcode are copied at the time of sale so a saved
/// invoice reads the same after the product is renamed or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceItem {
    pub product_id: String,
    pub product_name: String,
    pub barcode: String,
    pub quantity: i64,
    /// Sale price for this line. May differ from the shelf price.
    pub price: Money,
    /// Always `price * quantity`.
    pub total: Money,
}

impl InvoiceItem {
    pub fn new(product: &Product, quantity: i64, price: Money) -> Self {
        InvoiceItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            barcode: product.barcode.clone(),
            quantity,
            price,
            total: price.multiply_quantity(quantity),
        }
    }

    /// Changes the quantity and recomputes the line total.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.total = self.price.multiply_quantity(quantity);
    }
}

/// A saved sales invoice. Immutable once saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    /// Millisecond timestamp of the save, strictly increasing per store.
    pub id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub items: Vec<InvoiceItem>,
    /// Always the sum of `items[i].total`.
    pub total: Money,
}

impl Invoice {
    pub fn new(id: String, date: DateTime<Utc>, items: Vec<InvoiceItem>) -> Self {
        let total = items.iter().map(|i| i.total).sum();
        Invoice {
            id,
            date,
            items,
            total,
        }
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Debtors & Ledger
// =============================================================================

/// Whether the debtor buys from us or sells to us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DebtorType {
    Customer,
    Supplier,
}

impl DebtorType {
    pub fn label(&self) -> &'static str {
        match self {
            DebtorType::Customer => "زبون",
            DebtorType::Supplier => "مورد",
        }
    }
}

/// A customer or supplier with a running account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Debtor {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(rename = "type")]
    pub debtor_type: DebtorType,
    /// Sum of all debt entries.
    pub total_debt: Money,
    /// Sum of all payment entries.
    pub total_payment: Money,
}

impl Debtor {
    pub fn from_new(id: String, input: NewDebtor) -> Self {
        Debtor {
            id,
            name: input.name.trim().to_string(),
            phone: input.phone.trim().to_string(),
            religion: input
                .religion
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            debtor_type: input.debtor_type,
            total_debt: Money::zero(),
            total_payment: Money::zero(),
        }
    }

    /// What is still owed: `total_debt - total_payment`.
    #[inline]
    pub fn balance(&self) -> Money {
        self.total_debt - self.total_payment
    }
}

/// Input for creating a debtor.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewDebtor {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub religion: Option<String>,
    #[serde(rename = "type")]
    pub debtor_type: DebtorType,
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TransactionType {
    /// Raises what the debtor owes.
    Debt,
    /// Lowers what the debtor owes.
    Payment,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Debt => "دين",
            TransactionType::Payment => "دفعة",
        }
    }
}

/// One ledger entry against a debtor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DebtTransaction {
    pub id: String,
    pub debtor_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Money,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

/// Input for recording a ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewTransaction {
    pub debtor_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Money,
    #[serde(default)]
    pub notes: String,
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

/// A message shown in the notification center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default)]
    pub read: bool,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}
