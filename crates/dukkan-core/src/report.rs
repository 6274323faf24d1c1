//! # Reports
//!
//! Stock valuation, per-product sales, and the dashboard numbers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ledger::outstanding_total;
use crate::money::Money;
use crate::types::{Debtor, Invoice, Product};

// =============================================================================
// Inventory Report
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventoryRow {
    pub barcode: String,
    pub name: String,
    /// Units on hand.
    pub quantity: i64,
    pub unit_price: Money,
    /// `unit_price * quantity`.
    pub total_price: Money,
}

/// Stock on hand, valued at shelf price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventoryReport {
    pub rows: Vec<InventoryRow>,
    pub total_value: Money,
}

impl InventoryReport {
    pub fn from_products(products: &[Product]) -> Self {
        let rows: Vec<InventoryRow> = products
            .iter()
            .map(|p| InventoryRow {
                barcode: p.barcode.clone(),
                name: p.name.clone(),
                quantity: p.available,
                unit_price: p.price,
                total_price: p.stock_value(),
            })
            .collect();
        let total_value = rows.iter().map(|r| r.total_price).sum();
        InventoryReport { rows, total_value }
    }
}

// =============================================================================
// Product Report
// =============================================================================

/// One product's card: stock figures plus what it has sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductReport {
    pub product: Product,
    pub stock_value: Money,
    pub units_sold: i64,
    pub sales_total: Money,
    pub invoice_count: usize,
}

impl ProductReport {
    pub fn build(product: Product, invoices: &[Invoice]) -> Self {
        let mut units_sold = 0;
        let mut sales_total = Money::zero();
        let mut invoice_count = 0;
        for invoice in invoices {
            let mut on_invoice = false;
            for item in invoice.items.iter().filter(|i| i.product_id == product.id) {
                units_sold += item.quantity;
                sales_total += item.total;
                on_invoice = true;
            }
            if on_invoice {
                invoice_count += 1;
            }
        }
        ProductReport {
            stock_value: product.stock_value(),
            product,
            units_sold,
            sales_total,
            invoice_count,
        }
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Quick stats for the reports screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardStats {
    pub product_count: usize,
    pub invoice_count: usize,
    pub sales_total: Money,
    /// Sum of positive debtor balances.
    pub outstanding_debt: Money,
    /// Products with nothing left on the shelf.
    pub out_of_stock_count: usize,
}

impl DashboardStats {
    pub fn compute(products: &[Product], invoices: &[Invoice], debtors: &[Debtor]) -> Self {
        DashboardStats {
            product_count: products.len(),
            invoice_count: invoices.len(),
            sales_total: invoices.iter().map(|i| i.total).sum(),
            outstanding_debt: outstanding_total(debtors),
            out_of_stock_count: products.iter().filter(|p| p.is_out_of_stock()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InvoiceItem;
    use chrono::Utc;

    fn product(id: &str, price: i64, available: i64) -> Product {
        Product {
            id: id.to_string(),
            barcode: format!("B-{}", id),
            name: format!("منتج {}", id),
            quantity: available,
            price: Money::from_major(price),
            available,
        }
    }

    #[test]
    fn test_inventory_report() {
        let report = InventoryReport::from_products(&[product("a", 1200, 1498), product("b", 5, 0)]);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].quantity, 1498);
        assert_eq!(report.rows[0].total_price, Money::from_major(1_797_600));
        assert_eq!(report.total_value, Money::from_major(1_797_600));
    }

    #[test]
    fn test_product_report_counts_sales() {
        let a = product("a", 10, 5);
        let b = product("b", 3, 5);
        let invoices = vec![
            Invoice::new(
                "1".to_string(),
                Utc::now(),
                vec![
                    InvoiceItem::new(&a, 2, Money::from_major(10)),
                    InvoiceItem::new(&b, 1, Money::from_major(3)),
                ],
            ),
            Invoice::new("2".to_string(), Utc::now(), vec![InvoiceItem::new(&b, 4, Money::from_major(3))]),
        ];

        let report = ProductReport::build(a, &invoices);
        assert_eq!(report.units_sold, 2);
        assert_eq!(report.sales_total, Money::from_major(20));
        assert_eq!(report.invoice_count, 1);
        assert_eq!(report.stock_value, Money::from_major(50));
    }

    #[test]
    fn test_dashboard_stats() {
        let a = product("a", 10, 0);
        let invoice = Invoice::new(
            "1".to_string(),
            Utc::now(),
            vec![InvoiceItem::new(&a, 2, Money::from_major(10))],
        );
        let stats = DashboardStats::compute(&[a], &[invoice], &[]);
        assert_eq!(stats.product_count, 1);
        assert_eq!(stats.invoice_count, 1);
        assert_eq!(stats.sales_total, Money::from_major(20));
        assert_eq!(stats.outstanding_debt, Money::zero());
        assert_eq!(stats.out_of_stock_count, 1);
    }
}
