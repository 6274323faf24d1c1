//! # Report Commands
//!
//! Read-only views over products, invoices, and debtors.

use dukkan_core::report::{DashboardStats, InventoryReport, ProductReport};
use tracing::debug;

use crate::error::ApiError;
use crate::state::DbState;

/// Every product with its stock value, plus the grand total.
pub async fn inventory_report(db: &DbState) -> Result<InventoryReport, ApiError> {
    debug!("inventory_report command");
    let products = db.inner().products().list().await?;
    Ok(InventoryReport::from_products(&products))
}

/// Stock and sales figures for one product.
pub async fn product_report(db: &DbState, product_id: &str) -> Result<ProductReport, ApiError> {
    debug!(product_id = %product_id, "product_report command");
    let product = db.inner().products().require(product_id).await?;
    let invoices = db.inner().invoices().list().await?;
    Ok(ProductReport::build(product, &invoices))
}

pub async fn dashboard_stats(db: &DbState) -> Result<DashboardStats, ApiError> {
    debug!("dashboard_stats command");
    let products = db.inner().products().list().await?;
    let invoices = db.inner().invoices().list().await?;
    let debtors = db.inner().debts().list_debtors(None).await?;
    Ok(DashboardStats::compute(&products, &invoices, &debtors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{debts, sales, testing};
    use crate::error::ErrorCode;
    use dukkan_core::{DebtorType, Money, NewDebtor, NewTransaction, TransactionType};

    #[tokio::test]
    async fn test_reports_after_a_sale() {
        let app = testing::app().await;
        let charger = testing::charger(&app).await;

        sales::add_to_invoice(&app.db, &app.draft, &app.config, &charger.id, 2, None)
            .await
            .unwrap();
        sales::save_invoice(&app.db, &app.draft, &app.config).await.unwrap();

        let debtor = debts::add_debtor(
            &app.db,
            NewDebtor {
                name: "أحمد".to_string(),
                phone: "0500000000".to_string(),
                religion: None,
                debtor_type: DebtorType::Customer,
            },
        )
        .await
        .unwrap();
        debts::record_transaction(
            &app.db,
            NewTransaction {
                debtor_id: debtor.id,
                kind: TransactionType::Debt,
                amount: Money::from_major(300),
                notes: String::new(),
            },
        )
        .await
        .unwrap();

        let inventory = inventory_report(&app.db).await.unwrap();
        assert_eq!(inventory.rows[0].quantity, 1498);
        assert_eq!(inventory.total_value, Money::from_major(1_797_600));

        let product = product_report(&app.db, &charger.id).await.unwrap();
        assert_eq!(product.units_sold, 2);
        assert_eq!(product.sales_total, Money::from_major(2400));

        let stats = dashboard_stats(&app.db).await.unwrap();
        assert_eq!(stats.product_count, 1);
        assert_eq!(stats.invoice_count, 1);
        assert_eq!(stats.sales_total, Money::from_major(2400));
        assert_eq!(stats.outstanding_debt, Money::from_major(300));
    }

    #[tokio::test]
    async fn test_product_report_unknown_id() {
        let app = testing::app().await;
        let err = product_report(&app.db, "nope").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
