//! # Debt Ledger Commands
//!
//! ```text
//! add_debtor ──► Debtor { totalDebt: 0, totalPayment: 0 }
//!                    │
//! record_transaction │  debt 1500      ──► totalDebt 1500
//!                    │  payment 1200   ──► totalPayment 1200
//!                    ▼
//! debtor_summary ──► balance 300, 80%, owes us
//! debtor_statement ──► debtor + summary + entries oldest first
//! ```
//!
//! Each entry and the debtor totals it changes are written together.

use chrono::Utc;
use dukkan_core::ledger::{DebtorSummary, Statement};
use dukkan_core::{DebtTransaction, Debtor, DebtorType, Money, NewDebtor, NewTransaction};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{failed, notify_success};
use crate::error::ApiError;
use crate::state::DbState;

/// Result of recording a ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedTransaction {
    pub transaction: DebtTransaction,
    pub debtor: Debtor,
    pub summary: DebtorSummary,
}

/// `filter` limits the list to customers or suppliers.
pub async fn list_debtors(
    db: &DbState,
    filter: Option<DebtorType>,
) -> Result<Vec<Debtor>, ApiError> {
    debug!(?filter, "list_debtors command");
    Ok(db.inner().debts().list_debtors(filter).await?)
}

pub async fn get_debtor(db: &DbState, id: &str) -> Result<Debtor, ApiError> {
    debug!(id = %id, "get_debtor command");
    Ok(db.inner().debts().require_debtor(id).await?)
}

pub async fn search_debtors(db: &DbState, query: &str) -> Result<Vec<Debtor>, ApiError> {
    debug!(query = %query, "search_debtors command");
    Ok(db.inner().debts().search_debtors(query).await?)
}

pub async fn add_debtor(db: &DbState, input: NewDebtor) -> Result<Debtor, ApiError> {
    debug!(name = %input.name, "add_debtor command");
    match db.inner().debts().add_debtor(input).await {
        Ok(debtor) => {
            notify_success(
                db,
                "تمت إضافة المدين",
                &format!("تمت إضافة {} ({})", debtor.name, debtor.debtor_type.label()),
            )
            .await;
            Ok(debtor)
        }
        Err(e) => Err(failed(db, "خطأ في الإدخال", e).await),
    }
}

/// Removes the debtor together with its ledger entries.
pub async fn delete_debtor(db: &DbState, id: &str) -> Result<Debtor, ApiError> {
    debug!(id = %id, "delete_debtor command");
    match db.inner().debts().delete_debtor(id).await {
        Ok(debtor) => {
            notify_success(db, "تم الحذف", &format!("تم حذف {}", debtor.name)).await;
            Ok(debtor)
        }
        Err(e) => Err(failed(db, "خطأ في الحذف", e).await),
    }
}

/// Records a debt or a payment against a debtor.
///
/// ## Returns
/// * `Ok(RecordedTransaction)` - entry stored, debtor totals updated
/// * `Err(VALIDATION_ERROR)` - amount not positive, or notes too long
/// * `Err(NOT_FOUND)` - no such debtor
pub async fn record_transaction(
    db: &DbState,
    input: NewTransaction,
) -> Result<RecordedTransaction, ApiError> {
    debug!(debtor_id = %input.debtor_id, kind = ?input.kind, "record_transaction command");
    match db
        .inner()
        .debts()
        .record_transaction(input, Utc::now())
        .await
    {
        Ok((transaction, debtor)) => {
            notify_success(
                db,
                "تم تسجيل المعاملة",
                &format!(
                    "{} بمبلغ {} على حساب {}",
                    transaction.kind.label(),
                    transaction.amount,
                    debtor.name
                ),
            )
            .await;
            Ok(RecordedTransaction {
                summary: DebtorSummary::for_debtor(&debtor),
                transaction,
                debtor,
            })
        }
        Err(e) => Err(failed(db, "خطأ", e).await),
    }
}

/// `debtor_id` narrows the list to one debtor.
pub async fn list_transactions(
    db: &DbState,
    debtor_id: Option<&str>,
) -> Result<Vec<DebtTransaction>, ApiError> {
    debug!(?debtor_id, "list_transactions command");
    Ok(db.inner().debts().list_transactions(debtor_id).await?)
}

/// Balance, payment percentage, and standing.
pub async fn debtor_summary(db: &DbState, id: &str) -> Result<DebtorSummary, ApiError> {
    debug!(id = %id, "debtor_summary command");
    let debtor = db.inner().debts().require_debtor(id).await?;
    Ok(DebtorSummary::for_debtor(&debtor))
}

pub async fn debtor_statement(db: &DbState, id: &str) -> Result<Statement, ApiError> {
    debug!(id = %id, "debtor_statement command");
    Ok(db.inner().debts().statement(id).await?)
}

/// What customers and suppliers owe the shop in total.
pub async fn outstanding_debt(db: &DbState) -> Result<Money, ApiError> {
    Ok(db.inner().debts().outstanding().await?)
}
