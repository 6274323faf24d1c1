//! # Debt Repository
//!
//! Debtors and their ledger live under two keys. A debtor's running
//! totals and the entries behind them always change together:
//!
//! ```text
//! record_transaction          delete_debtor
//! ──────────────────          ─────────────
//! BEGIN                       BEGIN
//!   load debts-debtors          load debts-debtors
//!   load debts-transactions     load debts-transactions
//!   apply_transaction           drop debtor + its entries
//!   push entry                  set both
//!   set both                  COMMIT
//! COMMIT
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::keys;
use crate::store::KvStore;
use dukkan_core::ledger::{apply_transaction, outstanding_total, Statement};
use dukkan_core::validation::{validate_new_debtor, validate_new_transaction, validate_search_query};
use dukkan_core::{DebtTransaction, Debtor, DebtorType, Money, NewDebtor, NewTransaction};

#[derive(Debug, Clone)]
pub struct DebtRepository {
    store: KvStore,
}

impl DebtRepository {
    pub fn new(store: KvStore) -> Self {
        DebtRepository { store }
    }

    /// Debtors, optionally only customers or only suppliers.
    pub async fn list_debtors(&self, filter: Option<DebtorType>) -> DbResult<Vec<Debtor>> {
        let debtors: Vec<Debtor> = self.store.get(keys::DEBTORS, Vec::new()).await;
        Ok(match filter {
            Some(kind) => debtors.into_iter().filter(|d| d.debtor_type == kind).collect(),
            None => debtors,
        })
    }

    pub async fn get_debtor(&self, id: &str) -> DbResult<Option<Debtor>> {
        let debtors = self.list_debtors(None).await?;
        Ok(debtors.into_iter().find(|d| d.id == id))
    }

    pub async fn require_debtor(&self, id: &str) -> DbResult<Debtor> {
        self.get_debtor(id)
            .await?
            .ok_or_else(|| DbError::not_found("Debtor", id))
    }

    /// Case-insensitive match on name or phone. Empty returns all.
    pub async fn search_debtors(&self, query: &str) -> DbResult<Vec<Debtor>> {
        let query = validate_search_query(query)?.to_lowercase();
        let debtors = self.list_debtors(None).await?;
        Ok(debtors
            .into_iter()
            .filter(|d| {
                query.is_empty()
                    || d.name.to_lowercase().contains(&query)
                    || d.phone.contains(&query)
            })
            .collect())
    }

    pub async fn add_debtor(&self, input: NewDebtor) -> DbResult<Debtor> {
        validate_new_debtor(&input)?;
        debug!(name = %input.name, kind = ?input.debtor_type, "Adding debtor");

        let mut tx = self.store.begin().await?;
        let mut debtors: Vec<Debtor> = tx.load(keys::DEBTORS, Vec::new()).await?;
        let debtor = Debtor::from_new(Uuid::new_v4().to_string(), input);
        debtors.push(debtor.clone());

        tx.set(keys::DEBTORS, &debtors).await?;
        tx.commit().await?;
        Ok(debtor)
    }

    /// Removes the debtor and every ledger entry against it.
    pub async fn delete_debtor(&self, id: &str) -> DbResult<Debtor> {
        debug!(id = %id, "Deleting debtor");

        let mut tx = self.store.begin().await?;
        let mut debtors: Vec<Debtor> = tx.load(keys::DEBTORS, Vec::new()).await?;
        let mut entries: Vec<DebtTransaction> = tx.load(keys::TRANSACTIONS, Vec::new()).await?;

        let idx = debtors
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| DbError::not_found("Debtor", id))?;
        let removed = debtors.remove(idx);
        let before = entries.len();
        entries.retain(|e| e.debtor_id != id);

        tx.set(keys::DEBTORS, &debtors).await?;
        tx.set(keys::TRANSACTIONS, &entries).await?;
        tx.commit().await?;

        info!(id = %id, entries = before - entries.len(), "Debtor deleted");
        Ok(removed)
    }

    /// All ledger entries, or only those of one debtor, in recorded order.
    pub async fn list_transactions(&self, debtor_id: Option<&str>) -> DbResult<Vec<DebtTransaction>> {
        let entries: Vec<DebtTransaction> = self.store.get(keys::TRANSACTIONS, Vec::new()).await;
        Ok(match debtor_id {
            Some(id) => entries.into_iter().filter(|e| e.debtor_id == id).collect(),
            None => entries,
        })
    }

    /// Appends a ledger entry and updates the debtor's totals.
    ///
    /// ## Returns
    /// The stored entry and the debtor as it stands afterwards.
    pub async fn record_transaction(
        &self,
        input: NewTransaction,
        now: DateTime<Utc>,
    ) -> DbResult<(DebtTransaction, Debtor)> {
        validate_new_transaction(&input)?;
        debug!(
            debtor_id = %input.debtor_id,
            kind = ?input.kind,
            amount = %input.amount,
            "Recording transaction"
        );

        let mut tx = self.store.begin().await?;
        let mut debtors: Vec<Debtor> = tx.load(keys::DEBTORS, Vec::new()).await?;
        let mut entries: Vec<DebtTransaction> = tx.load(keys::TRANSACTIONS, Vec::new()).await?;

        let debtor = debtors
            .iter_mut()
            .find(|d| d.id == input.debtor_id)
            .ok_or_else(|| DbError::not_found("Debtor", input.debtor_id.as_str()))?;

        let entry = DebtTransaction {
            id: Uuid::new_v4().to_string(),
            debtor_id: input.debtor_id,
            kind: input.kind,
            amount: input.amount,
            date: now,
            notes: input.notes.trim().to_string(),
        };
        apply_transaction(debtor, &entry)?;
        let debtor = debtor.clone();
        entries.push(entry.clone());

        tx.set(keys::DEBTORS, &debtors).await?;
        tx.set(keys::TRANSACTIONS, &entries).await?;
        tx.commit().await?;

        Ok((entry, debtor))
    }

    /// Debtor, summary, and entries oldest first.
    pub async fn statement(&self, debtor_id: &str) -> DbResult<Statement> {
        let debtor = self.require_debtor(debtor_id).await?;
        let entries = self.list_transactions(Some(debtor_id)).await?;
        Ok(Statement::build(debtor, entries))
    }

    /// What customers and suppliers still owe the shop in total.
    pub async fn outstanding(&self) -> DbResult<Money> {
        let debtors = self.list_debtors(None).await?;
        Ok(outstanding_total(&debtors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::Duration;
    use dukkan_core::ledger::{DebtorSummary, Standing};
    use dukkan_core::{CoreError, TransactionType};

    fn customer(name: &str) -> NewDebtor {
        NewDebtor {
            name: name.to_string(),
            phone: "0551234567".to_string(),
            religion: None,
            debtor_type: DebtorType::Customer,
        }
    }

    fn entry(debtor_id: &str, kind: TransactionType, major: i64) -> NewTransaction {
        NewTransaction {
            debtor_id: debtor_id.to_string(),
            kind,
            amount: Money::from_major(major),
            notes: String::new(),
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_record_updates_totals_atomically() {
        let db = db().await;
        let debts = db.debts();
        let ahmad = debts.add_debtor(customer("أحمد")).await.unwrap();
        assert_eq!(ahmad.total_debt, Money::zero());

        let now = Utc::now();
        debts
            .record_transaction(entry(&ahmad.id, TransactionType::Debt, 1500), now)
            .await
            .unwrap();
        let (_, after) = debts
            .record_transaction(
                entry(&ahmad.id, TransactionType::Payment, 1200),
                now + Duration::minutes(1),
            )
            .await
            .unwrap();

        assert_eq!(after.balance(), Money::from_major(300));
        let summary = DebtorSummary::for_debtor(&after);
        assert_eq!(summary.payment_percentage, 80);
        assert_eq!(summary.standing, Standing::OwesUs);

        let stored = debts.require_debtor(&ahmad.id).await.unwrap();
        assert_eq!(stored, after);
        assert_eq!(debts.list_transactions(Some(&ahmad.id)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_record_rejects_non_positive_amount() {
        let db = db().await;
        let ahmad = db.debts().add_debtor(customer("أحمد")).await.unwrap();

        let err = db
            .debts()
            .record_transaction(entry(&ahmad.id, TransactionType::Debt, 0), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Rejected(CoreError::Validation(_))));
        assert!(db.debts().list_transactions(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_for_unknown_debtor() {
        let db = db().await;
        let err = db
            .debts()
            .record_transaction(entry("ghost", TransactionType::Debt, 10), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_debtor_cascades() {
        let db = db().await;
        let debts = db.debts();
        let ahmad = debts.add_debtor(customer("أحمد")).await.unwrap();
        let sara = debts.add_debtor(customer("سارة")).await.unwrap();
        debts
            .record_transaction(entry(&ahmad.id, TransactionType::Debt, 100), Utc::now())
            .await
            .unwrap();
        debts
            .record_transaction(entry(&sara.id, TransactionType::Debt, 50), Utc::now())
            .await
            .unwrap();

        debts.delete_debtor(&ahmad.id).await.unwrap();

        let remaining = debts.list_transactions(None).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].debtor_id, sara.id);
        assert!(debts.get_debtor(&ahmad.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_filter_and_search() {
        let db = db().await;
        let debts = db.debts();
        debts.add_debtor(customer("أحمد")).await.unwrap();
        debts
            .add_debtor(NewDebtor {
                name: "شركة النور".to_string(),
                phone: "0110000000".to_string(),
                religion: None,
                debtor_type: DebtorType::Supplier,
            })
            .await
            .unwrap();

        assert_eq!(debts.list_debtors(Some(DebtorType::Supplier)).await.unwrap().len(), 1);
        assert_eq!(debts.list_debtors(None).await.unwrap().len(), 2);
        assert_eq!(debts.search_debtors("النور").await.unwrap().len(), 1);
        assert_eq!(debts.search_debtors("0551").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_statement_and_outstanding() {
        let db = db().await;
        let debts = db.debts();
        let ahmad = debts.add_debtor(customer("أحمد")).await.unwrap();
        let now = Utc::now();
        debts
            .record_transaction(entry(&ahmad.id, TransactionType::Payment, 20), now)
            .await
            .unwrap();
        debts
            .record_transaction(
                entry(&ahmad.id, TransactionType::Debt, 100),
                now - Duration::days(1),
            )
            .await
            .unwrap();

        let statement = debts.statement(&ahmad.id).await.unwrap();
        assert_eq!(statement.transactions[0].kind, TransactionType::Debt);
        assert_eq!(statement.summary.balance, Money::from_major(80));
        assert_eq!(debts.outstanding().await.unwrap(), Money::from_major(80));
    }
}
