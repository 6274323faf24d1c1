//! # Debt Ledger
//!
//! Balance, payment percentage, and statements for customers and suppliers.
//!
//! ## The Numbers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total_debt     = Σ debt entries                                        │
//! │  total_payment  = Σ payment entries                                     │
//! │  balance        = total_debt - total_payment                            │
//! │  payment %      = 100                        if total_debt == 0         │
//! │                 = round(payment / debt × 100) otherwise (half up)       │
//! │                                                                         │
//! │  Example: debt 1500, paid 1200 → balance 300, 80%                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DebtTransaction, Debtor, TransactionType};
use crate::validation::validate_amount;

// =============================================================================
// Standing
// =============================================================================

/// Who owes whom after netting the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Standing {
    /// Balance > 0: the debtor owes the shop.
    OwesUs,
    /// Balance < 0: the shop owes the debtor.
    WeOwe,
    Settled,
}

impl Standing {
    pub fn from_balance(balance: Money) -> Self {
        if balance.is_positive() {
            Standing::OwesUs
        } else if balance.is_negative() {
            Standing::WeOwe
        } else {
            Standing::Settled
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Standing::OwesUs => "مستحق عليه (مدين)",
            Standing::WeOwe => "مستحق له (دائن)",
            Standing::Settled => "الحساب مسدد",
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DebtorSummary {
    pub total_debt: Money,
    pub total_payment: Money,
    pub balance: Money,
    pub payment_percentage: i64,
    pub standing: Standing,
}

impl DebtorSummary {
    pub fn from_totals(total_debt: Money, total_payment: Money) -> Self {
        let balance = total_debt - total_payment;
        DebtorSummary {
            total_debt,
            total_payment,
            balance,
            payment_percentage: payment_percentage(total_debt, total_payment),
            standing: Standing::from_balance(balance),
        }
    }

    pub fn for_debtor(debtor: &Debtor) -> Self {
        DebtorSummary::from_totals(debtor.total_debt, debtor.total_payment)
    }
}

/// Share of the debt that has been paid, in whole percent.
///
/// 100 when there is no debt. Rounds half away from zero, so 80.5% is 81%.
/// Overpayment gives more than 100.
pub fn payment_percentage(total_debt: Money, total_payment: Money) -> i64 {
    let debt = total_debt.minor() as i128;
    if debt == 0 {
        return 100;
    }
    let scaled = total_payment.minor() as i128 * 200;
    let doubled = (scaled.abs() + debt.abs()) / (2 * debt.abs());
    let negative = (scaled < 0) != (debt < 0);
    (if negative { -doubled } else { doubled }) as i64
}

// =============================================================================
// Applying Entries
// =============================================================================

/// Adds a ledger entry to the debtor's running totals.
pub fn apply_transaction(debtor: &mut Debtor, entry: &DebtTransaction) -> CoreResult<()> {
    if entry.debtor_id != debtor.id {
        return Err(CoreError::DebtorNotFound(entry.debtor_id.clone()));
    }
    validate_amount(entry.amount)?;
    let (total, field) = match entry.kind {
        TransactionType::Debt => (&mut debtor.total_debt, "totalDebt"),
        TransactionType::Payment => (&mut debtor.total_payment, "totalPayment"),
    };
    *total = total
        .checked_add(entry.amount)
        .ok_or_else(|| CoreError::AmountOverflow {
            field: field.to_string(),
        })?;
    Ok(())
}

/// Rebuilds debt and payment totals from entries.
pub fn totals_from_entries<'a, I>(entries: I) -> (Money, Money)
where
    I: IntoIterator<Item = &'a DebtTransaction>,
{
    entries
        .into_iter()
        .fold((Money::zero(), Money::zero()), |(debt, paid), e| match e.kind {
            TransactionType::Debt => (debt + e.amount, paid),
            TransactionType::Payment => (debt, paid + e.amount),
        })
}

// =============================================================================
// Statement
// =============================================================================

/// Everything printed on a debtor statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Statement {
    pub debtor: Debtor,
    pub summary: DebtorSummary,
    /// Oldest first.
    pub transactions: Vec<DebtTransaction>,
}

impl Statement {
    /// Keeps only the debtor's own entries, sorted by date.
    pub fn build(debtor: Debtor, entries: Vec<DebtTransaction>) -> Self {
        let mut transactions: Vec<DebtTransaction> = entries
            .into_iter()
            .filter(|e| e.debtor_id == debtor.id)
            .collect();
        transactions.sort_by_key(|e| e.date);
        Statement {
            summary: DebtorSummary::for_debtor(&debtor),
            debtor,
            transactions,
        }
    }
}

/// Sum of balances that customers and suppliers still owe the shop.
pub fn outstanding_total(debtors: &[Debtor]) -> Money {
    debtors
        .iter()
        .map(Debtor::balance)
        .filter(Money::is_positive)
        .sum()
}
