//! # Invoice Module
//!
//! The in-progress invoice (draft), tax totals, invoice ids, and the
//! browsing helpers for saved invoices.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Invoice Draft                                   │
//! │                                                                         │
//! │  add(شاحن, 2, 1200) ──► [شاحن ×2 = 2400]                                │
//! │  add(شاحن, 1, 1200) ──► [شاحن ×3 = 3600]        same product merges     │
//! │  add(كابل, 1,   50) ──► [شاحن ×3, كابل ×1]      new product appends     │
//! │  remove_at(0)       ──► [كابل ×1]                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  to_invoice(id, now) ──► Invoice (EmptyInvoice if no lines)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  dukkan-db saves invoice + stock decrement in one transaction          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::inventory::StockPolicy;
use crate::money::Money;
use crate::types::{Invoice, InvoiceItem, Product, TaxRate};
use crate::validation::{validate_line_price, validate_quantity};
use crate::MAX_INVOICE_LINES;

// =============================================================================
// Draft
// =============================================================================

/// The invoice being rung up. Lives in memory until saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceDraft {
    pub items: Vec<InvoiceItem>,
}

impl InvoiceDraft {
    pub fn new() -> Self {
        InvoiceDraft::default()
    }

    /// Adds `quantity` units of `product` at `price`.
    ///
    /// ## Behavior
    /// - Product already on the draft: quantities merge, the line keeps its
    ///   original price, the total is recomputed
    /// - Otherwise a new line is appended
    ///
    /// Under [`StockPolicy::Strict`] the merged quantity may not exceed
    /// `product.available`. The merged quantity is bounded by
    /// [`MAX_LINE_QUANTITY`](crate::MAX_LINE_QUANTITY) and the line count by
    /// [`MAX_INVOICE_LINES`], so line and invoice totals always fit.
    pub fn add(
        &mut self,
        product: &Product,
        quantity: i64,
        price: Money,
        policy: StockPolicy,
    ) -> CoreResult<()> {
        validate_quantity(quantity)?;
        validate_line_price(price)?;

        let existing = self.items.iter().position(|i| i.product_id == product.id);
        let already = existing.map(|idx| self.items[idx].quantity).unwrap_or(0);
        let merged = already + quantity;
        validate_quantity(merged)?;
        policy.check(product, merged)?;

        match existing {
            Some(idx) => self.items[idx].set_quantity(merged),
            None => {
                if self.items.len() >= MAX_INVOICE_LINES {
                    return Err(ValidationError::OutOfRange {
                        field: "items".to_string(),
                        min: 1,
                        max: MAX_INVOICE_LINES as i64,
                    }
                    .into());
                }
                self.items.push(InvoiceItem::new(product, quantity, price));
            }
        }
        Ok(())
    }

    /// Removes the line at `index` and returns it.
    pub fn remove_at(&mut self, index: usize) -> CoreResult<InvoiceItem> {
        if index >= self.items.len() {
            return Err(CoreError::InvalidLineIndex {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of line totals.
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.total).sum()
    }

    /// Freezes the draft into an invoice. The draft itself is left as is.
    pub fn to_invoice(&self, id: String, date: DateTime<Utc>) -> CoreResult<Invoice> {
        if self.is_empty() {
            return Err(CoreError::EmptyInvoice);
        }
        Ok(Invoice::new(id, date, self.items.clone()))
    }
}

// =============================================================================
// Totals With Tax
// =============================================================================

/// Subtotal, tax, and grand total for printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub grand_total: Money,
}

impl InvoiceTotals {
    /// ## Example
    /// ```rust
    /// use dukkan_core::invoice::InvoiceTotals;
    /// use dukkan_core::money::Money;
    /// use dukkan_core::types::TaxRate;
    ///
    /// let t = InvoiceTotals::compute(Money::from_major(2400), TaxRate::from_percentage(15.0));
    /// assert_eq!(t.tax, Money::from_major(360));
    /// assert_eq!(t.grand_total, Money::from_major(2760));
    /// ```
    pub fn compute(subtotal: Money, rate: TaxRate) -> Self {
        let tax = subtotal.calculate_tax(rate);
        InvoiceTotals {
            subtotal,
            tax_rate: rate,
            tax,
            grand_total: subtotal + tax,
        }
    }

    pub fn for_invoice(invoice: &Invoice, rate: TaxRate) -> Self {
        InvoiceTotals::compute(invoice.total, rate)
    }

    /// Whether a separate tax section should be printed.
    pub fn has_tax(&self) -> bool {
        !self.tax_rate.is_zero()
    }
}

// =============================================================================
// Invoice Ids
// =============================================================================

/// Next invoice id: the current millisecond, bumped past the last id so two
/// saves in the same millisecond never collide.
///
/// ```rust
/// use dukkan_core::invoice::next_invoice_id;
///
/// assert_eq!(next_invoice_id(None, 1_700_000_000_000), "1700000000000");
/// assert_eq!(next_invoice_id(Some("1700000000000"), 1_700_000_000_000), "1700000000001");
/// ```
pub fn next_invoice_id(last_id: Option<&str>, now_millis: i64) -> String {
    let floor = last_id
        .and_then(|id| id.parse::<i64>().ok())
        .map(|last| last + 1)
        .unwrap_or(i64::MIN);
    now_millis.max(floor).to_string()
}

// =============================================================================
// Search & Paging
// =============================================================================

/// Date as shown in the invoice list and matched by search.
pub fn display_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Case-insensitive substring match on id, display date, or total.
pub fn matches_search(invoice: &Invoice, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    invoice.id.to_lowercase().contains(&term)
        || display_date(&invoice.date).contains(&term)
        || invoice.total.to_string().contains(&term)
}

/// One page of a longer list. Pages are numbered from 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slices `items` into the requested page. Out-of-range pages clamp to the
/// nearest valid one; an empty list has one empty page.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();
    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(id: &str, barcode: &str, available: i64) -> Product {
        Product {
            id: id.to_string(),
            barcode: barcode.to_string(),
            name: format!("منتج {}", id),
            quantity: available,
            price: Money::from_major(1200),
            available,
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut draft = InvoiceDraft::new();
        let p = product("p1", "SCAN2829", 1500);

        draft.add(&p, 2, Money::from_major(1200), StockPolicy::Strict).unwrap();
        draft.add(&p, 1, Money::from_major(999), StockPolicy::Strict).unwrap();

        assert_eq!(draft.len(), 1);
        assert_eq!(draft.items[0].quantity, 3);
        assert_eq!(draft.items[0].price, Money::from_major(1200));
        assert_eq!(draft.total(), Money::from_major(3600));
    }

    #[test]
    fn test_add_appends_other_product() {
        let mut draft = InvoiceDraft::new();
        draft
            .add(&product("p1", "A", 10), 1, Money::from_major(5), StockPolicy::Strict)
            .unwrap();
        draft
            .add(&product("p2", "B", 10), 2, Money::from_major(7), StockPolicy::Strict)
            .unwrap();
        assert_eq!(draft.len(), 2);
        assert_eq!(draft.total(), Money::from_major(19));
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let mut draft = InvoiceDraft::new();
        let p = product("p1", "A", 10);
        assert!(matches!(
            draft.add(&p, 0, Money::from_major(1), StockPolicy::Strict),
            Err(CoreError::Validation(_))
        ));
        assert!(draft
            .add(&p, 1, Money::from_minor(-1), StockPolicy::Strict)
            .is_err());
        assert!(draft.is_empty());
    }

    #[test]
    fn test_huge_quantities_are_rejected() {
        let p = product("p1", "SCAN2829", 1500);
        let mut draft = InvoiceDraft::new();

        let err = draft
            .add(&p, i64::MAX / 1000, Money::from_major(1200), StockPolicy::Backorder)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(draft.is_empty());

        draft
            .add(&p, crate::MAX_LINE_QUANTITY, Money::from_major(1200), StockPolicy::Backorder)
            .unwrap();
        assert!(draft
            .add(&p, 1, Money::from_major(1200), StockPolicy::Backorder)
            .is_err());
        assert_eq!(draft.items[0].quantity, crate::MAX_LINE_QUANTITY);
        assert_eq!(
            draft.total(),
            Money::from_major(1200 * crate::MAX_LINE_QUANTITY)
        );
    }

    #[test]
    fn test_line_count_is_capped() {
        let mut draft = InvoiceDraft::new();
        for i in 0..MAX_INVOICE_LINES {
            let p = product(&format!("p{}", i), &format!("B{}", i), 10);
            draft.add(&p, 1, Money::from_major(1), StockPolicy::Strict).unwrap();
        }
        let extra = product("extra", "EXTRA", 10);
        assert!(draft
            .add(&extra, 1, Money::from_major(1), StockPolicy::Strict)
            .is_err());
        assert_eq!(draft.len(), MAX_INVOICE_LINES);
    }

    #[test]
    fn test_add_respects_stock_policy() {
        let mut draft = InvoiceDraft::new();
        let p = product("p1", "A", 2);
        draft.add(&p, 2, Money::from_major(1), StockPolicy::Strict).unwrap();

        let err = draft
            .add(&p, 1, Money::from_major(1), StockPolicy::Strict)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { available: 2, requested: 3, .. }
        ));

        draft
            .add(&p, 1, Money::from_major(1), StockPolicy::Backorder)
            .unwrap();
        assert_eq!(draft.items[0].quantity, 3);
    }

    #[test]
    fn test_remove_at() {
        let mut draft = InvoiceDraft::new();
        draft
            .add(&product("p1", "A", 10), 1, Money::from_major(5), StockPolicy::Strict)
            .unwrap();

        assert!(matches!(
            draft.remove_at(3),
            Err(CoreError::InvalidLineIndex { index: 3, len: 1 })
        ));
        let removed = draft.remove_at(0).unwrap();
        assert_eq!(removed.product_id, "p1");
        assert!(draft.is_empty());
    }

    #[test]
    fn test_empty_draft_cannot_become_invoice() {
        let draft = InvoiceDraft::new();
        assert!(matches!(
            draft.to_invoice("1".to_string(), Utc::now()),
            Err(CoreError::EmptyInvoice)
        ));
    }

    #[test]
    fn test_totals_without_tax() {
        let t = InvoiceTotals::compute(Money::from_major(2400), TaxRate::zero());
        assert!(!t.has_tax());
        assert_eq!(t.grand_total, Money::from_major(2400));
    }

    #[test]
    fn test_next_invoice_id_never_goes_back() {
        assert_eq!(next_invoice_id(Some("2000"), 1000), "2001");
        assert_eq!(next_invoice_id(Some("garbage"), 1000), "1000");
        assert_eq!(next_invoice_id(Some("999"), 1000), "1000");
    }

    #[test]
    fn test_matches_search() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 10, 0, 0).unwrap();
        let p = product("p1", "A", 10);
        let invoice = Invoice::new(
            "1710000000000".to_string(),
            date,
            vec![InvoiceItem::new(&p, 2, Money::from_major(1200))],
        );

        assert!(matches_search(&invoice, ""));
        assert!(matches_search(&invoice, "17100"));
        assert!(matches_search(&invoice, "2024-03-09"));
        assert!(matches_search(&invoice, "2400"));
        assert!(!matches_search(&invoice, "9999"));
    }

    #[test]
    fn test_paginate() {
        let page = paginate((1..=12).collect::<Vec<_>>(), 3, 5);
        assert_eq!(page.items, vec![11, 12]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 12);

        let clamped = paginate((1..=12).collect::<Vec<_>>(), 9, 5);
        assert_eq!(clamped.page, 3);

        let empty = paginate(Vec::<i32>::new(), 1, 5);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.items.is_empty());
    }
}
