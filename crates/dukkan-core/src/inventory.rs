//! # Inventory Rules
//!
//! Stock checks, stock decrement on sale, barcode uniqueness, and search.
//!
//! ```text
//! save invoice
//!     │
//!     ▼
//! apply_sale(products, lines, policy)
//!     ├── every line's product exists?          else ProductNotFound
//!     ├── every product has enough available?   else InsufficientStock
//!     └── all checks pass → decrement each `available`
//! ```
//!
//! The checks run over the whole invoice before anything is decremented, so
//! a rejected sale leaves the product list untouched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{InvoiceItem, Product};

/// What to do when a sale asks for more than is on the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockPolicy {
    /// Reject the sale.
    #[default]
    Strict,
    /// Allow it; `available` goes negative and reads as a backorder.
    Backorder,
}

impl StockPolicy {
    pub fn from_allow_oversell(allow: bool) -> Self {
        if allow {
            StockPolicy::Backorder
        } else {
            StockPolicy::Strict
        }
    }

    /// Checks that `requested` units of `product` may be sold.
    pub fn check(&self, product: &Product, requested: i64) -> CoreResult<()> {
        if *self == StockPolicy::Strict && !product.can_sell(requested) {
            return Err(CoreError::InsufficientStock {
                barcode: product.barcode.clone(),
                available: product.available,
                requested,
            });
        }
        Ok(())
    }
}

/// Decrements `available` for every line of a sale.
///
/// Lines for the same product are summed before the stock check.
pub fn apply_sale(
    products: &mut [Product],
    items: &[InvoiceItem],
    policy: StockPolicy,
) -> CoreResult<()> {
    let mut requested: HashMap<&str, i64> = HashMap::new();
    for item in items {
        *requested.entry(item.product_id.as_str()).or_default() += item.quantity;
    }

    let mut positions = Vec::with_capacity(requested.len());
    for (product_id, qty) in &requested {
        let idx = products
            .iter()
            .position(|p| p.id == *product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;
        policy.check(&products[idx], *qty)?;
        positions.push((idx, *qty));
    }

    for (idx, qty) in positions {
        products[idx].available -= qty;
    }
    Ok(())
}

/// Rejects `barcode` if another product (other than `except_id`) uses it.
pub fn ensure_unique_barcode(
    products: &[Product],
    barcode: &str,
    except_id: Option<&str>,
) -> Result<(), ValidationError> {
    let barcode = barcode.trim();
    let taken = products
        .iter()
        .any(|p| p.barcode == barcode && Some(p.id.as_str()) != except_id);
    if taken {
        return Err(ValidationError::Duplicate {
            field: "barcode".to_string(),
            value: barcode.to_string(),
        });
    }
    Ok(())
}

/// Case-insensitive substring match on name or barcode. Empty matches all.
pub fn matches_search(product: &Product, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty()
        || product.name.to_lowercase().contains(&term)
        || product.barcode.to_lowercase().contains(&term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: &str, barcode: &str, name: &str, available: i64) -> Product {
        Product {
            id: id.to_string(),
            barcode: barcode.to_string(),
            name: name.to_string(),
            quantity: available,
            price: Money::from_major(1200),
            available,
        }
    }

    #[test]
    fn test_sale_decrements_available() {
        let mut products = vec![product("p1", "SCAN2829", "شاحن", 1500)];
        let line = InvoiceItem::new(&products[0], 2, Money::from_major(1200));

        apply_sale(&mut products, &[line], StockPolicy::Strict).unwrap();

        assert_eq!(products[0].available, 1498);
        assert_eq!(products[0].quantity, 1500);
    }

    #[test]
    fn test_rejected_sale_changes_nothing() {
        let mut products = vec![product("p1", "A", "a", 5), product("p2", "B", "b", 1)];
        let lines = vec![
            InvoiceItem::new(&products[0], 2, Money::from_major(1)),
            InvoiceItem::new(&products[1], 2, Money::from_major(1)),
        ];

        let err = apply_sale(&mut products, &lines, StockPolicy::Strict).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { ref barcode, .. } if barcode == "B"));
        assert_eq!(products[0].available, 5);
        assert_eq!(products[1].available, 1);
    }

    #[test]
    fn test_backorder_goes_negative() {
        let mut products = vec![product("p1", "A", "a", 1)];
        let line = InvoiceItem::new(&products[0], 3, Money::from_major(1));
        apply_sale(&mut products, &[line], StockPolicy::Backorder).unwrap();
        assert_eq!(products[0].available, -2);
    }

    #[test]
    fn test_unknown_product() {
        let ghost = product("gone", "G", "g", 1);
        let mut products = vec![product("p1", "A", "a", 1)];
        let line = InvoiceItem::new(&ghost, 1, Money::from_major(1));
        assert!(matches!(
            apply_sale(&mut products, &[line], StockPolicy::Strict),
            Err(CoreError::ProductNotFound(id)) if id == "gone"
        ));
    }

    #[test]
    fn test_unique_barcode() {
        let products = vec![product("p1", "SCAN2829", "شاحن", 1)];
        assert!(ensure_unique_barcode(&products, "SCAN2829", None).is_err());
        assert!(ensure_unique_barcode(&products, " SCAN2829 ", None).is_err());
        assert!(ensure_unique_barcode(&products, "SCAN2829", Some("p1")).is_ok());
        assert!(ensure_unique_barcode(&products, "OTHER", None).is_ok());
    }

    #[test]
    fn test_matches_search() {
        let p = product("p1", "SCAN2829", "شاحن سريع", 1);
        assert!(matches_search(&p, "شاحن"));
        assert!(matches_search(&p, "scan"));
        assert!(matches_search(&p, ""));
        assert!(!matches_search(&p, "كابل"));
    }
}
