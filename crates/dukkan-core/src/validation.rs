//! # Validation Module
//!
//! Input validation for everything a user can type.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command (apps/dukkan)                                        │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, positive amounts, tax range                      │
//! │  └── Failure → error notification, input kept, nothing written         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Repository (dukkan-db)                                       │
//! │  └── Barcode uniqueness, debtor existence (needs stored state)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dukkan_core::validation::{validate_barcode, validate_quantity};
//!
//! assert!(validate_barcode("SCAN2829").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewDebtor, NewProduct, NewTransaction, ProductUpdate};
use crate::{MAX_ENTRY_AMOUNT, MAX_LINE_QUANTITY, MAX_SEARCH_LEN, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_BARCODE_LEN: usize = 64;
const MAX_NAME_LEN: usize = 200;
const MAX_NOTES_LEN: usize = 500;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a barcode.
///
/// ## Rules
/// - Must not be blank
/// - At most 64 characters
///
/// Any characters are accepted; hand-typed codes in shops are not always
/// EAN digits.
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();
    if barcode.is_empty() {
        return Err(ValidationError::required("barcode"));
    }
    if barcode.chars().count() > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: MAX_BARCODE_LEN,
        });
    }
    Ok(())
}

/// Validates a product or debtor name.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::required(field));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if phone.trim().is_empty() {
        return Err(ValidationError::required("phone"));
    }
    Ok(())
}

pub fn validate_notes(notes: &str) -> ValidationResult<()> {
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }
    Ok(())
}

/// Validates a search term and returns it trimmed.
///
/// Empty is fine and means "everything".
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();
    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }
    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn out_of_range(field: &str, min: i64, max: i64) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min,
        max,
    }
}

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive
/// - Must not exceed MAX_LINE_QUANTITY (1,000,000)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::positive("quantity"));
    }
    if qty > MAX_LINE_QUANTITY {
        return Err(out_of_range("quantity", 1, MAX_LINE_QUANTITY));
    }
    Ok(())
}

/// Validates a stock count (0..=MAX_LINE_QUANTITY).
pub fn validate_stock(field: &str, qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    if qty > MAX_LINE_QUANTITY {
        return Err(out_of_range(field, 0, MAX_LINE_QUANTITY));
    }
    Ok(())
}

/// Validates a shelf price. A product must cost something.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::positive("price"));
    }
    if price.minor() > MAX_UNIT_PRICE {
        return Err(out_of_range("price", 1, MAX_UNIT_PRICE));
    }
    Ok(())
}

/// Validates the sale price of an invoice line. Zero is a giveaway and allowed.
pub fn validate_line_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    if price.minor() > MAX_UNIT_PRICE {
        return Err(out_of_range("price", 0, MAX_UNIT_PRICE));
    }
    Ok(())
}

/// Validates a ledger amount (> 0, at most MAX_ENTRY_AMOUNT minor units).
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::positive("amount"));
    }
    if amount.minor() > MAX_ENTRY_AMOUNT {
        return Err(out_of_range("amount", 1, MAX_ENTRY_AMOUNT));
    }
    Ok(())
}

/// Validates a tax percentage.
///
/// ## Rules
/// - Must be a finite number
/// - Must be between 0 and 100
pub fn validate_tax_percent(tax: f64) -> ValidationResult<()> {
    if !tax.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "tax".to_string(),
            reason: "must be a number".to_string(),
        });
    }
    if !(0.0..=100.0).contains(&tax) {
        return Err(ValidationError::OutOfRange {
            field: "tax".to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

// =============================================================================
// Input Validators
// =============================================================================

/// Validates a new product form: barcode, name, positive price, stock >= 0.
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_barcode(&input.barcode)?;
    validate_name("name", &input.name)?;
    validate_price(input.price)?;
    validate_stock("quantity", input.quantity)
}

pub fn validate_product_update(input: &ProductUpdate) -> ValidationResult<()> {
    validate_barcode(&input.barcode)?;
    validate_name("name", &input.name)?;
    validate_price(input.price)?;
    validate_stock("quantity", input.quantity)?;
    validate_stock("available", input.available)
}

pub fn validate_new_debtor(input: &NewDebtor) -> ValidationResult<()> {
    validate_name("name", &input.name)?;
    validate_phone(&input.phone)
}

pub fn validate_new_transaction(input: &NewTransaction) -> ValidationResult<()> {
    if input.debtor_id.trim().is_empty() {
        return Err(ValidationError::required("debtorId"));
    }
    validate_amount(input.amount)?;
    validate_notes(&input.notes)
}
