//! # Validation Module
//!
//! Input validation utilities for Aurum POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  ├── Type validation (numbers, decimals, enums)                        │
//! │  └── Immediate usage errors                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Core (Rust)                                                  │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints (barcode, invoice number)                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aurum_core::validation::{validate_barcode, validate_quantity};
//!
//! assert!(validate_barcode("JWL12345678").is_ok());
//! assert!(validate_quantity(5).is_ok());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::{MakingCharge, MakingChargeMode};
use crate::types::{Customer, NewProduct};
use crate::{
    MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_MAKING_PERCENT, MAX_PRICE_RUPEES, MAX_WEIGHT_GRAMS,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_BARCODE_LEN: usize = 50;
const MAX_NAME_LEN: usize = 200;
const MAX_QUERY_LEN: usize = 100;
const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a tag barcode.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only letters, digits, hyphens, underscores
///
/// ## Example
/// ```rust
/// use aurum_core::validation::validate_barcode;
///
/// assert!(validate_barcode("JWL-0001").is_ok());
/// assert!(validate_barcode("").is_err());
/// assert!(validate_barcode("has space").is_err());
/// ```
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

    if !barcode
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::invalid(
            "barcode",
            "must contain only letters, numbers, hyphens, and underscores",
        ));
    }

    Ok(())
}

/// Validates a product name (non-empty, at most 200 characters).
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates a phone number.
///
/// Accepts 10 to 15 digits with an optional leading `+` and any
/// spaces or hyphens between them: `+91 98765-43210`.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::required("phone"));
    }

    let body = phone.strip_prefix('+').unwrap_or(phone);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return Err(ValidationError::invalid(
            "phone",
            "must contain only digits, spaces, hyphens and a leading +",
        ));
    }

    let digits = body.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(ValidationError::invalid(
            "phone",
            format!("must have {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits"),
        ));
    }

    Ok(())
}

/// Validates an email address. Only the `@` is checked.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::invalid("email", "must look like name@domain")),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Sale: Scan Item                                                        │
/// │                                                                         │
/// │  Operator enters quantity: 2                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(2) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → Proceed with scan                                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a metal weight in grams (> 0, at most 100 kg).
pub fn validate_weight(grams: Decimal) -> ValidationResult<()> {
    if grams <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "weight".to_string(),
        });
    }
    at_most("weight", grams, Decimal::from(MAX_WEIGHT_GRAMS))
}

/// Validates a price. Zero is allowed.
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    at_most(field, price.amount(), Decimal::from(MAX_PRICE_RUPEES))
}

/// Validates a metal rate per gram (> 0).
pub fn validate_metal_rate(field: &str, rate: Money) -> ValidationResult<()> {
    if rate.is_negative() || rate.is_zero() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    at_most(field, rate.amount(), Decimal::from(MAX_PRICE_RUPEES))
}

/// Validates a making charge configuration.
///
/// ```text
/// percentage → 0 ..= 1000 (%)
/// fixed      → 0 ..= MAX_PRICE_RUPEES per unit
/// ```
pub fn validate_making_charge(making: &MakingCharge) -> ValidationResult<()> {
    if making.value < Decimal::ZERO {
        return Err(ValidationError::MustNotBeNegative {
            field: "making charge".to_string(),
        });
    }
    let max = match making.mode {
        MakingChargeMode::Percentage => MAX_MAKING_PERCENT,
        MakingChargeMode::Fixed => MAX_PRICE_RUPEES,
    };
    at_most("making charge", making.value, Decimal::from(max))
}

/// Validates units received into stock (> 0, no per-line cap).
pub fn validate_restock_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

fn at_most(field: &str, value: Decimal, max: Decimal) -> ValidationResult<()> {
    if value > max {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates customer details before invoicing.
///
/// ## Rules
/// - Name is required (at most 200 characters)
/// - Phone is required and well-formed
/// - Email, when given, must contain `@`
pub fn validate_customer(customer: &Customer) -> ValidationResult<()> {
    let name = customer.name.trim();
    if name.is_empty() {
        return Err(ValidationError::required("customer name"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    validate_phone(&customer.phone)?;

    if let Some(email) = customer.email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email)?;
    }

    Ok(())
}

/// Validates a product registration.
///
/// ## Category Rules
/// ```text
/// gold / silver  → weight required (> 0)
/// imitation      → selling price required
/// any            → prices ≥ 0, stock ≥ 0, reorder level ≥ 0
/// ```
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_barcode(&product.barcode)?;
    validate_product_name(&product.name)?;

    if product.category.is_metal() {
        match product.weight_grams {
            Some(w) => validate_weight(w)?,
            None => return Err(ValidationError::required("weight")),
        }
    } else {
        if product.selling_price.is_none() {
            return Err(ValidationError::required("selling price"));
        }
        if let Some(w) = product.weight_grams {
            validate_weight(w)?;
        }
    }

    if let Some(price) = product.purchase_price {
        validate_price("purchase price", price)?;
    }
    if let Some(price) = product.selling_price {
        validate_price("selling price", price)?;
    }

    if product.quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }
    if product.reorder_level < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "reorder level".to_string(),
        });
    }

    Ok(())
}

/// Validates cart size before adding another line.
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
