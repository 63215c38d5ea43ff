//! # Error Types
//!
//! Domain-specific error types for aurum-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  aurum-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Missing or malformed input                     │
//! │                                                                         │
//! │  aurum-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → terminal              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::Category;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product is registered under the scanned code.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but has been withdrawn from sale.
    #[error("Product {0} is not available for sale")]
    ProductInactive(String),

    /// Insufficient stock to complete sale.
    ///
    /// ## When This Occurs
    /// - Scanning more units than are on the shelf
    /// - Invoice submission racing another sale of the last piece
    #[error("Insufficient stock for {barcode}: available {available}, requested {requested}")]
    InsufficientStock {
        barcode: String,
        available: i64,
        requested: i64,
    },

    /// A metal product has no weight recorded, so it cannot be priced.
    #[error("{barcode} is a {category} item without a weight")]
    MissingWeight { barcode: String, category: Category },

    /// A non-metal product has no selling price recorded.
    #[error("{barcode} has no selling price")]
    MissingPrice { barcode: String },

    /// The unit price works out beyond what a line can be priced at.
    #[error("Price of {0} is out of range")]
    PriceOutOfRange(String),

    /// Cart line id is unknown.
    #[error("Line {0} not in cart")]
    LineNotFound(String),

    /// Invoice requested for an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// The catalog or invoice store behind a port failed.
    #[error("Backend failure: {0}")]
    Backend(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when operator input doesn't meet requirements and are raised
/// before any business logic runs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Decimal value is above its upper bound.
    #[error("{field} must not exceed {max}")]
    TooLarge { field: String, max: Decimal },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid phone, unknown category).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidFormat`].
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            barcode: "JWL55667788".to_string(),
            available: 2,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for JWL55667788: available 2, requested 3"
        );

        let err = CoreError::MissingWeight {
            barcode: "JWL12345678".to_string(),
            category: Category::Gold,
        };
        assert_eq!(err.to_string(), "JWL12345678 is a gold item without a weight");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("customer name").to_string(),
            "customer name is required"
        );
        assert_eq!(
            ValidationError::MustNotBeNegative {
                field: "making charge".to_string()
            }
            .to_string(),
            "making charge must not be negative"
        );
    }

    #[test]
    fn test_too_large_message() {
        let err = ValidationError::TooLarge {
            field: "weight".to_string(),
            max: Decimal::from(100_000),
        };
        assert_eq!(err.to_string(), "weight must not exceed 100000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("phone").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
