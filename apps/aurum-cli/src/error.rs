//! # Application Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Aurum POS                              │
//! │                                                                         │
//! │  aurum sale invoice --item JWL12345678 ...                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Database Error? ─── DbError::QueryFailed("...") ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Business Error? ─── CoreError::EmptyCart ──────── AppError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: error[INSUFFICIENT_STOCK]: Insufficient stock for ...          │
//! │  exit code 1                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal details (SQL errors, corrupt rows) are logged through `tracing`
//! and replaced with a generic message for the operator.

use aurum_core::{CoreError, ValidationError};
use aurum_db::DbError;
use serde::Serialize;

use crate::config::ConfigError;

/// Error returned from CLI commands.
///
/// ## Serialization
/// With `--json`, a failure is printed as:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: JWL12345678"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, invoice or rate row not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Duplicate barcode
    Conflict,

    /// Database operation failed
    DatabaseError,

    /// Business rule prevented the operation
    BusinessLogic,

    /// Cart operation failed
    CartError,

    /// Insufficient stock
    InsufficientStock,

    /// Invalid AURUM_* configuration
    ConfigError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Result type for CLI commands.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Creates a new application error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to application errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => AppError::new(
                ErrorCode::Conflict,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::InsufficientStock {
                barcode,
                available,
                requested,
            } => AppError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    barcode, available, requested
                ),
            ),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                AppError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::CorruptValue { column, value } => {
                tracing::error!(column = %column, value = %value, "Corrupt value in database");
                AppError::new(ErrorCode::DatabaseError, "Database contains an unreadable value")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to application errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(barcode) => AppError::not_found("Product", &barcode),
            CoreError::InsufficientStock { .. } => {
                AppError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::ProductInactive(_)
            | CoreError::MissingWeight { .. }
            | CoreError::MissingPrice { .. }
            | CoreError::PriceOutOfRange(_) => {
                AppError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::LineNotFound(_) | CoreError::EmptyCart | CoreError::CartTooLarge { .. } => {
                AppError::new(ErrorCode::CartError, err.to_string())
            }
            CoreError::QuantityTooLarge { .. } => {
                AppError::new(ErrorCode::ValidationError, err.to_string())
            }
            CoreError::Backend(e) => {
                tracing::error!("Backend failure: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            CoreError::Validation(e) => AppError::from(e),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_core::Category;

    #[test]
    fn test_display_includes_code() {
        let err = AppError::not_found("Invoice", "INV-2026-0009");
        assert_eq!(err.to_string(), "error[NOT_FOUND]: Invoice not found: INV-2026-0009");
    }

    #[test]
    fn test_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&AppError::validation("bad")).unwrap();
        assert!(json.contains("\"VALIDATION_ERROR\""));
        assert_eq!(ErrorCode::InsufficientStock.as_str(), "INSUFFICIENT_STOCK");
    }

    #[test]
    fn test_from_db_error() {
        let err = AppError::from(DbError::duplicate("barcode", "JWL1"));
        assert_eq!(err.code, ErrorCode::Conflict);

        let err = AppError::from(DbError::QueryFailed("syntax error near SELEC".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("SELEC"));
    }

    #[test]
    fn test_from_core_error() {
        let err = AppError::from(CoreError::InsufficientStock {
            barcode: "JWL1".into(),
            available: 1,
            requested: 2,
        });
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err = AppError::from(CoreError::MissingWeight {
            barcode: "JWL1".into(),
            category: Category::Gold,
        });
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        assert_eq!(AppError::from(CoreError::EmptyCart).code, ErrorCode::CartError);
        assert_eq!(
            AppError::from(CoreError::Validation(ValidationError::required("phone"))).code,
            ErrorCode::ValidationError
        );
    }
}
