//! # Repository Module
//!
//! Database repository implementations for Aurum POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command / SaleSession                                              │
//! │       │                                                                 │
//! │       │  db.products().get_by_barcode("JWL12345678")                    │
//! │       ▼                                                                 │
//! │  ProductRepository ── also serves as ProductCatalog                     │
//! │  InvoiceRepository ── also serves as InvoiceStore                       │
//! │  MetalRateRepository                                                    │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decimal Columns
//! Money, weights and making values are stored as decimal TEXT and parsed
//! back with [`decimal_column`]. A value that fails to parse surfaces as
//! [`DbError::CorruptValue`] naming the column.

pub mod invoice;
pub mod product;
pub mod rates;

use aurum_core::{Category, Money};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{DbError, DbResult};

pub(crate) fn decimal_column(column: &str, value: &str) -> DbResult<Decimal> {
    Decimal::from_str(value).map_err(|_| DbError::corrupt(column, value))
}

pub(crate) fn optional_decimal_column(column: &str, value: Option<&str>) -> DbResult<Option<Decimal>> {
    value.map(|v| decimal_column(column, v)).transpose()
}

pub(crate) fn money_column(column: &str, value: &str) -> DbResult<Money> {
    decimal_column(column, value).map(Money::from_decimal)
}

pub(crate) fn optional_money_column(column: &str, value: Option<&str>) -> DbResult<Option<Money>> {
    value.map(|v| money_column(column, v)).transpose()
}

pub(crate) fn category_column(value: &str) -> DbResult<Category> {
    Category::from_str(value).map_err(|_| DbError::corrupt("category", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_columns() {
        assert_eq!(
            money_column("total", "2373.525").unwrap().amount().to_string(),
            "2373.525"
        );
        assert_eq!(optional_decimal_column("weight_grams", None).unwrap(), None);
        assert!(matches!(
            decimal_column("total", "12,50"),
            Err(DbError::CorruptValue { .. })
        ));
        assert!(category_column("platinum").is_err());
    }
}
