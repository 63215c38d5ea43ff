//! # Domain Types
//!
//! Core domain types used throughout Aurum POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   MetalRates    │   │    Invoice      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  gold / gram    │   │  id (UUID)      │       │
//! │  │  barcode (biz)  │   │  silver / gram  │   │  invoice_number │       │
//! │  │  category       │   │  updated_at     │   │  customer       │       │
//! │  │  weight_grams   │   └─────────────────┘   │  lines, total   │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │    Category     │   │  InvoiceLine    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Gold   (metal) │   │  frozen snapshot│       │
//! │  │  300 = 3% GST   │   │  Silver (metal) │   │  of a cart line │       │
//! │  └─────────────────┘   │  Imitation      │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (barcode, invoice_number) - human-readable, printed on tags

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::MakingChargeMode;
use crate::{MAX_PRICE_RUPEES, MAX_WEIGHT_GRAMS};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 300 bps = 3% (GST on jewelry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Flat GST applied to every jewelry line: 3%.
    pub const JEWELLERY_GST: TaxRate = TaxRate(300);

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact percentage (300 bps → 3.00).
    pub fn percentage(&self) -> Decimal {
        Decimal::new(self.0 as i64, 2)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::JEWELLERY_GST
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category.
///
/// Metal categories are priced by `rate per gram × weight`; imitation pieces
/// carry a flat selling price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gold,
    Silver,
    Imitation,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 3] = [Category::Gold, Category::Silver, Category::Imitation];

    /// Storage / wire representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Gold => "gold",
            Category::Silver => "silver",
            Category::Imitation => "imitation",
        }
    }

    /// Whether this category is priced from a metal rate.
    pub const fn is_metal(&self) -> bool {
        matches!(self, Category::Gold | Category::Silver)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gold" => Ok(Category::Gold),
            "silver" => Ok(Category::Silver),
            "imitation" => Ok(Category::Imitation),
            other => Err(ValidationError::invalid(
                "category",
                format!("unknown category '{other}' (expected gold, silver or imitation)"),
            )),
        }
    }
}

// =============================================================================
// Metal Rates
// =============================================================================

/// Current metal prices per gram.
///
/// ## User Workflow
/// ```text
/// Morning: shop owner reads the day's bullion board
///      │
///      ▼
/// `aurum rates set --gold 6900 --silver 86`
///      │
///      ▼
/// Every scan after that prices metal items at the new rate.
/// Lines already in a cart keep the price they were scanned at.
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetalRates {
    /// Gold price per gram.
    pub gold_per_gram: Money,

    /// Silver price per gram.
    pub silver_per_gram: Money,

    /// When the rates were last changed.
    pub updated_at: DateTime<Utc>,
}

impl MetalRates {
    /// Default gold rate (₹ per gram).
    pub const DEFAULT_GOLD_PER_GRAM: i64 = 6850;

    /// Default silver rate (₹ per gram).
    pub const DEFAULT_SILVER_PER_GRAM: i64 = 85;

    /// Returns the per-gram rate for a metal category, `None` for imitation.
    pub fn rate_for(&self, category: Category) -> Option<Money> {
        match category {
            Category::Gold => Some(self.gold_per_gram),
            Category::Silver => Some(self.silver_per_gram),
            Category::Imitation => None,
        }
    }
}

impl Default for MetalRates {
    fn default() -> Self {
        MetalRates {
            gold_per_gram: Money::from_rupees(Self::DEFAULT_GOLD_PER_GRAM),
            silver_per_gram: Money::from_rupees(Self::DEFAULT_SILVER_PER_GRAM),
            updated_at: Utc::now(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A registered piece of jewelry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Tag barcode - business identifier, unique.
    pub barcode: String,

    /// Display name shown on the invoice.
    pub name: String,

    pub category: Category,

    /// Net metal weight. Required for gold and silver.
    pub weight_grams: Option<Decimal>,

    /// Fineness grade, descriptive only (`22K`, `925`).
    pub purity: Option<String>,

    /// What the shop paid (imitation items).
    pub purchase_price: Option<Money>,

    /// Flat selling price (imitation items).
    pub selling_price: Option<Money>,

    /// Units on the shelf.
    pub quantity: i64,

    /// Stock level at or below which the item raises an alert.
    pub reorder_level: i64,

    /// Whether product is active (soft delete).
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price of one unit before making charge and tax.
    ///
    /// ## Pricing Rule
    /// ```text
    /// gold / silver:  rate_per_gram × weight_grams
    /// imitation:      selling_price
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use aurum_core::types::{Category, MetalRates, Product};
    /// use aurum_core::money::Money;
    /// use chrono::Utc;
    /// use rust_decimal::Decimal;
    ///
    /// let ring = Product {
    ///     id: "p-1".into(),
    ///     barcode: "JWL12345678".into(),
    ///     name: "Gold Ring".into(),
    ///     category: Category::Gold,
    ///     weight_grams: Some(Decimal::new(105, 1)), // 10.5g
    ///     purity: Some("22K".into()),
    ///     purchase_price: None,
    ///     selling_price: None,
    ///     quantity: 5,
    ///     reorder_level: 3,
    ///     is_active: true,
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// };
    ///
    /// let price = ring.unit_base_price(&MetalRates::default()).unwrap();
    /// assert_eq!(price, Money::from_rupees(71925));
    /// ```
    pub fn unit_base_price(&self, rates: &MetalRates) -> CoreResult<Money> {
        let price = match rates.rate_for(self.category) {
            Some(rate) => {
                let weight = self.weight_grams.ok_or_else(|| CoreError::MissingWeight {
                    barcode: self.barcode.clone(),
                    category: self.category,
                })?;
                rate.checked_mul(weight)
                    .ok_or_else(|| CoreError::PriceOutOfRange(self.barcode.clone()))?
            }
            None => self.selling_price.ok_or_else(|| CoreError::MissingPrice {
                barcode: self.barcode.clone(),
            })?,
        };

        // Stored rows are not re-validated on read.
        if price.amount() > max_unit_price() || price.is_negative() {
            return Err(CoreError::PriceOutOfRange(self.barcode.clone()));
        }
        Ok(price)
    }

    /// Checks if the shelf holds at least `quantity` units.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }
}

/// Highest unit price a line accepts: the top rate on the heaviest piece.
fn max_unit_price() -> Decimal {
    Decimal::from(MAX_PRICE_RUPEES) * Decimal::from(MAX_WEIGHT_GRAMS)
}

/// Registration input for a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub barcode: String,
    pub name: String,
    pub category: Category,
    pub weight_grams: Option<Decimal>,
    pub purity: Option<String>,
    pub purchase_price: Option<Money>,
    pub selling_price: Option<Money>,
    pub quantity: i64,
    pub reorder_level: i64,
}

// =============================================================================
// Customer
// =============================================================================

/// Buyer details printed on the invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub email: Option<String>,
}

// =============================================================================
// Invoice
// =============================================================================

/// A cart line frozen at the moment of invoicing.
/// Uses snapshot pattern: later rate or catalog changes never alter it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub product_id: String,
    /// Barcode at time of sale (frozen).
    pub barcode: String,
    /// Product name at time of sale (frozen).
    pub name: String,
    pub category: Category,
    pub purity: Option<String>,
    pub weight_grams: Option<Decimal>,
    pub quantity: i64,
    pub unit_base_price: Money,
    pub making_charge_mode: MakingChargeMode,
    pub making_charge_value: Decimal,
    pub making_charge: Money,
    pub tax: Money,
    pub line_total: Money,
}

/// Payload handed to the invoice store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvoice {
    pub customer: Customer,
    pub lines: Vec<InvoiceLine>,
    /// Exact sum of the line totals.
    pub total: Money,
}

/// A persisted invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Printed number, `INV-YYYY-NNNN`, sequential per calendar year.
    pub invoice_number: String,

    pub customer: Customer,
    pub lines: Vec<InvoiceLine>,
    pub total: Money,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
