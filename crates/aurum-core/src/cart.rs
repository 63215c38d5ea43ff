//! # Cart
//!
//! The in-progress sale: a list of priced jewelry lines.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action          Sale Session            Cart Change           │
//! │  ───────────────          ────────────            ───────────           │
//! │                                                                         │
//! │  Scan tag ───────────────► scan() ──────────────► lines.push(line)     │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ───► lines[i].qty = n     │
//! │                                                                         │
//! │  Remove ─────────────────► remove_line() ───────► lines.remove(i)      │
//! │                                                                         │
//! │  Invoice ────────────────► generate_invoice() ──► lines.clear()        │
//! │                                                                         │
//! │  NOTE: totals are never stored. Every read reprices every line.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{price_line, LinePricing, MakingCharge};
use crate::types::{Category, InvoiceLine, Product};
use crate::validation::{validate_cart_size, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One scanned piece in the cart.
///
/// ## Design Notes
/// - `line_id`: the same tag scanned twice yields two lines, each with its
///   own id
/// - product fields are a frozen snapshot taken at scan time
/// - `unit_base_price` and `making` are the pricing inputs; the making
///   charge, tax and line total are derived on every read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub line_id: String,
    pub product_id: String,
    pub barcode: String,
    pub name: String,
    pub category: Category,
    pub purity: Option<String>,
    pub weight_grams: Option<Decimal>,

    /// Metal rate × weight, or the flat price, at scan time (frozen).
    pub unit_base_price: Money,

    quantity: i64,

    /// Making charge configuration in force when the line was scanned.
    pub making: MakingCharge,
}

impl CartLineItem {
    /// Creates a line from a product snapshot.
    ///
    /// ## Price Freezing
    /// `unit_base_price` is captured now. A later rate change does not
    /// touch lines already in the cart.
    pub fn from_product(
        product: &Product,
        unit_base_price: Money,
        quantity: i64,
        making: MakingCharge,
    ) -> Self {
        CartLineItem {
            line_id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            barcode: product.barcode.clone(),
            name: product.name.clone(),
            category: product.category,
            purity: product.purity.clone(),
            weight_grams: product.weight_grams,
            unit_base_price,
            quantity,
            making,
        }
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Full derived pricing for this line.
    pub fn pricing(&self) -> LinePricing {
        price_line(self.unit_base_price, self.quantity, self.making)
    }

    pub fn base_amount(&self) -> Money {
        self.pricing().base_amount
    }

    pub fn making_charge(&self) -> Money {
        self.pricing().making_charge
    }

    pub fn tax(&self) -> Money {
        self.pricing().tax
    }

    pub fn line_total(&self) -> Money {
        self.pricing().line_total
    }

    /// Freezes this line for the invoice.
    pub fn to_invoice_line(&self) -> InvoiceLine {
        let pricing = self.pricing();
        InvoiceLine {
            product_id: self.product_id.clone(),
            barcode: self.barcode.clone(),
            name: self.name.clone(),
            category: self.category,
            purity: self.purity.clone(),
            weight_grams: self.weight_grams,
            quantity: self.quantity,
            unit_base_price: self.unit_base_price,
            making_charge_mode: self.making.mode,
            making_charge_value: self.making.value,
            making_charge: pricing.making_charge,
            tax: pricing.tax,
            line_total: pricing.line_total,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The sale cart.
///
/// ## Invariants
/// - Every line has 1..=999 units
/// - At most 100 lines
/// - `total()` always equals the sum of `line_total()` over the lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLineItem>,

    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Appends a line and returns its id.
    ///
    /// ## Returns
    /// - `Err(CoreError::Validation)` if the quantity is outside 1..=999
    /// - `Err(CoreError::CartTooLarge)` if the cart already holds 100 lines
    pub fn add_line(&mut self, line: CartLineItem) -> CoreResult<String> {
        validate_quantity(line.quantity)?;
        if validate_cart_size(self.lines.len()).is_err() {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        let id = line.line_id.clone();
        self.lines.push(line);
        Ok(id)
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: rejected, the line is left exactly as it was
    /// - `quantity > 999`: rejected
    /// - unknown line id: `CoreError::LineNotFound`
    ///
    /// Derived amounts follow automatically since they are recomputed on read.
    pub fn update_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        validate_quantity(quantity)?;

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.line_id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line and returns it.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<CartLineItem> {
        let index = self
            .lines
            .iter()
            .position(|l| l.line_id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;
        Ok(self.lines.remove(index))
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn line(&self, line_id: &str) -> Option<&CartLineItem> {
        self.lines.iter().find(|l| l.line_id == line_id)
    }

    /// Returns the number of lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of base amounts (before making charge and tax).
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLineItem::base_amount).sum()
    }

    pub fn making_total(&self) -> Money {
        self.lines.iter().map(CartLineItem::making_charge).sum()
    }

    pub fn tax_total(&self) -> Money {
        self.lines.iter().map(CartLineItem::tax).sum()
    }

    /// Grand total, recomputed from the lines on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Summary of the cart.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    pub making_total: Money,
    pub tax_total: Money,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            making_total: cart.making_total(),
            tax_total: cart.tax_total(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
