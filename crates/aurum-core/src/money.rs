//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts exactly.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    79117.5 × 0.03 = 2373.5249999999996  ❌ WRONG!                       │
//! │                                                                         │
//! │  Jewelry pricing multiplies rates by fractional weights                 │
//! │  (10.5g × ₹6850) and then takes 3% GST on the result, so               │
//! │  intermediate values routinely need three or more decimal places.      │
//! │                                                                         │
//! │  OUR SOLUTION: Exact Decimal                                            │
//! │    79117.50 × 300 / 10000 = 2373.525 (exactly)                         │
//! │    Rounded to 2 places ONLY when shown to a person                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aurum_core::money::Money;
//!
//! // Create from paise or whole rupees
//! let price = Money::from_paise(109_950); // ₹1099.50
//! let making = Money::from_rupees(500);
//!
//! // Arithmetic operations
//! let doubled = price * 2;                // ₹2199.00
//! let total = price + making;             // ₹1599.50
//! assert_eq!(total.to_string(), "₹1599.50");
//!
//! // NEVER do this:
//! // let bad = Money::from_f64(1099.5); // NO SUCH METHOD EXISTS!
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount held at full decimal precision.
///
/// ## Design Decisions
/// - **Decimal (not float)**: Exact base-10 arithmetic, no binary drift
/// - **Full precision internally**: `2373.525` stays `2373.525` until display
/// - **Single field tuple struct**: Zero-cost wrapper, serde as a string
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  MetalRates.gold × weight ──┬──► CartLineItem.unit_base_price          │
/// │  Product.selling_price ─────┘          │                                │
/// │                                        ▼                                │
/// │                    making charge ──► GST ──► line total                 │
/// │                                                    │                    │
/// │                                  Cart.total ◄──────┘ ──► Invoice.total  │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use aurum_core::money::Money;
    ///
    /// let rate = Money::from_rupees(6850);
    /// assert_eq!(rate.to_string(), "₹6850.00");
    /// ```
    #[inline]
    pub fn from_rupees(rupees: i64) -> Self {
        Money(Decimal::from(rupees))
    }

    /// Creates a Money value from paise (1/100 rupee).
    ///
    /// ## Example
    /// ```rust
    /// use aurum_core::money::Money;
    ///
    /// let price = Money::from_paise(109_950);
    /// assert_eq!(price, Money::from_rupees(1099) + Money::from_paise(50));
    /// ```
    #[inline]
    pub fn from_paise(paise: i64) -> Self {
        Money(Decimal::new(paise, 2))
    }

    /// Wraps an exact decimal rupee amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the exact, unrounded rupee amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns `pct` percent of this amount, unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use aurum_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let base = Money::from_rupees(71925);
    /// assert_eq!(base.percent(Decimal::from(10)), Money::from_paise(719250));
    /// ```
    pub fn percent(&self, pct: Decimal) -> Money {
        Money(self.0 * pct / Decimal::ONE_HUNDRED)
    }

    /// Calculates tax at the given rate without rounding.
    ///
    /// ## Precision
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  NO ROUNDING AT THIS STEP                                           │
    /// │                                                                     │
    /// │  ₹79117.50 × 3% = ₹2373.525                                        │
    /// │                                                                     │
    /// │  Line totals and cart totals add exact values; the half paisa      │
    /// │  is only rounded away when the amount is printed. Rounding each    │
    /// │  line first would let the printed cart total drift from the sum    │
    /// │  of the exact lines.                                               │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use aurum_core::money::Money;
    /// use aurum_core::types::TaxRate;
    ///
    /// let taxable = Money::from_paise(7_911_750); // ₹79117.50
    /// let tax = taxable.calculate_tax(TaxRate::JEWELLERY_GST);
    /// assert_eq!(tax.amount().to_string(), "2373.525");
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // bps / 10000 = fraction: 300 bps = 0.03
        Money(self.0 * Decimal::from(rate.bps()) / Decimal::from(10_000u32))
    }

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: 22K Gold Ring ₹71925.00 (10.5g × ₹6850)
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Base amount: ₹143850.00
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Multiplies by a decimal factor (rate × weight).
    ///
    /// Returns `None` when the product does not fit in a `Decimal`.
    ///
    /// ## Example
    /// ```rust
    /// use aurum_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let rate = Money::from_rupees(6850);
    /// assert_eq!(rate.checked_mul(Decimal::new(105, 1)), Some(Money::from_rupees(71925)));
    /// assert_eq!(rate.checked_mul(Decimal::MAX), None);
    /// ```
    pub fn checked_mul(&self, factor: Decimal) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Rounds half away from zero to 2 decimal places.
    ///
    /// `81491.025` becomes `81491.03`. Used for display and printed
    /// invoices; never feed the result back into a calculation.
    pub fn round_for_display(&self) -> Money {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        Money(rounded)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display rounds to paise and prefixes the rupee sign.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_for_display().0;
        if rounded < Decimal::ZERO {
            write!(f, "-₹{}", rounded.abs())
        } else {
            write!(f, "₹{}", rounded)
        }
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
