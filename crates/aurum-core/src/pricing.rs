//! # Line Pricing
//!
//! The jewelry line calculator: base amount, making charge, GST, line total.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Pricing One Cart Line                                │
//! │                                                                         │
//! │  unit_base_price × quantity ──────────────► base_amount                 │
//! │                                                 │                       │
//! │  MakingCharge                                   │                       │
//! │  ├── Percentage(v): base_amount × v / 100 ──┐   │                       │
//! │  └── Fixed(v):      v × quantity ───────────┴─► making_charge           │
//! │                                                 │                       │
//! │  (base_amount + making_charge) × 3% ──────────► tax                     │
//! │                                                 │                       │
//! │  base_amount + making_charge + tax ───────────► line_total              │
//! │                                                                         │
//! │  Every derived value is recomputed from the four inputs.                │
//! │  Nothing is rounded here; Money rounds on display.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use aurum_core::money::Money;
//! use aurum_core::pricing::{price_line, MakingCharge};
//! use rust_decimal::Decimal;
//!
//! // Silver chain, 25.2g × ₹85 = ₹2142, flat ₹300 making
//! let pricing = price_line(Money::from_rupees(2142), 1, MakingCharge::fixed(Decimal::from(300)));
//! assert_eq!(pricing.making_charge, Money::from_rupees(300));
//! assert_eq!(pricing.line_total.to_string(), "₹2515.26");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxRate;

// =============================================================================
// Making Charge
// =============================================================================

/// How the making charge value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MakingChargeMode {
    /// Percent of the base amount.
    Percentage,
    /// Rupees per unit.
    Fixed,
}

impl MakingChargeMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MakingChargeMode::Percentage => "percentage",
            MakingChargeMode::Fixed => "fixed",
        }
    }
}

impl fmt::Display for MakingChargeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MakingChargeMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" | "percent" | "%" => Ok(MakingChargeMode::Percentage),
            "fixed" | "flat" => Ok(MakingChargeMode::Fixed),
            other => Err(ValidationError::invalid(
                "making charge mode",
                format!("unknown mode '{other}' (expected percentage or fixed)"),
            )),
        }
    }
}

/// Making charge configuration applied to a line.
///
/// ## Fixed Charges Scale With Quantity
/// A fixed value is a per-piece labor fee: two identical rings cost twice
/// the labor. The same rule applies when the line is first added and on
/// every later quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakingCharge {
    pub mode: MakingChargeMode,
    pub value: Decimal,
}

impl MakingCharge {
    /// Default shop setting: 10% of the base amount.
    pub const DEFAULT_PERCENTAGE: i64 = 10;

    pub fn percentage(value: Decimal) -> Self {
        MakingCharge {
            mode: MakingChargeMode::Percentage,
            value,
        }
    }

    pub fn fixed(value: Decimal) -> Self {
        MakingCharge {
            mode: MakingChargeMode::Fixed,
            value,
        }
    }

    /// Making charge for `quantity` units whose combined base is `base_amount`.
    pub fn amount_for(&self, base_amount: Money, quantity: i64) -> Money {
        match self.mode {
            MakingChargeMode::Percentage => base_amount.percent(self.value),
            MakingChargeMode::Fixed => Money::from_decimal(self.value).multiply_quantity(quantity),
        }
    }
}

impl Default for MakingCharge {
    fn default() -> Self {
        MakingCharge::percentage(Decimal::from(Self::DEFAULT_PERCENTAGE))
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Derived amounts for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePricing {
    /// `unit_base_price × quantity`.
    pub base_amount: Money,
    pub making_charge: Money,
    pub tax: Money,
    /// `base_amount + making_charge + tax`.
    pub line_total: Money,
}

/// Prices a line.
///
/// Inputs are assumed valid (`unit_base_price ≥ 0`, `quantity ≥ 1`,
/// making value ≥ 0); validation happens before a line is created.
///
/// ## Example
/// ```rust
/// use aurum_core::money::Money;
/// use aurum_core::pricing::{price_line, MakingCharge};
/// use rust_decimal::Decimal;
///
/// let p = price_line(Money::from_rupees(71925), 1, MakingCharge::percentage(Decimal::from(10)));
/// assert_eq!(p.tax.amount().to_string(), "2373.525");
/// assert_eq!(p.line_total.amount().to_string(), "81491.025");
/// ```
pub fn price_line(unit_base_price: Money, quantity: i64, making: MakingCharge) -> LinePricing {
    let base_amount = unit_base_price.multiply_quantity(quantity);
    let making_charge = making.amount_for(base_amount, quantity);
    let tax = (base_amount + making_charge).calculate_tax(TaxRate::JEWELLERY_GST);

    LinePricing {
        base_amount,
        making_charge,
        tax,
        line_total: base_amount + making_charge + tax,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_percentage_reference_example() {
        // 10.5g gold at ₹6850/g, 10% making
        let p = price_line(Money::from_rupees(71925), 1, MakingCharge::percentage(dec("10")));

        assert_eq!(p.base_amount.amount(), dec("71925"));
        assert_eq!(p.making_charge.amount(), dec("7192.5"));
        assert_eq!(p.tax.amount(), dec("2373.525"));
        assert_eq!(p.line_total.amount(), dec("81491.025"));
        assert_eq!(p.line_total.to_string(), "₹81491.03");
    }

    #[test]
    fn test_fixed_is_independent_of_base() {
        let making = MakingCharge::fixed(dec("500"));
        let cheap = price_line(Money::from_rupees(100), 1, making);
        let dear = price_line(Money::from_rupees(100_000), 1, making);

        assert_eq!(cheap.making_charge, Money::from_rupees(500));
        assert_eq!(dear.making_charge, Money::from_rupees(500));
    }

    #[test]
    fn test_fixed_scales_with_quantity() {
        let p = price_line(Money::from_rupees(1000), 3, MakingCharge::fixed(dec("250")));
        assert_eq!(p.making_charge, Money::from_rupees(750));
    }

    #[test]
    fn test_doubling_quantity_doubles_base_and_percentage_making() {
        let making = MakingCharge::percentage(dec("12.5"));
        let one = price_line(Money::from_paise(1_234_567), 1, making);
        let two = price_line(Money::from_paise(1_234_567), 2, making);

        assert_eq!(two.base_amount, one.base_amount * 2i64);
        assert_eq!(two.making_charge, one.making_charge * 2i64);
        assert_eq!(two.line_total, one.line_total * 2i64);
    }

    #[test]
    fn test_zero_making() {
        let p = price_line(Money::from_rupees(1000), 1, MakingCharge::percentage(Decimal::ZERO));
        assert!(p.making_charge.is_zero());
        assert_eq!(p.tax, Money::from_rupees(30));
        assert_eq!(p.line_total, Money::from_rupees(1030));
    }

    #[test]
    fn test_line_total_is_sum_of_parts() {
        let p = price_line(Money::from_paise(999_999), 7, MakingCharge::percentage(dec("8.75")));
        assert_eq!(p.line_total, p.base_amount + p.making_charge + p.tax);
    }

    #[test]
    fn test_default_making_is_ten_percent() {
        assert_eq!(MakingCharge::default(), MakingCharge::percentage(dec("10")));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("percentage".parse::<MakingChargeMode>().unwrap(), MakingChargeMode::Percentage);
        assert_eq!("FIXED".parse::<MakingChargeMode>().unwrap(), MakingChargeMode::Fixed);
        assert!("weight".parse::<MakingChargeMode>().is_err());
    }
}
