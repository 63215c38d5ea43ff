//! Property-based tests for line pricing and cart totals.
//!
//! # Properties Tested
//!
//! 1. **Floor Property**: line_total >= base·quantity for any valid input
//! 2. **Composition Property**: line_total == base + making + tax, exactly
//! 3. **Scaling Property**: doubling quantity doubles base and percentage making
//! 4. **Aggregate Property**: cart total == Σ line totals after any edit sequence

use aurum_core::cart::{Cart, CartLineItem};
use aurum_core::money::Money;
use aurum_core::pricing::{price_line, MakingCharge, MakingChargeMode};
use aurum_core::types::{Category, Product};
use aurum_core::MAX_ITEM_QUANTITY;
use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Strategies
// ============================================================================

/// Base prices from ₹0.00 to ₹5,00,000.00.
fn base_price() -> impl Strategy<Value = Money> {
    (0i64..=50_000_000).prop_map(Money::from_paise)
}

/// Making values with up to two decimals, 0 to 100.00.
fn making_charge() -> impl Strategy<Value = MakingCharge> {
    (prop::bool::ANY, 0i64..=10_000).prop_map(|(pct, hundredths)| {
        let value = Decimal::new(hundredths, 2);
        if pct {
            MakingCharge::percentage(value)
        } else {
            MakingCharge::fixed(value)
        }
    })
}

fn quantity() -> impl Strategy<Value = i64> {
    1i64..=MAX_ITEM_QUANTITY
}

#[derive(Debug, Clone)]
enum CartOp {
    Add { base: Money, qty: i64 },
    Update { index: usize, qty: i64 },
    Remove { index: usize },
}

fn cart_op() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        (base_price(), 1i64..=20).prop_map(|(base, qty)| CartOp::Add { base, qty }),
        (0usize..10, -3i64..=20).prop_map(|(index, qty)| CartOp::Update { index, qty }),
        (0usize..10).prop_map(|index| CartOp::Remove { index }),
    ]
}

fn product() -> Product {
    Product {
        id: "p-1".to_string(),
        barcode: "JWL1".to_string(),
        name: "Piece".to_string(),
        category: Category::Gold,
        weight_grams: None,
        purity: None,
        purchase_price: None,
        selling_price: None,
        quantity: 1_000,
        reorder_level: 0,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_line_total_at_least_base(base in base_price(), qty in quantity(), making in making_charge()) {
        let p = price_line(base, qty, making);
        prop_assert!(p.line_total >= base.multiply_quantity(qty));
    }

    #[test]
    fn prop_line_total_is_sum_of_parts(base in base_price(), qty in quantity(), making in making_charge()) {
        let p = price_line(base, qty, making);
        prop_assert_eq!(p.line_total, p.base_amount + p.making_charge + p.tax);
    }

    #[test]
    fn prop_doubling_quantity(base in base_price(), qty in 1i64..=499, making in making_charge()) {
        let one = price_line(base, qty, making);
        let two = price_line(base, qty * 2, making);

        prop_assert_eq!(two.base_amount, one.base_amount * 2i64);
        if making.mode == MakingChargeMode::Percentage {
            prop_assert_eq!(two.making_charge, one.making_charge * 2i64);
        }
    }

    #[test]
    fn prop_fixed_making_ignores_base(a in base_price(), b in base_price(), making in making_charge()) {
        prop_assume!(making.mode == MakingChargeMode::Fixed);
        prop_assert_eq!(price_line(a, 1, making).making_charge, price_line(b, 1, making).making_charge);
        prop_assert_eq!(price_line(a, 1, making).making_charge, Money::from_decimal(making.value));
    }

    #[test]
    fn prop_cart_total_equals_sum_of_lines(ops in prop::collection::vec(cart_op(), 0..40)) {
        let mut cart = Cart::new();
        let product = product();

        for op in ops {
            match op {
                CartOp::Add { base, qty } => {
                    let _ = cart.add_line(CartLineItem::from_product(&product, base, qty, MakingCharge::default()));
                }
                CartOp::Update { index, qty } => {
                    if let Some(id) = cart.lines().get(index).map(|l| l.line_id.clone()) {
                        let before = cart.lines()[index].quantity();
                        let result = cart.update_quantity(&id, qty);
                        if qty <= 0 {
                            prop_assert!(result.is_err());
                            prop_assert_eq!(cart.lines()[index].quantity(), before);
                        }
                    }
                }
                CartOp::Remove { index } => {
                    if let Some(id) = cart.lines().get(index).map(|l| l.line_id.clone()) {
                        cart.remove_line(&id).unwrap();
                    }
                }
            }

            let sum: Money = cart.lines().iter().map(|l| l.line_total()).sum();
            prop_assert_eq!(cart.total(), sum);
        }

        if cart.is_empty() {
            prop_assert!(cart.total().is_zero());
        }
    }
}
