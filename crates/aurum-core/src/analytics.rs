//! # Sales Analytics
//!
//! Read-side views over stored invoices: history search and the
//! per-category sales overview.
//!
//! ```text
//! invoices ──► search_invoices(term) ──► history table + total_revenue
//!          └─► sales_overview() ──────► gold / silver / imitation breakdown
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Category, Invoice};

// =============================================================================
// History
// =============================================================================

/// Whether an invoice matches a history search term.
///
/// Customer name and invoice number match case-insensitively; the phone
/// number matches on the raw substring. An empty term matches everything.
pub fn invoice_matches(invoice: &Invoice, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }

    let lowered = term.to_lowercase();
    invoice.customer.name.to_lowercase().contains(&lowered)
        || invoice.customer.phone.contains(term)
        || invoice.invoice_number.to_lowercase().contains(&lowered)
}

/// Matching invoices, newest first.
pub fn search_invoices<'a>(invoices: &'a [Invoice], term: &str) -> Vec<&'a Invoice> {
    let mut matched: Vec<&Invoice> = invoices
        .iter()
        .filter(|inv| invoice_matches(inv, term))
        .collect();
    matched.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.invoice_number.cmp(&a.invoice_number))
    });
    matched
}

/// Sum of invoice totals.
pub fn total_revenue<'a, I>(invoices: I) -> Money
where
    I: IntoIterator<Item = &'a Invoice>,
{
    invoices.into_iter().map(|inv| inv.total).sum()
}

// =============================================================================
// Overview
// =============================================================================

/// Sales figures for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: Category,
    /// Sum of line totals (making charge and GST included).
    pub total_sales: Money,
    pub units_sold: i64,
    /// `total_sales / units_sold`, zero when nothing sold.
    pub average_price: Money,
    /// Share of the grand total, percent, 2 decimal places.
    pub share_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOverview {
    /// One entry per category, in [`Category::ALL`] order.
    pub categories: Vec<CategorySales>,
    pub grand_total: Money,
}

impl SalesOverview {
    pub fn for_category(&self, category: Category) -> Option<&CategorySales> {
        self.categories.iter().find(|c| c.category == category)
    }
}

/// Aggregates invoice lines by category.
pub fn sales_overview(invoices: &[Invoice]) -> SalesOverview {
    let lines: Vec<_> = invoices.iter().flat_map(|inv| inv.lines.iter()).collect();
    let grand_total: Money = lines.iter().map(|l| l.line_total).sum();

    let categories = Category::ALL
        .iter()
        .map(|&category| {
            let (total_sales, units_sold) = lines
                .iter()
                .filter(|l| l.category == category)
                .fold((Money::zero(), 0i64), |(total, units), l| {
                    (total + l.line_total, units + l.quantity)
                });

            let average_price = if units_sold > 0 {
                Money::from_decimal(total_sales.amount() / Decimal::from(units_sold))
            } else {
                Money::zero()
            };

            let share_percent = if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                (total_sales.amount() * Decimal::ONE_HUNDRED / grand_total.amount()).round_dp(2)
            };

            CategorySales {
                category,
                total_sales,
                units_sold,
                average_price,
                share_percent,
            }
        })
        .collect();

    SalesOverview {
        categories,
        grand_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
