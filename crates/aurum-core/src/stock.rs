//! # Stock Levels
//!
//! Classifies shelf quantities against each product's reorder level.
//!
//! ## Alert Levels
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity                           reorder_level = 8                   │
//! │                                                                         │
//! │   0 ──────────► CRITICAL   (nothing left to sell)                       │
//! │   1 ..= 4 ────► HIGH       (at or below floor(reorder / 2))             │
//! │   5 ..= 8 ────► MEDIUM     (at or below reorder level)                  │
//! │   9 .. ───────► no alert                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The browse view uses a coarser status with a "medium" band that reaches
//! up to twice the reorder level.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Category, Product};

// =============================================================================
// Alert Level
// =============================================================================

/// Severity of a low-stock alert. Ordered most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockAlertLevel {
    Critical,
    High,
    Medium,
}

impl fmt::Display for StockAlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StockAlertLevel::Critical => "critical",
            StockAlertLevel::High => "high",
            StockAlertLevel::Medium => "medium",
        };
        f.write_str(s)
    }
}

/// Alert level for a product, `None` when stock is above the reorder level.
pub fn alert_level(quantity: i64, reorder_level: i64) -> Option<StockAlertLevel> {
    if quantity <= 0 {
        Some(StockAlertLevel::Critical)
    } else if quantity <= reorder_level / 2 {
        Some(StockAlertLevel::High)
    } else if quantity <= reorder_level {
        Some(StockAlertLevel::Medium)
    } else {
        None
    }
}

// =============================================================================
// Browse Status
// =============================================================================

/// Status badge for the stock listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    OutOfStock,
    Low,
    Medium,
    InStock,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::Low => "Low Stock",
            StockStatus::Medium => "Medium Stock",
            StockStatus::InStock => "In Stock",
        };
        f.write_str(s)
    }
}

pub fn stock_status(quantity: i64, reorder_level: i64) -> StockStatus {
    if quantity <= 0 {
        StockStatus::OutOfStock
    } else if quantity <= reorder_level {
        StockStatus::Low
    } else if quantity <= reorder_level.saturating_mul(2) {
        StockStatus::Medium
    } else {
        StockStatus::InStock
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Category and free-text filter shared by the stock and alert views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockFilter {
    pub category: Option<Category>,
    /// Case-insensitive match on name or barcode.
    pub search: Option<String>,
}

impl StockFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                let term = term.to_lowercase();
                product.name.to_lowercase().contains(&term)
                    || product.barcode.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

// =============================================================================
// Alerts
// =============================================================================

/// A product that needs restocking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAlert {
    pub product: Product,
    pub level: StockAlertLevel,
}

/// Active products at or below their reorder level, most severe first.
///
/// Within a level the lowest quantity comes first, then name order.
pub fn stock_alerts(products: &[Product], filter: &StockFilter) -> Vec<StockAlert> {
    let mut alerts: Vec<StockAlert> = products
        .iter()
        .filter(|p| p.is_active && filter.matches(p))
        .filter_map(|p| {
            alert_level(p.quantity, p.reorder_level).map(|level| StockAlert {
                product: p.clone(),
                level,
            })
        })
        .collect();

    alerts.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then(a.product.quantity.cmp(&b.product.quantity))
            .then_with(|| a.product.name.cmp(&b.product.name))
    });
    alerts
}

/// Count of alerts per level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
}

impl AlertSummary {
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium
    }
}

pub fn alert_summary(alerts: &[StockAlert]) -> AlertSummary {
    alerts
        .iter()
        .fold(AlertSummary::default(), |mut summary, alert| {
            match alert.level {
                StockAlertLevel::Critical => summary.critical += 1,
                StockAlertLevel::High => summary.high += 1,
                StockAlertLevel::Medium => summary.medium += 1,
            }
            summary
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str, category: Category, quantity: i64, reorder_level: i64) -> Product {
        Product {
            id: format!("id-{name}"),
            barcode: format!("JWL-{}", name.to_uppercase().replace(' ', "")),
            name: name.to_string(),
            category,
            weight_grams: None,
            purity: None,
            purchase_price: None,
            selling_price: None,
            quantity,
            reorder_level,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_alert_levels() {
        assert_eq!(alert_level(0, 5), Some(StockAlertLevel::Critical));
        assert_eq!(alert_level(1, 5), Some(StockAlertLevel::High));
        assert_eq!(alert_level(2, 5), Some(StockAlertLevel::High));
        assert_eq!(alert_level(3, 5), Some(StockAlertLevel::Medium));
        assert_eq!(alert_level(5, 5), Some(StockAlertLevel::Medium));
        assert_eq!(alert_level(6, 5), None);
        assert_eq!(alert_level(0, 0), Some(StockAlertLevel::Critical));
        assert_eq!(alert_level(1, 1), Some(StockAlertLevel::Medium));
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(stock_status(0, 3), StockStatus::OutOfStock);
        assert_eq!(stock_status(3, 3), StockStatus::Low);
        assert_eq!(stock_status(6, 3), StockStatus::Medium);
        assert_eq!(stock_status(7, 3), StockStatus::InStock);
    }

    #[test]
    fn test_alerts_sorted_most_severe_first() {
        let products = vec![
            product("Silver Anklet", Category::Silver, 4, 5),
            product("Gold Chain", Category::Gold, 0, 3),
            product("Pearl Set", Category::Imitation, 1, 8),
            product("Gold Bangle", Category::Gold, 20, 3),
        ];

        let alerts = stock_alerts(&products, &StockFilter::default());
        let names: Vec<&str> = alerts.iter().map(|a| a.product.name.as_str()).collect();

        assert_eq!(names, vec!["Gold Chain", "Pearl Set", "Silver Anklet"]);

        let summary = alert_summary(&alerts);
        assert_eq!(
            summary,
            AlertSummary {
                critical: 1,
                high: 1,
                medium: 1
            }
        );
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_alerts_skip_inactive_and_filter() {
        let mut retired = product("Old Ring", Category::Gold, 0, 3);
        retired.is_active = false;
        let products = vec![
            retired,
            product("Gold Chain", Category::Gold, 0, 3),
            product("Pearl Set", Category::Imitation, 1, 8),
        ];

        let gold_only = StockFilter {
            category: Some(Category::Gold),
            search: None,
        };
        assert_eq!(stock_alerts(&products, &gold_only).len(), 1);

        let by_barcode = StockFilter {
            category: None,
            search: Some("jwl-pearl".to_string()),
        };
        let alerts = stock_alerts(&products, &by_barcode);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].level, StockAlertLevel::High);
    }
}
