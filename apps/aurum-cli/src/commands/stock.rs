//! # Stock Commands
//!
//! ```text
//! aurum stock list     → every active product with its status badge
//! aurum stock alerts   → products at or below reorder level
//!                        ┌──────────┬──────────────────────────────┐
//!                        │ critical │ nothing left                 │
//!                        │ high     │ ≤ half the reorder level     │
//!                        │ medium   │ ≤ reorder level              │
//!                        └──────────┴──────────────────────────────┘
//! aurum stock restock JWL12345678 -q 4
//! ```

use aurum_core::stock::{alert_summary, stock_alerts, AlertSummary, StockAlert, StockFilter};
use aurum_core::validation::{validate_restock_quantity, validate_search_query};
use aurum_core::Product;
use aurum_db::ProductQuery;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use super::product::{show, ProductRow};
use super::Context;
use crate::cli::{StockCommand, StockFilterArgs};
use crate::error::AppResult;
use crate::output::{emit, render_table};

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Barcode")]
    barcode: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Qty")]
    quantity: i64,
    #[tabled(rename = "Reorder at")]
    reorder_level: i64,
}

impl From<&StockAlert> for AlertRow {
    fn from(alert: &StockAlert) -> Self {
        AlertRow {
            level: alert.level.to_string(),
            barcode: alert.product.barcode.clone(),
            name: alert.product.name.clone(),
            category: alert.product.category.to_string(),
            quantity: alert.product.quantity,
            reorder_level: alert.product.reorder_level,
        }
    }
}

/// Alerts plus per-level counts.
#[derive(Debug, Serialize)]
pub struct AlertReport {
    pub alerts: Vec<StockAlert>,
    pub summary: AlertSummary,
}

pub async fn execute(ctx: &Context, cmd: StockCommand) -> AppResult<()> {
    match cmd {
        StockCommand::List(args) => {
            let products = list(ctx, &args).await?;
            let rates = ctx.db.rates().current().await?;
            emit(ctx.json, &products, |ps| {
                render_table(ps.iter().map(|p| ProductRow::new(p, &rates)))
            })
        }
        StockCommand::Alerts(args) => {
            let report = alerts(ctx, &args).await?;
            emit(ctx.json, &report, |r| {
                format!(
                    "{}\ncritical: {}  high: {}  medium: {}  total: {}",
                    render_table(r.alerts.iter().map(AlertRow::from)),
                    r.summary.critical,
                    r.summary.high,
                    r.summary.medium,
                    r.summary.total()
                )
            })
        }
        StockCommand::Restock { barcode, quantity } => {
            let product = restock(ctx, &barcode, quantity).await?;
            let rates = ctx.db.rates().current().await?;
            emit(ctx.json, &product, |p| render_table([ProductRow::new(p, &rates)]))
        }
    }
}

fn filter_from(args: &StockFilterArgs) -> AppResult<StockFilter> {
    Ok(StockFilter {
        category: args.category,
        search: args
            .search
            .as_deref()
            .map(validate_search_query)
            .transpose()?,
    })
}

/// Active products matching the filter, name order.
pub async fn list(ctx: &Context, args: &StockFilterArgs) -> AppResult<Vec<Product>> {
    let filter = filter_from(args)?;
    let query = ProductQuery {
        category: filter.category,
        search: filter.search,
        ..Default::default()
    };
    Ok(ctx.db.products().list(&query).await?)
}

pub async fn alerts(ctx: &Context, args: &StockFilterArgs) -> AppResult<AlertReport> {
    let filter = filter_from(args)?;
    let products = ctx.db.products().low_stock().await?;
    let alerts = stock_alerts(&products, &filter);
    let summary = alert_summary(&alerts);

    Ok(AlertReport { alerts, summary })
}

/// Adds received units to a product's stock.
pub async fn restock(ctx: &Context, barcode: &str, quantity: i64) -> AppResult<Product> {
    validate_restock_quantity(quantity)?;
    let product = show(ctx, barcode).await?;

    let new_quantity = ctx.db.products().update_stock(&product.id, quantity).await?;
    info!(barcode = %barcode, added = quantity, quantity = new_quantity, "Restocked");

    show(ctx, barcode).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, seed_earrings, seed_ring};
    use crate::error::ErrorCode;
    use aurum_core::stock::StockAlertLevel;
    use aurum_core::Category;

    #[tokio::test]
    async fn test_alerts_sorted_and_summarised() {
        let ctx = context().await;
        seed_ring(&ctx).await; // 5 / reorder 3: no alert
        seed_earrings(&ctx).await; // 0 / reorder 4: critical

        let ring = show(&ctx, "JWL12345678").await.unwrap();
        ctx.db.products().update_stock(&ring.id, -3).await.unwrap(); // 2 / 3: medium

        let report = alerts(&ctx, &StockFilterArgs::default()).await.unwrap();
        assert_eq!(report.alerts.len(), 2);
        assert_eq!(report.alerts[0].level, StockAlertLevel::Critical);
        assert_eq!(report.alerts[1].level, StockAlertLevel::Medium);
        assert_eq!(report.summary.total(), 2);
        assert_eq!(report.summary.critical, 1);
    }

    #[tokio::test]
    async fn test_alerts_filtered() {
        let ctx = context().await;
        seed_earrings(&ctx).await;

        let gold_only = alerts(
            &ctx,
            &StockFilterArgs {
                category: Some(Category::Gold),
                search: None,
            },
        )
        .await
        .unwrap();
        assert!(gold_only.alerts.is_empty());

        let by_name = alerts(
            &ctx,
            &StockFilterArgs {
                category: None,
                search: Some("KUNDAN".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(by_name.alerts.len(), 1);
    }

    #[tokio::test]
    async fn test_restock_clears_alert() {
        let ctx = context().await;
        seed_earrings(&ctx).await;

        let product = restock(&ctx, "JWL55667788", 10).await.unwrap();
        assert_eq!(product.quantity, 10);

        let report = alerts(&ctx, &StockFilterArgs::default()).await.unwrap();
        assert!(report.alerts.is_empty());
    }

    #[tokio::test]
    async fn test_restock_accepts_bulk_delivery() {
        let ctx = context().await;
        seed_ring(&ctx).await;

        let product = restock(&ctx, "JWL12345678", 1500).await.unwrap();
        assert_eq!(product.quantity, 1505);
    }

    #[tokio::test]
    async fn test_restock_rejects_non_positive() {
        let ctx = context().await;
        seed_earrings(&ctx).await;

        let err = restock(&ctx, "JWL55667788", 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        let err = restock(&ctx, "NOPE", 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_list_excludes_inactive() {
        let ctx = context().await;
        seed_ring(&ctx).await;
        seed_earrings(&ctx).await;
        let earrings = show(&ctx, "JWL55667788").await.unwrap();
        ctx.db.products().soft_delete(&earrings.id).await.unwrap();

        let products = list(&ctx, &StockFilterArgs::default()).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].barcode, "JWL12345678");
    }
}
