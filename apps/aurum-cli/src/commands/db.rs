//! Database diagnostics.

use serde::Serialize;

use super::Context;
use crate::cli::DbCommand;
use crate::error::AppResult;
use crate::output::emit;

#[derive(Debug, Serialize)]
pub struct DbStatus {
    pub path: String,
    pub healthy: bool,
    pub migrations_applied: usize,
    pub migrations_total: usize,
    pub active_products: i64,
    pub invoices: i64,
}

pub async fn execute(ctx: &Context, cmd: DbCommand) -> AppResult<()> {
    match cmd {
        DbCommand::Status => {
            let status = status(ctx).await?;
            emit(ctx.json, &status, |s| {
                format!(
                    "Database:   {}\nHealthy:    {}\nMigrations: {}/{}\nProducts:   {}\nInvoices:   {}",
                    s.path,
                    if s.healthy { "yes" } else { "no" },
                    s.migrations_applied,
                    s.migrations_total,
                    s.active_products,
                    s.invoices,
                )
            })
        }
    }
}

pub async fn status(ctx: &Context) -> AppResult<DbStatus> {
    let healthy = ctx.db.health_check().await;
    let (migrations_total, migrations_applied) = ctx.db.migration_status().await?;

    Ok(DbStatus {
        path: ctx.config.database_path.display().to_string(),
        healthy,
        migrations_applied,
        migrations_total,
        active_products: ctx.db.products().count().await?,
        invoices: ctx.db.invoices().count().await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, seed_earrings, seed_ring};

    #[tokio::test]
    async fn test_status_of_fresh_database() {
        let ctx = context().await;
        let status = status(&ctx).await.unwrap();

        assert!(status.healthy);
        assert!(status.migrations_total > 0);
        assert_eq!(status.migrations_applied, status.migrations_total);
        assert_eq!(status.active_products, 0);
        assert_eq!(status.invoices, 0);
    }

    #[tokio::test]
    async fn test_status_counts_active_products() {
        let ctx = context().await;
        seed_ring(&ctx).await;
        seed_earrings(&ctx).await;
        let products = ctx.db.products();
        let earrings = products.get_by_barcode("JWL55667788").await.unwrap().unwrap();
        products.soft_delete(&earrings.id).await.unwrap();

        assert_eq!(status(&ctx).await.unwrap().active_products, 1);
    }
}
