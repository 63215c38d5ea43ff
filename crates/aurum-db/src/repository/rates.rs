//! # Metal Rate Repository
//!
//! The shop's current gold and silver prices per gram. There is exactly one
//! row (`id = 1`), seeded by the initial migration.

use aurum_core::{MetalRates, Money};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::money_column;
use crate::error::{DbError, DbResult};

#[derive(Debug, sqlx::FromRow)]
struct MetalRatesRow {
    gold_per_gram: String,
    silver_per_gram: String,
    updated_at: DateTime<Utc>,
}

/// Repository for the metal rate row.
#[derive(Debug, Clone)]
pub struct MetalRateRepository {
    pool: SqlitePool,
}

impl MetalRateRepository {
    /// Creates a new MetalRateRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MetalRateRepository { pool }
    }

    /// Returns the rates in effect now.
    pub async fn current(&self) -> DbResult<MetalRates> {
        let row: Option<MetalRatesRow> = sqlx::query_as(
            "SELECT gold_per_gram, silver_per_gram, updated_at FROM metal_rates WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| DbError::not_found("MetalRates", "1"))?;

        Ok(MetalRates {
            gold_per_gram: money_column("gold_per_gram", &row.gold_per_gram)?,
            silver_per_gram: money_column("silver_per_gram", &row.silver_per_gram)?,
            updated_at: row.updated_at,
        })
    }

    /// Changes one or both rates and returns the new values.
    ///
    /// `None` leaves that metal's rate as it is. Validation of the amounts
    /// belongs to the caller.
    pub async fn update(&self, gold: Option<Money>, silver: Option<Money>) -> DbResult<MetalRates> {
        debug!(gold = ?gold, silver = ?silver, "Updating metal rates");

        let result = sqlx::query(
            r#"
            UPDATE metal_rates
            SET gold_per_gram = COALESCE(?1, gold_per_gram),
                silver_per_gram = COALESCE(?2, silver_per_gram),
                updated_at = ?3
            WHERE id = 1
            "#,
        )
        .bind(gold.map(|g| g.amount().to_string()))
        .bind(silver.map(|s| s.amount().to_string()))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MetalRates", "1"));
        }

        let rates = self.current().await?;
        info!(
            gold = %rates.gold_per_gram,
            silver = %rates.silver_per_gram,
            "Metal rates updated"
        );
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use aurum_core::{MetalRates, Money};

    #[tokio::test]
    async fn test_seeded_defaults() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let rates = db.rates().current().await.unwrap();

        assert_eq!(rates.gold_per_gram, Money::from_rupees(MetalRates::DEFAULT_GOLD_PER_GRAM));
        assert_eq!(
            rates.silver_per_gram,
            Money::from_rupees(MetalRates::DEFAULT_SILVER_PER_GRAM)
        );
    }

    #[tokio::test]
    async fn test_partial_update() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.rates();

        let updated = repo.update(Some(Money::from_paise(712_550)), None).await.unwrap();
        assert_eq!(updated.gold_per_gram, Money::from_paise(712_550));
        assert_eq!(updated.silver_per_gram, Money::from_rupees(85));

        let updated = repo.update(None, Some(Money::from_rupees(92))).await.unwrap();
        assert_eq!(updated.gold_per_gram, Money::from_paise(712_550));
        assert_eq!(updated.silver_per_gram, Money::from_rupees(92));
        assert_eq!(repo.current().await.unwrap(), updated);
    }
}
