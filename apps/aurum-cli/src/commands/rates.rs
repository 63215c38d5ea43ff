//! # Rate Commands
//!
//! The gold and silver price per gram that every metal scan is priced at.
//! A change applies to scans made after it; stored invoices keep the
//! prices they were issued at.

use aurum_core::validation::validate_metal_rate;
use aurum_core::{MetalRates, Money, ValidationError};
use rust_decimal::Decimal;
use tabled::Tabled;

use super::Context;
use crate::cli::RatesCommand;
use crate::error::AppResult;
use crate::output::{emit, render_table};

#[derive(Tabled)]
struct RateRow {
    #[tabled(rename = "Metal")]
    metal: &'static str,
    #[tabled(rename = "Rate / gram")]
    rate: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

fn rate_rows(rates: &MetalRates) -> Vec<RateRow> {
    let updated = rates.updated_at.format("%Y-%m-%d %H:%M").to_string();
    vec![
        RateRow {
            metal: "Gold",
            rate: rates.gold_per_gram.to_string(),
            updated: updated.clone(),
        },
        RateRow {
            metal: "Silver",
            rate: rates.silver_per_gram.to_string(),
            updated,
        },
    ]
}

pub async fn execute(ctx: &Context, cmd: RatesCommand) -> AppResult<()> {
    let rates = match cmd {
        RatesCommand::Show => show(ctx).await?,
        RatesCommand::Set { gold, silver } => set(ctx, gold, silver).await?,
    };
    emit(ctx.json, &rates, |r| render_table(rate_rows(r)))
}

pub async fn show(ctx: &Context) -> AppResult<MetalRates> {
    Ok(ctx.db.rates().current().await?)
}

/// Updates one or both rates. Each given rate must be positive.
pub async fn set(ctx: &Context, gold: Option<Decimal>, silver: Option<Decimal>) -> AppResult<MetalRates> {
    if gold.is_none() && silver.is_none() {
        return Err(ValidationError::required("gold or silver rate").into());
    }

    let gold = gold.map(Money::from_decimal);
    let silver = silver.map(Money::from_decimal);
    if let Some(rate) = gold {
        validate_metal_rate("gold rate", rate)?;
    }
    if let Some(rate) = silver {
        validate_metal_rate("silver rate", rate)?;
    }

    Ok(ctx.db.rates().update(gold, silver).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_show_defaults() {
        let ctx = context().await;
        let rates = show(&ctx).await.unwrap();
        assert_eq!(rates.gold_per_gram, Money::from_rupees(6850));

        let table = render_table(rate_rows(&rates));
        assert!(table.contains("₹6850.00"));
        assert!(table.contains("₹85.00"));
    }

    #[tokio::test]
    async fn test_set_gold_only() {
        let ctx = context().await;
        let rates = set(&ctx, Some(Decimal::new(712_550, 2)), None).await.unwrap();

        assert_eq!(rates.gold_per_gram.to_string(), "₹7125.50");
        assert_eq!(rates.silver_per_gram, Money::from_rupees(85));
    }

    #[tokio::test]
    async fn test_set_rejects_bad_input() {
        let ctx = context().await;

        let err = set(&ctx, None, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = set(&ctx, Some(Decimal::ZERO), None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(show(&ctx).await.unwrap().gold_per_gram, Money::from_rupees(6850));
    }
}
