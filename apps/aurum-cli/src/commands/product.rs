//! # Product Commands
//!
//! Registration and lookup of jewelry pieces.
//!
//! ## Registration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  aurum product register --barcode JWL12345678 --category gold ...       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_new_product                                                   │
//! │    ├── metal without weight?        → VALIDATION_ERROR                  │
//! │    ├── imitation without price?     → VALIDATION_ERROR                  │
//! │    └── ok                                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRepository::insert                                              │
//! │    └── barcode taken?               → CONFLICT                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use aurum_core::stock::stock_status;
use aurum_core::validation::{validate_new_product, validate_search_query};
use aurum_core::{MetalRates, Money, NewProduct, Product};
use aurum_db::ProductQuery;
use tabled::Tabled;
use tracing::info;

use super::Context;
use crate::cli::{ProductCommand, ProductListArgs, RegisterArgs};
use crate::error::{AppError, AppResult};
use crate::output::{emit, opt_text, render_table};

#[derive(Tabled)]
pub(crate) struct ProductRow {
    #[tabled(rename = "Barcode")]
    barcode: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Weight (g)")]
    weight: String,
    #[tabled(rename = "Purity")]
    purity: String,
    #[tabled(rename = "Price now")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: i64,
    #[tabled(rename = "Status")]
    status: String,
}

impl ProductRow {
    /// `price` is the unit base price at the given rates, before making
    /// charge and tax.
    pub(crate) fn new(product: &Product, rates: &MetalRates) -> Self {
        let status = if product.is_active {
            stock_status(product.quantity, product.reorder_level).to_string()
        } else {
            "Inactive".to_string()
        };

        ProductRow {
            barcode: product.barcode.clone(),
            name: product.name.clone(),
            category: product.category.to_string(),
            weight: opt_text(product.weight_grams),
            purity: opt_text(product.purity.as_deref()),
            price: product
                .unit_base_price(rates)
                .map(|p| p.to_string())
                .unwrap_or_else(|_| "-".to_string()),
            quantity: product.quantity,
            status,
        }
    }
}

pub async fn execute(ctx: &Context, cmd: ProductCommand) -> AppResult<()> {
    match cmd {
        ProductCommand::Register(args) => {
            let product = register(ctx, args).await?;
            print_products(ctx, &[product]).await
        }
        ProductCommand::List(args) => {
            let products = list(ctx, &args).await?;
            print_products(ctx, &products).await
        }
        ProductCommand::Show { barcode } => {
            let product = show(ctx, &barcode).await?;
            print_products(ctx, &[product]).await
        }
        ProductCommand::Deactivate { barcode } => {
            let product = deactivate(ctx, &barcode).await?;
            print_products(ctx, &[product]).await
        }
    }
}

async fn print_products(ctx: &Context, products: &[Product]) -> AppResult<()> {
    let rates = ctx.db.rates().current().await?;
    emit(ctx.json, products, |ps| {
        render_table(ps.iter().map(|p| ProductRow::new(p, &rates)))
    })
}

/// Registers a product from command-line arguments.
pub async fn register(ctx: &Context, args: RegisterArgs) -> AppResult<Product> {
    let new = NewProduct {
        barcode: args.barcode.trim().to_string(),
        name: args.name.trim().to_string(),
        category: args.category,
        weight_grams: args.weight,
        purity: args.purity,
        purchase_price: args.purchase_price.map(Money::from_decimal),
        selling_price: args.selling_price.map(Money::from_decimal),
        quantity: args.quantity,
        reorder_level: args
            .reorder_level
            .unwrap_or(ctx.config.default_reorder_level),
    };
    validate_new_product(&new)?;

    let product = ctx.db.products().insert(&new).await?;
    info!(barcode = %product.barcode, "Registered product");
    Ok(product)
}

pub async fn list(ctx: &Context, args: &ProductListArgs) -> AppResult<Vec<Product>> {
    let search = args
        .search
        .as_deref()
        .map(validate_search_query)
        .transpose()?;

    let query = ProductQuery {
        category: args.category,
        search,
        include_inactive: args.all,
        limit: args.limit,
    };
    Ok(ctx.db.products().list(&query).await?)
}

pub async fn show(ctx: &Context, barcode: &str) -> AppResult<Product> {
    ctx.db
        .products()
        .get_by_barcode(barcode)
        .await?
        .ok_or_else(|| AppError::not_found("Product", barcode))
}

pub async fn deactivate(ctx: &Context, barcode: &str) -> AppResult<Product> {
    let product = show(ctx, barcode).await?;
    ctx.db.products().soft_delete(&product.id).await?;
    info!(barcode = %barcode, "Deactivated product");
    show(ctx, barcode).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, seed_earrings, seed_ring};
    use crate::error::ErrorCode;
    use aurum_core::Category;
    use rust_decimal::Decimal;

    fn ring_args(barcode: &str) -> RegisterArgs {
        RegisterArgs {
            barcode: barcode.to_string(),
            name: "Silver Anklet".to_string(),
            category: Category::Silver,
            weight: Some(Decimal::from(40)),
            purity: Some("925".to_string()),
            purchase_price: None,
            selling_price: None,
            quantity: 2,
            reorder_level: None,
        }
    }

    #[tokio::test]
    async fn test_register_uses_default_reorder_level() {
        let ctx = context().await;
        let product = register(&ctx, ring_args("JWL-ANK-1")).await.unwrap();

        assert_eq!(product.reorder_level, ctx.config.default_reorder_level);
        assert_eq!(show(&ctx, "JWL-ANK-1").await.unwrap().id, product.id);
    }

    #[tokio::test]
    async fn test_register_metal_without_weight() {
        let ctx = context().await;
        let mut args = ring_args("JWL-ANK-1");
        args.weight = None;

        let err = register(&ctx, args).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_register_rejects_huge_weight() {
        let ctx = context().await;
        let mut args = ring_args("JWL-BAR-1");
        args.weight = Some(Decimal::from_i128_with_scale(10i128.pow(27), 0));

        let err = register(&ctx, args).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(ctx
            .db
            .products()
            .get_by_barcode("JWL-BAR-1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_barcode() {
        let ctx = context().await;
        register(&ctx, ring_args("JWL-ANK-1")).await.unwrap();

        let err = register(&ctx, ring_args("JWL-ANK-1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn test_list_and_deactivate() {
        let ctx = context().await;
        seed_ring(&ctx).await;
        seed_earrings(&ctx).await;

        let gold = list(
            &ctx,
            &ProductListArgs {
                category: Some(Category::Gold),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(gold.len(), 1);

        let product = deactivate(&ctx, "JWL55667788").await.unwrap();
        assert!(!product.is_active);
        assert_eq!(list(&ctx, &ProductListArgs::default()).await.unwrap().len(), 1);

        let err = show(&ctx, "JWL00000000").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_product_row_prices_at_current_rates() {
        let ctx = context().await;
        seed_ring(&ctx).await;
        let ring = show(&ctx, "JWL12345678").await.unwrap();
        let rates = ctx.db.rates().current().await.unwrap();

        let row = ProductRow::new(&ring, &rates);
        assert_eq!(row.price, "₹71925.00");
        // 5 on hand, reorder at 3
        assert_eq!(row.status, "Medium Stock");
        assert_eq!(row.weight, "10.5");
    }
}
