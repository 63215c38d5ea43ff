//! Sales-by-category overview across every stored invoice.

use aurum_core::analytics::{sales_overview, SalesOverview};
use tabled::Tabled;

use super::Context;
use crate::error::AppResult;
use crate::output::{emit, render_table};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Sales")]
    total_sales: String,
    #[tabled(rename = "Units")]
    units_sold: i64,
    #[tabled(rename = "Avg / unit")]
    average_price: String,
    #[tabled(rename = "Share")]
    share: String,
}

fn category_rows(overview: &SalesOverview) -> Vec<CategoryRow> {
    overview
        .categories
        .iter()
        .map(|c| CategoryRow {
            category: c.category.to_string(),
            total_sales: c.total_sales.to_string(),
            units_sold: c.units_sold,
            average_price: c.average_price.to_string(),
            share: format!("{}%", c.share_percent),
        })
        .collect()
}

pub async fn execute(ctx: &Context) -> AppResult<()> {
    let overview = overview(ctx).await?;
    emit(ctx.json, &overview, |o| {
        format!("{}\nGrand total: {}", render_table(category_rows(o)), o.grand_total)
    })
}

pub async fn overview(ctx: &Context) -> AppResult<SalesOverview> {
    let invoices = ctx.db.invoices().list(None).await?;
    Ok(sales_overview(&invoices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{CustomerArgs, ItemSpec, SaleArgs};
    use crate::commands::sale::invoice;
    use crate::commands::test_support::{context, seed_earrings, seed_ring};
    use crate::commands::stock::restock;
    use aurum_core::{Category, Money};

    #[tokio::test]
    async fn test_empty_overview() {
        let ctx = context().await;
        let overview = overview(&ctx).await.unwrap();

        assert_eq!(overview.categories.len(), 3);
        assert!(overview.grand_total.is_zero());
        assert_eq!(category_rows(&overview)[0].share, "0%");
    }

    #[tokio::test]
    async fn test_overview_by_category() {
        let ctx = context().await;
        seed_ring(&ctx).await;
        seed_earrings(&ctx).await;
        restock(&ctx, "JWL55667788", 4).await.unwrap();

        let args = SaleArgs {
            items: vec![
                ItemSpec {
                    barcode: "JWL12345678".to_string(),
                    quantity: 1,
                },
                ItemSpec {
                    barcode: "JWL55667788".to_string(),
                    quantity: 2,
                },
            ],
            making_mode: None,
            making_value: None,
        };
        let customer = CustomerArgs {
            name: "Priya Sharma".to_string(),
            phone: "9876543210".to_string(),
            address: None,
            email: None,
        };
        let sold = invoice(&ctx, &args, customer).await.unwrap();

        let overview = overview(&ctx).await.unwrap();
        assert_eq!(overview.grand_total, sold.total);

        let gold = overview.for_category(Category::Gold).unwrap();
        assert_eq!(gold.units_sold, 1);
        let imitation = overview.for_category(Category::Imitation).unwrap();
        assert_eq!(imitation.units_sold, 2);
        assert_eq!(imitation.total_sales, sold.lines[1].line_total);

        let silver = overview.for_category(Category::Silver).unwrap();
        assert_eq!(silver.total_sales, Money::zero());
    }
}
