//! # History Command
//!
//! Lists stored invoices newest first, optionally filtered by customer
//! name, phone or invoice number, with the revenue of what's shown.
//! `--number` prints one invoice in full instead.

use aurum_core::analytics::{search_invoices, total_revenue};
use aurum_core::validation::validate_search_query;
use aurum_core::{Invoice, Money};
use serde::Serialize;
use tabled::Tabled;

use super::sale::render_invoice;
use super::Context;
use crate::cli::HistoryArgs;
use crate::error::{AppError, AppResult};
use crate::output::{emit, render_table};

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Invoice")]
    number: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Items")]
    items: i64,
    #[tabled(rename = "Total")]
    total: String,
}

impl From<&Invoice> for HistoryRow {
    fn from(invoice: &Invoice) -> Self {
        HistoryRow {
            number: invoice.invoice_number.clone(),
            date: invoice.created_at.format("%Y-%m-%d %H:%M").to_string(),
            customer: invoice.customer.name.clone(),
            phone: invoice.customer.phone.clone(),
            items: invoice.item_count(),
            total: invoice.total.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct History {
    pub invoices: Vec<Invoice>,
    pub revenue: Money,
}

pub async fn execute(ctx: &Context, args: HistoryArgs) -> AppResult<()> {
    if let Some(number) = args.number.as_deref() {
        let invoice = find(ctx, number).await?;
        return emit(ctx.json, &invoice, |inv| {
            render_invoice(&ctx.config.store_name, inv)
        });
    }

    let history = history(ctx, &args).await?;
    emit(ctx.json, &history, |h| {
        format!(
            "{}\n{} invoice(s), revenue {}",
            render_table(h.invoices.iter().map(HistoryRow::from)),
            h.invoices.len(),
            h.revenue
        )
    })
}

pub async fn find(ctx: &Context, number: &str) -> AppResult<Invoice> {
    ctx.db
        .invoices()
        .get_by_number(number)
        .await?
        .ok_or_else(|| AppError::not_found("Invoice", number))
}

pub async fn history(ctx: &Context, args: &HistoryArgs) -> AppResult<History> {
    let term = match args.search.as_deref() {
        Some(term) => validate_search_query(term)?,
        None => String::new(),
    };

    let all = ctx.db.invoices().list(None).await?;
    let mut invoices: Vec<Invoice> = search_invoices(&all, &term).into_iter().cloned().collect();
    if let Some(limit) = args.limit {
        invoices.truncate(limit);
    }
    let revenue = total_revenue(&invoices);

    Ok(History { invoices, revenue })
}
