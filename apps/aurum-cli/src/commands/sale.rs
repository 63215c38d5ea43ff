//! # Sale Commands
//!
//! One invocation is one sale session: the `--item` scans build a cart in
//! memory, and the cart is gone when the process exits unless `invoice`
//! stored it.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rates = db.rates().current()                                           │
//! │  session = SaleSession::new(rates, making)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  for each --item BARCODE[:QTY]                                          │
//! │      session.scan(db.products(), barcode, qty)                          │
//! │       │                                                                 │
//! │       ├── quote   → print lines + totals, nothing stored                │
//! │       │                                                                 │
//! │       └── invoice → session.generate_invoice(db.invoices(), customer)   │
//! │                     → INV-2026-0042, stock decremented                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use aurum_core::types::TaxRate;
use aurum_core::{CartTotals, Customer, Invoice, InvoiceLine, MakingCharge, Money, SaleSession};
use serde::Serialize;
use tabled::Tabled;
use tracing::{debug, info};

use super::Context;
use crate::cli::{CustomerArgs, SaleArgs, SaleCommand};
use crate::error::AppResult;
use crate::output::{emit, opt_text, render_table};

// =============================================================================
// Rendering
// =============================================================================

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Barcode")]
    barcode: String,
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Purity")]
    purity: String,
    #[tabled(rename = "Weight (g)")]
    weight: String,
    #[tabled(rename = "Qty")]
    quantity: i64,
    #[tabled(rename = "Base")]
    base: String,
    #[tabled(rename = "Making")]
    making: String,
    #[tabled(rename = "GST")]
    tax: String,
    #[tabled(rename = "Total")]
    total: String,
}

fn line_rows(lines: &[InvoiceLine]) -> Vec<LineRow> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| LineRow {
            position: i + 1,
            barcode: line.barcode.clone(),
            name: line.name.clone(),
            purity: opt_text(line.purity.as_deref()),
            weight: opt_text(line.weight_grams),
            quantity: line.quantity,
            base: line.unit_base_price.multiply_quantity(line.quantity).to_string(),
            making: line.making_charge.to_string(),
            tax: line.tax.to_string(),
            total: line.line_total.to_string(),
        })
        .collect()
}

fn render_totals(subtotal: Money, making: Money, tax: Money, total: Money) -> String {
    let gst = format!("GST ({}%)", TaxRate::JEWELLERY_GST.percentage().normalize());
    [
        ("Subtotal", subtotal),
        ("Making charges", making),
        (gst.as_str(), tax),
        ("Grand total", total),
    ]
    .iter()
    .map(|(label, amount)| format!("{label:>16}: {amount}"))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Full invoice printout: header, lines and totals.
pub(crate) fn render_invoice(store_name: &str, invoice: &Invoice) -> String {
    let mut out = vec![
        store_name.to_string(),
        format!(
            "Invoice {}    {}",
            invoice.invoice_number,
            invoice.created_at.format("%Y-%m-%d %H:%M")
        ),
        format!("Customer: {} ({})", invoice.customer.name, invoice.customer.phone),
    ];
    if let Some(address) = invoice.customer.address.as_deref() {
        out.push(format!("Address:  {address}"));
    }
    if let Some(email) = invoice.customer.email.as_deref() {
        out.push(format!("Email:    {email}"));
    }

    let subtotal: Money = invoice
        .lines
        .iter()
        .map(|l| l.unit_base_price.multiply_quantity(l.quantity))
        .sum();
    let making: Money = invoice.lines.iter().map(|l| l.making_charge).sum();
    let tax: Money = invoice.lines.iter().map(|l| l.tax).sum();

    out.push(render_table(line_rows(&invoice.lines)));
    out.push(render_totals(subtotal, making, tax, invoice.total));
    out.join("\n")
}

// =============================================================================
// Commands
// =============================================================================

/// A priced cart that was not stored.
#[derive(Debug, Serialize)]
pub struct Quote {
    pub making_charge: MakingCharge,
    pub lines: Vec<InvoiceLine>,
    pub totals: CartTotals,
}

pub async fn execute(ctx: &Context, cmd: SaleCommand) -> AppResult<()> {
    match cmd {
        SaleCommand::Quote(args) => {
            let quote = quote(ctx, &args).await?;
            emit(ctx.json, &quote, |q| {
                format!(
                    "Quote (making charge {} {})\n{}\n{}",
                    q.making_charge.value,
                    q.making_charge.mode,
                    render_table(line_rows(&q.lines)),
                    render_totals(
                        q.totals.subtotal,
                        q.totals.making_total,
                        q.totals.tax_total,
                        q.totals.total
                    )
                )
            })
        }
        SaleCommand::Invoice { sale, customer } => {
            let invoice = invoice(ctx, &sale, customer).await?;
            emit(ctx.json, &invoice, |inv| render_invoice(&ctx.config.store_name, inv))
        }
    }
}

/// Making charge for this sale: configured default, overridden per flag.
fn making_for(ctx: &Context, args: &SaleArgs) -> MakingCharge {
    let mut making = ctx.config.making_charge;
    if let Some(mode) = args.making_mode {
        making.mode = mode;
    }
    if let Some(value) = args.making_value {
        making.value = value;
    }
    making
}

async fn build_session(ctx: &Context, args: &SaleArgs) -> AppResult<SaleSession> {
    let rates = ctx.db.rates().current().await?;
    let mut session = SaleSession::new(rates, making_for(ctx, args))?;
    let catalog = ctx.db.products();

    for item in &args.items {
        let line_id = session.scan(&catalog, &item.barcode, item.quantity).await?;
        debug!(barcode = %item.barcode, quantity = item.quantity, line_id = %line_id, "Scanned");
    }

    Ok(session)
}

pub async fn quote(ctx: &Context, args: &SaleArgs) -> AppResult<Quote> {
    let session = build_session(ctx, args).await?;

    Ok(Quote {
        making_charge: session.making_charge(),
        lines: session
            .cart()
            .lines()
            .iter()
            .map(|l| l.to_invoice_line())
            .collect(),
        totals: session.totals(),
    })
}

pub async fn invoice(ctx: &Context, args: &SaleArgs, customer: CustomerArgs) -> AppResult<Invoice> {
    let mut session = build_session(ctx, args).await?;
    let customer = Customer {
        name: customer.name.trim().to_string(),
        phone: customer.phone.trim().to_string(),
        address: customer.address,
        email: customer.email,
    };

    let invoice = session.generate_invoice(&ctx.db.invoices(), &customer).await?;
    info!(
        invoice_number = %invoice.invoice_number,
        total = %invoice.total,
        items = invoice.item_count(),
        "Invoice issued"
    );
    Ok(invoice)
}
