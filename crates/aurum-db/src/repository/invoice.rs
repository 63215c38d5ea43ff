//! # Invoice Repository
//!
//! Persists finalized sales and reads them back for history and analytics.
//!
//! ## Invoice Submission
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    submit(NewInvoice)                                   │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ├── seq = MAX(sequence) + 1 for this year  → "INV-2026-0042"         │
//! │    ├── INSERT invoices                                                  │
//! │    ├── for each line:                                                   │
//! │    │     UPDATE products SET quantity = quantity - n                    │
//! │    │       WHERE id = ? AND quantity >= n                               │
//! │    │     └── 0 rows? → InsufficientStock, ROLLBACK                      │
//! │    │     INSERT invoice_lines                                           │
//! │    │                                                                    │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are stored with their priced amounts exactly as the cart computed
//! them, so reprinting an old invoice never depends on today's metal rates.

use async_trait::async_trait;
use aurum_core::ports::InvoiceStore;
use aurum_core::{CoreResult, Customer, Invoice, InvoiceLine, MakingChargeMode, NewInvoice};
use chrono::{DateTime, Datelike, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::str::FromStr;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{category_column, decimal_column, money_column, optional_decimal_column};
use crate::error::{DbError, DbResult};

const INVOICE_COLUMNS: &str = r#"
    id, invoice_number, customer_name, customer_phone,
    customer_address, customer_email, total, created_at
"#;

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: String,
    invoice_number: String,
    customer_name: String,
    customer_phone: String,
    customer_address: Option<String>,
    customer_email: Option<String>,
    total: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct InvoiceLineRow {
    product_id: String,
    barcode: String,
    name: String,
    category: String,
    purity: Option<String>,
    weight_grams: Option<String>,
    quantity: i64,
    unit_base_price: String,
    making_charge_mode: String,
    making_charge_value: String,
    making_charge: String,
    tax: String,
    line_total: String,
}

impl TryFrom<InvoiceLineRow> for InvoiceLine {
    type Error = DbError;

    fn try_from(row: InvoiceLineRow) -> DbResult<Self> {
        let making_charge_mode = MakingChargeMode::from_str(&row.making_charge_mode)
            .map_err(|_| DbError::corrupt("making_charge_mode", &row.making_charge_mode))?;

        Ok(InvoiceLine {
            category: category_column(&row.category)?,
            weight_grams: optional_decimal_column("weight_grams", row.weight_grams.as_deref())?,
            unit_base_price: money_column("unit_base_price", &row.unit_base_price)?,
            making_charge_mode,
            making_charge_value: decimal_column("making_charge_value", &row.making_charge_value)?,
            making_charge: money_column("making_charge", &row.making_charge)?,
            tax: money_column("tax", &row.tax)?,
            line_total: money_column("line_total", &row.line_total)?,
            product_id: row.product_id,
            barcode: row.barcode,
            name: row.name,
            purity: row.purity,
            quantity: row.quantity,
        })
    }
}

/// Formats the human-facing invoice number.
///
/// ```rust
/// use aurum_db::repository::invoice::format_invoice_number;
///
/// assert_eq!(format_invoice_number(2026, 7), "INV-2026-0007");
/// assert_eq!(format_invoice_number(2026, 12345), "INV-2026-12345");
/// ```
pub fn format_invoice_number(year: i32, sequence: i64) -> String {
    format!("INV-{year}-{sequence:04}")
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Stores an invoice and takes its units out of stock, atomically.
    ///
    /// ## Returns
    /// * `Ok(Invoice)` - Stored invoice with id, number and timestamp
    /// * `Err(DbError::InsufficientStock)` - A line exceeds the shelf; nothing stored
    /// * `Err(DbError::NotFound)` - A line references an unknown product
    pub async fn submit(&self, new: &NewInvoice) -> DbResult<Invoice> {
        if new.lines.is_empty() {
            return Err(DbError::QueryFailed("invoice has no lines".to_string()));
        }

        let now = Utc::now();
        let year = now.year();
        let id = Uuid::new_v4().to_string();

        let mut tx = self.pool.begin().await?;

        let sequence: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(sequence), 0) + 1 FROM invoices WHERE invoice_year = ?1",
        )
        .bind(year)
        .fetch_one(&mut *tx)
        .await?;
        let invoice_number = format_invoice_number(year, sequence);

        debug!(
            invoice_number = %invoice_number,
            lines = new.lines.len(),
            total = %new.total,
            "Submitting invoice"
        );

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, invoice_number, invoice_year, sequence,
                customer_name, customer_phone, customer_address, customer_email,
                total, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&id)
        .bind(&invoice_number)
        .bind(year)
        .bind(sequence)
        .bind(new.customer.name.trim())
        .bind(new.customer.phone.trim())
        .bind(non_empty(&new.customer.address))
        .bind(non_empty(&new.customer.email))
        .bind(new.total.amount().to_string())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for (position, line) in new.lines.iter().enumerate() {
            take_stock(&mut tx, line, now).await?;
            insert_line(&mut tx, &id, position as i64, line).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            invoice_number = %invoice_number,
            customer = %new.customer.name,
            total = %new.total,
            "Invoice generated"
        );

        Ok(Invoice {
            id,
            invoice_number,
            customer: new.customer.clone(),
            lines: new.lines.clone(),
            total: new.total,
            created_at: now,
        })
    }

    /// Gets an invoice (with its lines) by its number, e.g. `INV-2026-0001`.
    pub async fn get_by_number(&self, invoice_number: &str) -> DbResult<Option<Invoice>> {
        let sql = format!("SELECT {INVOICE_COLUMNS} FROM invoices WHERE invoice_number = ?1");
        let row: Option<InvoiceRow> = sqlx::query_as(&sql)
            .bind(invoice_number.trim())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Lists invoices newest first, each with its lines.
    pub async fn list(&self, limit: Option<u32>) -> DbResult<Vec<Invoice>> {
        let sql = format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices \
             ORDER BY created_at DESC, invoice_year DESC, sequence DESC \
             LIMIT ?1"
        );
        let rows: Vec<InvoiceRow> = sqlx::query_as(&sql)
            .bind(limit.map(i64::from).unwrap_or(-1))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed invoices");

        let mut invoices = Vec::with_capacity(rows.len());
        for row in rows {
            invoices.push(self.hydrate(row).await?);
        }
        Ok(invoices)
    }

    /// Counts stored invoices.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn hydrate(&self, row: InvoiceRow) -> DbResult<Invoice> {
        let line_rows: Vec<InvoiceLineRow> = sqlx::query_as(
            r#"
            SELECT product_id, barcode, name, category, purity, weight_grams,
                   quantity, unit_base_price, making_charge_mode, making_charge_value,
                   making_charge, tax, line_total
            FROM invoice_lines
            WHERE invoice_id = ?1
            ORDER BY position
            "#,
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await?;

        let lines = line_rows
            .into_iter()
            .map(InvoiceLine::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(Invoice {
            total: money_column("total", &row.total)?,
            id: row.id,
            invoice_number: row.invoice_number,
            customer: Customer {
                name: row.customer_name,
                phone: row.customer_phone,
                address: row.customer_address,
                email: row.customer_email,
            },
            lines,
            created_at: row.created_at,
        })
    }
}

/// Decrements stock for one line, refusing to go below zero.
async fn take_stock(
    tx: &mut Transaction<'_, Sqlite>,
    line: &InvoiceLine,
    now: DateTime<Utc>,
) -> DbResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE products
        SET quantity = quantity - ?2, updated_at = ?3
        WHERE id = ?1 AND quantity >= ?2
        "#,
    )
    .bind(&line.product_id)
    .bind(line.quantity)
    .bind(now)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() > 0 {
        return Ok(());
    }

    let available: Option<i64> = sqlx::query_scalar("SELECT quantity FROM products WHERE id = ?1")
        .bind(&line.product_id)
        .fetch_optional(&mut **tx)
        .await?;

    match available {
        Some(available) => {
            warn!(
                barcode = %line.barcode,
                available = %available,
                requested = %line.quantity,
                "Invoice rejected: insufficient stock"
            );
            Err(DbError::InsufficientStock {
                barcode: line.barcode.clone(),
                available,
                requested: line.quantity,
            })
        }
        None => Err(DbError::not_found("Product", &line.product_id)),
    }
}

async fn insert_line(
    tx: &mut Transaction<'_, Sqlite>,
    invoice_id: &str,
    position: i64,
    line: &InvoiceLine,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO invoice_lines (
            id, invoice_id, position, product_id, barcode, name, category,
            purity, weight_grams, quantity, unit_base_price,
            making_charge_mode, making_charge_value, making_charge, tax, line_total
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(invoice_id)
    .bind(position)
    .bind(&line.product_id)
    .bind(&line.barcode)
    .bind(&line.name)
    .bind(line.category.as_str())
    .bind(&line.purity)
    .bind(line.weight_grams.map(|w| w.to_string()))
    .bind(line.quantity)
    .bind(line.unit_base_price.amount().to_string())
    .bind(line.making_charge_mode.as_str())
    .bind(line.making_charge_value.to_string())
    .bind(line.making_charge.amount().to_string())
    .bind(line.tax.amount().to_string())
    .bind(line.line_total.amount().to_string())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl InvoiceStore for InvoiceRepository {
    async fn submit(&self, invoice: NewInvoice) -> CoreResult<Invoice> {
        Ok(InvoiceRepository::submit(self, &invoice).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use aurum_core::{Category, CoreError, MakingCharge, MetalRates, Money, NewProduct, SaleSession};
    use rust_decimal::Decimal;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn customer() -> Customer {
        Customer {
            name: "Priya Sharma".to_string(),
            phone: "9876543210".to_string(),
            address: Some("12 MG Road".to_string()),
            email: None,
        }
    }

    async fn seed_ring(db: &Database, quantity: i64) {
        db.products()
            .insert(&NewProduct {
                barcode: "JWL12345678".to_string(),
                name: "Gold Ring".to_string(),
                category: Category::Gold,
                weight_grams: Some(Decimal::new(105, 1)),
                purity: Some("22K".to_string()),
                purchase_price: None,
                selling_price: None,
                quantity,
                reorder_level: 1,
            })
            .await
            .unwrap();
    }

    async fn session_with(db: &Database, quantity: i64) -> SaleSession {
        let mut session = SaleSession::new(MetalRates::default(), MakingCharge::default()).unwrap();
        session
            .scan(&db.products(), "JWL12345678", quantity)
            .await
            .unwrap();
        session
    }

    #[test]
    fn test_format_invoice_number() {
        assert_eq!(format_invoice_number(2026, 1), "INV-2026-0001");
        assert_eq!(format_invoice_number(2026, 42), "INV-2026-0042");
    }

    #[tokio::test]
    async fn test_sale_end_to_end() {
        let db = test_db().await;
        seed_ring(&db, 5).await;

        let mut session = session_with(&db, 1).await;
        let invoice = session
            .generate_invoice(&db.invoices(), &customer())
            .await
            .unwrap();

        // 10.5g × ₹6850 = 71925, +10% making, +3% GST
        assert_eq!(invoice.total.to_string(), "₹81491.03");
        assert_eq!(
            invoice.invoice_number,
            format_invoice_number(Utc::now().year(), 1)
        );
        assert!(session.cart().is_empty());

        let ring = db.products().get_by_barcode("JWL12345678").await.unwrap().unwrap();
        assert_eq!(ring.quantity, 4);
    }

    #[tokio::test]
    async fn test_sequential_numbers() {
        let db = test_db().await;
        seed_ring(&db, 5).await;
        let year = Utc::now().year();

        let first = session_with(&db, 1)
            .await
            .generate_invoice(&db.invoices(), &customer())
            .await
            .unwrap();
        let second = session_with(&db, 1)
            .await
            .generate_invoice(&db.invoices(), &customer())
            .await
            .unwrap();

        assert_eq!(first.invoice_number, format_invoice_number(year, 1));
        assert_eq!(second.invoice_number, format_invoice_number(year, 2));
        assert_eq!(db.invoices().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insufficient_stock_rolls_back() {
        let db = test_db().await;
        seed_ring(&db, 2).await;

        // Cart was built while two were on the shelf
        let mut session = session_with(&db, 2).await;
        let ring = db.products().get_by_barcode("JWL12345678").await.unwrap().unwrap();
        db.products().update_stock(&ring.id, -1).await.unwrap();

        let err = session
            .generate_invoice(&db.invoices(), &customer())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 1,
                requested: 2,
                ..
            }
        ));
        assert_eq!(session.cart().line_count(), 1);
        assert_eq!(db.invoices().count().await.unwrap(), 0);

        let ring = db.products().get_by_barcode("JWL12345678").await.unwrap().unwrap();
        assert_eq!(ring.quantity, 1);
    }

    #[tokio::test]
    async fn test_get_by_number_restores_lines() {
        let db = test_db().await;
        seed_ring(&db, 5).await;

        let mut session = session_with(&db, 2).await;
        session
            .set_making_charge(MakingCharge::fixed(Decimal::from(500)))
            .unwrap();
        session.scan(&db.products(), "JWL12345678", 1).await.unwrap();
        let stored = session
            .generate_invoice(&db.invoices(), &customer())
            .await
            .unwrap();

        let loaded = db
            .invoices()
            .get_by_number(&stored.invoice_number)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(loaded.lines.len(), 2);
        assert_eq!(loaded.lines, stored.lines);
        assert_eq!(loaded.total, stored.total);
        assert_eq!(loaded.customer.address.as_deref(), Some("12 MG Road"));
        assert_eq!(loaded.lines[1].making_charge_mode, MakingChargeMode::Fixed);
        assert_eq!(loaded.lines[1].making_charge, Money::from_rupees(500));
        assert_eq!(loaded.item_count(), 3);

        assert!(db.invoices().get_by_number("INV-1999-0001").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = test_db().await;
        seed_ring(&db, 5).await;

        for _ in 0..3 {
            session_with(&db, 1)
                .await
                .generate_invoice(&db.invoices(), &customer())
                .await
                .unwrap();
        }

        let all = db.invoices().list(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all[0].invoice_number > all[2].invoice_number);
        assert_eq!(all[0].lines.len(), 1);

        let limited = db.invoices().list(Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_invoice_rejected() {
        let db = test_db().await;
        let empty = NewInvoice {
            customer: customer(),
            lines: Vec::new(),
            total: Money::zero(),
        };

        assert!(db.invoices().submit(&empty).await.is_err());
    }
}
