//! # Product Repository
//!
//! Database operations for registered jewelry.
//!
//! ## Key Operations
//! - Registration (`insert`) with a unique barcode
//! - Lookup by id or barcode (the latter backs [`ProductCatalog`])
//! - Filtered listing for the stock and alert views
//! - Stock adjustments (restock, corrections)
//!
//! ## Filtered Listing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductQuery { category: Some(Gold), search: Some("ring") }            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WHERE category = 'gold'                                                │
//! │    AND (name LIKE '%ring%' OR barcode LIKE '%ring%')                    │
//! │    AND is_active = 1                                                    │
//! │  ORDER BY name                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use aurum_core::ports::ProductCatalog;
use aurum_core::validation::validate_new_product;
use aurum_core::{Category, CoreResult, NewProduct, Product};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use super::{category_column, optional_decimal_column, optional_money_column};
use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str = r#"
    id, barcode, name, category, weight_grams, purity,
    purchase_price, selling_price, quantity, reorder_level,
    is_active, created_at, updated_at
"#;

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    barcode: String,
    name: String,
    category: String,
    weight_grams: Option<String>,
    purity: Option<String>,
    purchase_price: Option<String>,
    selling_price: Option<String>,
    quantity: i64,
    reorder_level: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> DbResult<Self> {
        Ok(Product {
            category: category_column(&row.category)?,
            weight_grams: optional_decimal_column("weight_grams", row.weight_grams.as_deref())?,
            purchase_price: optional_money_column("purchase_price", row.purchase_price.as_deref())?,
            selling_price: optional_money_column("selling_price", row.selling_price.as_deref())?,
            id: row.id,
            barcode: row.barcode,
            name: row.name,
            purity: row.purity,
            quantity: row.quantity,
            reorder_level: row.reorder_level,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_products(rows: Vec<ProductRow>) -> DbResult<Vec<Product>> {
    rows.into_iter().map(Product::try_from).collect()
}

// =============================================================================
// Query Filter
// =============================================================================

/// Filter for [`ProductRepository::list`].
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<Category>,
    /// Substring of name or barcode, case-insensitive.
    pub search: Option<String>,
    pub include_inactive: bool,
    pub limit: Option<u32>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let ring = repo.get_by_barcode("JWL12345678").await?;
/// let gold = repo.list(&ProductQuery { category: Some(Category::Gold), ..Default::default() }).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Registers a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with generated id and timestamps
    /// * `Err(DbError::UniqueViolation)` - Barcode already registered
    /// * `Err(DbError::QueryFailed)` - Registration failed validation
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        validate_new_product(new).map_err(|e| DbError::QueryFailed(e.to_string()))?;

        let barcode = new.barcode.trim();
        debug!(barcode = %barcode, category = %new.category, "Inserting product");

        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            barcode: barcode.to_string(),
            name: new.name.trim().to_string(),
            category: new.category,
            weight_grams: new.weight_grams,
            purity: new.purity.clone().filter(|p| !p.trim().is_empty()),
            purchase_price: new.purchase_price,
            selling_price: new.selling_price,
            quantity: new.quantity,
            reorder_level: new.reorder_level,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO products (
                id, barcode, name, category, weight_grams, purity,
                purchase_price, selling_price, quantity, reorder_level,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&product.id)
        .bind(&product.barcode)
        .bind(&product.name)
        .bind(product.category.as_str())
        .bind(product.weight_grams.map(|w| w.to_string()))
        .bind(&product.purity)
        .bind(product.purchase_price.map(|p| p.amount().to_string()))
        .bind(product.selling_price.map(|p| p.amount().to_string()))
        .bind(product.quantity)
        .bind(product.reorder_level)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, barcode),
            other => other,
        })?;

        info!(id = %product.id, barcode = %product.barcode, "Product registered");
        Ok(product)
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Gets a product by its tag barcode, active or not.
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        debug!(barcode = %barcode, "Looking up product by barcode");

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE barcode = ?1");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(barcode.trim())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Lists products matching a filter, ordered by name.
    pub async fn list(&self, query: &ProductQuery) -> DbResult<Vec<Product>> {
        let pattern = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        debug!(
            category = ?query.category,
            search = ?pattern,
            include_inactive = query.include_inactive,
            "Listing products"
        );

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE (?1 IS NULL OR category = ?1)
              AND (?2 IS NULL OR name LIKE ?2 OR barcode LIKE ?2)
              AND (?3 OR is_active = 1)
            ORDER BY name, barcode
            LIMIT ?4
            "#
        );

        let rows: Vec<ProductRow> = sqlx::query_as(&sql)
            .bind(query.category.map(|c| c.as_str()))
            .bind(pattern)
            .bind(query.include_inactive)
            .bind(query.limit.map(i64::from).unwrap_or(-1))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed products");
        into_products(rows)
    }

    /// Active products at or below their reorder level.
    pub async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE is_active = 1 AND quantity <= reorder_level \
             ORDER BY quantity, name"
        );
        let rows: Vec<ProductRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        into_products(rows)
    }

    /// Adjusts the stock level by `delta` and returns the new quantity.
    ///
    /// ## Delta Updates
    /// ```text
    /// ❌ UPDATE products SET quantity = 7            (lost update)
    /// ✅ UPDATE products SET quantity = quantity + 2  (restock)
    /// ```
    ///
    /// Stock never goes below zero: a delta that would do so fails with
    /// `DbError::InsufficientStock` and changes nothing.
    pub async fn update_stock(&self, id: &str, delta: i64) -> DbResult<i64> {
        debug!(id = %id, delta = %delta, "Updating stock");

        let new_quantity: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE products
            SET quantity = quantity + ?2, updated_at = ?3
            WHERE id = ?1 AND quantity + ?2 >= 0
            RETURNING quantity
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(quantity) = new_quantity {
            info!(id = %id, delta = %delta, quantity = %quantity, "Stock updated");
            return Ok(quantity);
        }

        match self.get_by_id(id).await? {
            Some(product) => Err(DbError::InsufficientStock {
                barcode: product.barcode,
                available: product.quantity,
                requested: -delta,
            }),
            None => Err(DbError::not_found("Product", id)),
        }
    }

    /// Soft-deletes a product by setting is_active = false.
    ///
    /// Invoices still reference the product, so the row stays.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let result = sqlx::query("UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts active products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ProductCatalog for ProductRepository {
    async fn find_by_barcode(&self, barcode: &str) -> CoreResult<Option<Product>> {
        Ok(self.get_by_barcode(barcode).await?)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
