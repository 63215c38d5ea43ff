//! # Ports
//!
//! Traits the sale session talks to. The core never knows where products
//! or invoices live; `aurum-db` implements these over SQLite and tests
//! implement them in memory.
//!
//! ```text
//! SaleSession ──scan()──────────────► ProductCatalog::find_by_barcode
//!             ──generate_invoice()──► InvoiceStore::submit
//! ```

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{Invoice, NewInvoice, Product};

/// Looks products up by their tag barcode.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Returns `Ok(None)` when no product carries this barcode.
    async fn find_by_barcode(&self, barcode: &str) -> CoreResult<Option<Product>>;
}

/// Persists finished sales.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Stores the invoice, assigns its id and number, and takes the sold
    /// units out of stock. Either all of that happens or none of it does.
    async fn submit(&self, invoice: NewInvoice) -> CoreResult<Invoice>;
}
