//! # Sale Session
//!
//! One counter sale from first scan to printed invoice.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Sale Session                                    │
//! │                                                                         │
//! │  new(rates, making)                                                     │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  scan(barcode, qty) ◄──┐   catalog lookup, stock check, price freeze    │
//! │      │                 │                                                │
//! │      ├─ set_making_charge (affects later scans only)                    │
//! │      ├─ update_quantity / remove_line                                   │
//! │      │                 │                                                │
//! │      └─────────────────┘                                                │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  generate_invoice(customer)                                             │
//! │      ├── Ok  → cart cleared, Invoice returned                           │
//! │      └── Err → cart untouched, operator can fix and retry               │
//! │                                                                         │
//! │  Dropping the session abandons the cart. Nothing is persisted until    │
//! │  the invoice store accepts the invoice.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::cart::{Cart, CartLineItem, CartTotals};
use crate::error::{CoreError, CoreResult};
use crate::ports::{InvoiceStore, ProductCatalog};
use crate::pricing::MakingCharge;
use crate::types::{Customer, Invoice, MetalRates, NewInvoice};
use crate::validation::{validate_barcode, validate_customer, validate_making_charge, validate_quantity};

/// A single in-progress sale.
#[derive(Debug, Clone)]
pub struct SaleSession {
    cart: Cart,
    making: MakingCharge,
    rates: MetalRates,
}

impl SaleSession {
    /// Starts an empty sale priced at `rates` with `making` as the initial
    /// making charge.
    pub fn new(rates: MetalRates, making: MakingCharge) -> CoreResult<Self> {
        validate_making_charge(&making)?;
        Ok(SaleSession {
            cart: Cart::new(),
            making,
            rates,
        })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn making_charge(&self) -> MakingCharge {
        self.making
    }

    pub fn rates(&self) -> &MetalRates {
        &self.rates
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Changes the making charge for lines scanned from now on.
    pub fn set_making_charge(&mut self, making: MakingCharge) -> CoreResult<()> {
        validate_making_charge(&making)?;
        self.making = making;
        Ok(())
    }

    /// Looks a tag up and adds it to the cart.
    ///
    /// ## Checks
    /// 1. barcode and quantity are well formed
    /// 2. the product exists and is active
    /// 3. the shelf holds enough units, counting lines already in the cart
    /// 4. the product can be priced (weight for metal, price for imitation)
    ///
    /// ## Returns
    /// The id of the new line.
    pub async fn scan<C>(&mut self, catalog: &C, barcode: &str, quantity: i64) -> CoreResult<String>
    where
        C: ProductCatalog + ?Sized,
    {
        let barcode = barcode.trim();
        validate_barcode(barcode)?;
        validate_quantity(quantity)?;

        let product = catalog
            .find_by_barcode(barcode)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(barcode.to_string()))?;

        if !product.is_active {
            return Err(CoreError::ProductInactive(product.barcode));
        }

        let already_in_cart: i64 = self
            .cart
            .lines()
            .iter()
            .filter(|l| l.product_id == product.id)
            .map(CartLineItem::quantity)
            .sum();
        let requested = already_in_cart + quantity;
        if !product.can_sell(requested) {
            return Err(CoreError::InsufficientStock {
                barcode: product.barcode,
                available: product.quantity,
                requested,
            });
        }

        let unit_base_price = product.unit_base_price(&self.rates)?;
        let line = CartLineItem::from_product(&product, unit_base_price, quantity, self.making);
        self.cart.add_line(line)
    }

    /// See [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<()> {
        self.cart.update_quantity(line_id, quantity)
    }

    /// See [`Cart::remove_line`].
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<CartLineItem> {
        self.cart.remove_line(line_id)
    }

    /// Builds the invoice payload without submitting it.
    pub fn draft_invoice(&self, customer: &Customer) -> CoreResult<NewInvoice> {
        validate_customer(customer)?;
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(NewInvoice {
            customer: customer.clone(),
            lines: self
                .cart
                .lines()
                .iter()
                .map(CartLineItem::to_invoice_line)
                .collect(),
            total: self.cart.total(),
        })
    }

    /// Submits the cart as an invoice.
    ///
    /// The cart is cleared only after the store accepts the invoice; any
    /// error leaves it exactly as it was.
    pub async fn generate_invoice<S>(&mut self, store: &S, customer: &Customer) -> CoreResult<Invoice>
    where
        S: InvoiceStore + ?Sized,
    {
        let draft = self.draft_invoice(customer)?;
        let invoice = store.submit(draft).await?;
        self.cart.clear();
        Ok(invoice)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::money::Money;
    use crate::types::{Category, Product};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MemoryCatalog {
        products: HashMap<String, Product>,
    }

    impl MemoryCatalog {
        fn new(products: Vec<Product>) -> Self {
            MemoryCatalog {
                products: products.into_iter().map(|p| (p.barcode.clone(), p)).collect(),
            }
        }
    }

    #[async_trait]
    impl ProductCatalog for MemoryCatalog {
        async fn find_by_barcode(&self, barcode: &str) -> CoreResult<Option<Product>> {
            Ok(self.products.get(barcode).cloned())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        submitted: Mutex<Vec<NewInvoice>>,
        fail: bool,
    }

    #[async_trait]
    impl InvoiceStore for MemoryStore {
        async fn submit(&self, invoice: NewInvoice) -> CoreResult<Invoice> {
            if self.fail {
                return Err(CoreError::Backend("disk full".to_string()));
            }
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push(invoice.clone());
            Ok(Invoice {
                id: format!("inv-{}", submitted.len()),
                invoice_number: format!("INV-2024-{:04}", submitted.len()),
                customer: invoice.customer,
                lines: invoice.lines,
                total: invoice.total,
                created_at: Utc::now(),
            })
        }
    }

    fn gold_ring() -> Product {
        Product {
            id: "p-ring".to_string(),
            barcode: "JWL12345678".to_string(),
            name: "Gold Ring".to_string(),
            category: Category::Gold,
            weight_grams: Some(Decimal::new(105, 1)),
            purity: Some("22K".to_string()),
            purchase_price: None,
            selling_price: None,
            quantity: 5,
            reorder_level: 3,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn earrings() -> Product {
        Product {
            id: "p-ear".to_string(),
            barcode: "JWL55667788".to_string(),
            name: "Kundan Earrings".to_string(),
            category: Category::Imitation,
            weight_grams: None,
            purity: None,
            purchase_price: Some(Money::from_rupees(800)),
            selling_price: Some(Money::from_rupees(1200)),
            quantity: 2,
            reorder_level: 5,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn customer() -> Customer {
        Customer {
            name: "Priya Sharma".to_string(),
            phone: "9876543210".to_string(),
            address: Some("12 MG Road".to_string()),
            email: None,
        }
    }

    fn session() -> SaleSession {
        SaleSession::new(MetalRates::default(), MakingCharge::default()).unwrap()
    }

    #[tokio::test]
    async fn test_scan_prices_metal_item() {
        let catalog = MemoryCatalog::new(vec![gold_ring()]);
        let mut sale = session();

        let id = sale.scan(&catalog, "JWL12345678", 1).await.unwrap();

        let line = sale.cart().line(&id).unwrap();
        assert_eq!(line.unit_base_price, Money::from_rupees(71925));
        assert_eq!(sale.totals().total.to_string(), "₹81491.03");
    }

    #[tokio::test]
    async fn test_scan_unknown_and_inactive() {
        let mut inactive = earrings();
        inactive.is_active = false;
        let catalog = MemoryCatalog::new(vec![inactive]);
        let mut sale = session();

        assert!(matches!(
            sale.scan(&catalog, "JWL00000000", 1).await,
            Err(CoreError::ProductNotFound(_))
        ));
        assert!(matches!(
            sale.scan(&catalog, "JWL55667788", 1).await,
            Err(CoreError::ProductInactive(_))
        ));
        assert!(sale.cart().is_empty());
    }

    #[tokio::test]
    async fn test_scan_counts_units_already_in_cart() {
        let catalog = MemoryCatalog::new(vec![earrings()]);
        let mut sale = session();

        sale.scan(&catalog, "JWL55667788", 2).await.unwrap();
        let err = sale.scan(&catalog, "JWL55667788", 1).await.unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 2,
                requested: 3,
                ..
            }
        ));
        assert_eq!(sale.cart().line_count(), 1);
    }

    #[tokio::test]
    async fn test_scan_rejects_bad_input() {
        let catalog = MemoryCatalog::new(vec![gold_ring()]);
        let mut sale = session();

        assert!(matches!(
            sale.scan(&catalog, "", 1).await,
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            sale.scan(&catalog, "JWL12345678", 0).await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_making_change_applies_to_later_scans_only() {
        let catalog = MemoryCatalog::new(vec![gold_ring(), earrings()]);
        let mut sale = session();

        let first = sale.scan(&catalog, "JWL12345678", 1).await.unwrap();
        sale.set_making_charge(MakingCharge::fixed(Decimal::from(150))).unwrap();
        let second = sale.scan(&catalog, "JWL55667788", 2).await.unwrap();

        assert_eq!(
            sale.cart().line(&first).unwrap().making_charge(),
            Money::from_paise(719_250)
        );
        assert_eq!(
            sale.cart().line(&second).unwrap().making_charge(),
            Money::from_rupees(300)
        );
    }

    #[tokio::test]
    async fn test_negative_making_rejected() {
        let mut sale = session();
        let err = sale
            .set_making_charge(MakingCharge::percentage(Decimal::from(-5)))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustNotBeNegative { .. })
        ));
        assert_eq!(sale.making_charge(), MakingCharge::default());
    }

    #[tokio::test]
    async fn test_generate_invoice_clears_cart() {
        let catalog = MemoryCatalog::new(vec![gold_ring(), earrings()]);
        let store = MemoryStore::default();
        let mut sale = session();

        sale.scan(&catalog, "JWL12345678", 1).await.unwrap();
        sale.scan(&catalog, "JWL55667788", 1).await.unwrap();
        let expected_total = sale.totals().total;

        let invoice = sale.generate_invoice(&store, &customer()).await.unwrap();

        assert_eq!(invoice.invoice_number, "INV-2024-0001");
        assert_eq!(invoice.total, expected_total);
        assert_eq!(invoice.lines.len(), 2);
        assert!(sale.cart().is_empty());
        assert_eq!(store.submitted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_invoice_requires_customer_and_items() {
        let catalog = MemoryCatalog::new(vec![gold_ring()]);
        let store = MemoryStore::default();
        let mut sale = session();

        assert!(matches!(
            sale.generate_invoice(&store, &customer()).await,
            Err(CoreError::EmptyCart)
        ));

        sale.scan(&catalog, "JWL12345678", 1).await.unwrap();
        let mut nameless = customer();
        nameless.name = String::new();
        assert!(matches!(
            sale.generate_invoice(&store, &nameless).await,
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));

        assert_eq!(sale.cart().line_count(), 1);
        assert!(store.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_cart() {
        let catalog = MemoryCatalog::new(vec![gold_ring()]);
        let store = MemoryStore {
            fail: true,
            ..MemoryStore::default()
        };
        let mut sale = session();
        sale.scan(&catalog, "JWL12345678", 1).await.unwrap();

        assert!(matches!(
            sale.generate_invoice(&store, &customer()).await,
            Err(CoreError::Backend(_))
        ));
        assert_eq!(sale.cart().line_count(), 1);
    }

    #[tokio::test]
    async fn test_update_and_remove_delegate_to_cart() {
        let catalog = MemoryCatalog::new(vec![gold_ring()]);
        let mut sale = session();
        let id = sale.scan(&catalog, "JWL12345678", 1).await.unwrap();

        sale.update_quantity(&id, 2).unwrap();
        assert_eq!(sale.totals().total_quantity, 2);

        assert!(sale.update_quantity(&id, 0).is_err());
        assert_eq!(sale.totals().total_quantity, 2);

        sale.remove_line(&id).unwrap();
        assert!(sale.totals().total.is_zero());
    }
}
