//! # aurum-core: Pure Business Logic for Aurum POS
//!
//! This crate is the **heart** of Aurum POS. It contains all jewelry billing
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Aurum POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    aurum-cli (or any UI)                        │   │
//! │  │    rates ──► product ──► sale quote/invoice ──► history        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ aurum-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │ pricing │ │  cart   │ │  sale   │  │   │
//! │  │   │ Product │ │  Money  │ │ Making  │ │  Cart   │ │ Session │  │   │
//! │  │   │ Invoice │ │ TaxRate │ │ Charge  │ │  Line   │ │  Ports  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ports (ProductCatalog, InvoiceStore)   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    aurum-db (Database Layer)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, MetalRates, Customer, Invoice, etc.)
//! - [`money`] - Money type with exact decimal arithmetic
//! - [`pricing`] - The line pricing calculator (making charge + GST)
//! - [`cart`] - In-progress sale cart
//! - [`sale`] - Sale session tying cart, catalog and invoice store together
//! - [`ports`] - Traits the storage layer implements
//! - [`stock`] - Low-stock alert levels
//! - [`analytics`] - Sales history search and per-category overview
//! - [`password`] - Password strength heuristic
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use aurum_core::money::Money;
//! use aurum_core::pricing::{price_line, MakingCharge};
//! use rust_decimal::Decimal;
//!
//! // 10.5g of gold at ₹6850/g
//! let base = Money::from_rupees(71925);
//! let pricing = price_line(base, 1, MakingCharge::percentage(Decimal::from(10)));
//!
//! assert_eq!(pricing.making_charge, Money::from_paise(719250));
//! assert_eq!(pricing.line_total.to_string(), "₹81491.03");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod cart;
pub mod error;
pub mod money;
pub mod password;
pub mod ports;
pub mod pricing;
pub mod sale;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLineItem, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{price_line, LinePricing, MakingCharge, MakingChargeMode};
pub use sale::SaleSession;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single cart line.
///
/// Guards against typing 1000 instead of 10 at the counter.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Heaviest piece accepted at registration, in grams.
pub const MAX_WEIGHT_GRAMS: i64 = 100_000;

/// Largest selling price, purchase price or per-gram metal rate, in rupees.
pub const MAX_PRICE_RUPEES: i64 = 1_000_000_000_000;

/// Largest percentage making charge.
pub const MAX_MAKING_PERCENT: i64 = 1_000;
