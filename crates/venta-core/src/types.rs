//! # Domain Types
//!
//! Core domain types shared by the ledger, the sync engine, and the app layer.
//!
//! ## Identity
//! Rows are keyed by SQLite rowids (`i64`, auto-assigned in insertion order).
//! A sale additionally carries an optional `server_id` once the backend has
//! acknowledged it.
//!
//! ## Snapshot Pattern
//! A [`SaleItem`] carries the product name and unit price captured when the
//! line was added to the draft. Later edits to the product never reach
//! recorded sales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Sync Status
// =============================================================================

/// Whether a locally persisted row has been acknowledged by the backend.
///
/// Stored as an INTEGER column: 0 = pending, 1 = synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[repr(i32)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Not yet uploaded; picked up by the next sync run.
    Pending = 0,
    /// Acknowledged by the backend (terminal).
    Synced = 1,
}

impl Default for SyncStatus {
    fn default() -> Self {
        SyncStatus::Pending
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid. Stored as TEXT (snake_case variant name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Bank transfer.
    Transfer,
    /// Anything else (store credit, mixed tender).
    Other,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Transfer => write!(f, "transfer"),
            PaymentMethod::Other => write!(f, "other"),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the local catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Local identifier (rowid).
    pub id: i64,

    /// Display name shown at checkout and on receipts.
    pub name: String,

    /// Optional longer description.
    pub description: Option<String>,

    /// Current selling price.
    pub price: f64,

    /// Optional purchase cost (for margin reports).
    pub cost: Option<f64>,

    /// Current stock level. May go negative after an oversell; never clamped.
    pub stock: i64,

    /// Optional unique barcode for scanner lookup.
    pub barcode: Option<String>,

    /// Optional category label.
    pub category: Option<String>,

    /// Optional image URL.
    pub image_url: Option<String>,

    /// Whether the backend has seen the latest version of this row.
    pub sync_status: SyncStatus,
}

/// Fields for inserting a new product. The id and sync flag are assigned by
/// the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub cost: Option<f64>,
    pub stock: i64,
    pub barcode: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

/// A locally persisted sale.
///
/// Immutable after creation except for `server_id` and `sync_status`, which
/// only the sync engine writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Local identifier (rowid).
    pub id: i64,

    /// Backend identifier, assigned after a successful upload.
    pub server_id: Option<i64>,

    /// When the sale was committed locally.
    pub date: DateTime<Utc>,

    /// Grand total. Equals the sum of quantity × price over the items.
    pub total: f64,

    /// How the sale was paid.
    pub payment_method: PaymentMethod,

    /// Free-text notes entered at checkout.
    pub notes: String,

    /// Pending until the backend acknowledges the upload.
    pub sync_status: SyncStatus,
}

impl Sale {
    /// Whether this sale still needs to be uploaded.
    pub fn is_pending(&self) -> bool {
        self.sync_status == SyncStatus::Pending
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item belonging to exactly one sale.
///
/// `product_name` and `price` are frozen copies taken from the draft line;
/// they must not reflect later catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    /// Local identifier (rowid).
    pub id: i64,

    /// Owning sale.
    pub sale_id: i64,

    /// Catalog product this line sold.
    pub product_id: i64,

    /// Product name at sale time (frozen).
    pub product_name: String,

    /// Quantity sold.
    pub quantity: i64,

    /// Unit price at sale time (frozen).
    pub price: f64,
}

impl SaleItem {
    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

// =============================================================================
// Sale With Items
// =============================================================================

/// A sale together with its ordered line items, as returned by the commit
/// engine and the history detail read path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleWithItems {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

impl SaleWithItems {
    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
