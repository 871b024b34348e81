//! # venta-db: The Local Ledger
//!
//! SQLite storage for Venta POS: the on-device source of truth for products,
//! sales, and sale items.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Venta POS Data Flow                           │
//! │                                                                     │
//! │  venta-pos (checkout, history)     venta-sync (uploader)            │
//! │       │                                 │                           │
//! │  ┌────▼─────────────────────────────────▼────────────────────────┐  │
//! │  │                   venta-db (THIS CRATE)                       │  │
//! │  │                                                               │  │
//! │  │   ┌──────────────┐   ┌───────────────┐   ┌────────────────┐   │  │
//! │  │   │   Database   │   │  Repositories │   │   Migrations   │   │  │
//! │  │   │  (pool.rs)   │◄──│  product.rs   │   │   (embedded)   │   │  │
//! │  │   │  SqlitePool  │   │  sale.rs      │   │  001_init.sql  │   │  │
//! │  │   └──────────────┘   └───────────────┘   └────────────────┘   │  │
//! │  └───────────────────────────────┬───────────────────────────────┘  │
//! │                                  │                                  │
//! │                           SQLite (WAL, FKs on)                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Repository implementations (product, sale)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use venta_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("venta.db")).await?;
//! let committed = db.sales().commit_draft(&draft).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
