//! # venta-core: Pure Business Logic for Venta POS
//!
//! This crate contains the domain model of Venta POS as pure logic with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Venta POS Data Flow                           │
//! │                                                                     │
//! │  UI shell / venta-pos commands                                      │
//! │       │                                                             │
//! │  ┌────▼────────────────────────────────────────────────────────┐    │
//! │  │              ★ venta-core (THIS CRATE) ★                    │    │
//! │  │                                                             │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐              │    │
//! │  │   │   types   │  │   draft   │  │ validation │              │    │
//! │  │   │  Product  │  │ SaleDraft │  │   rules    │              │    │
//! │  │   │ Sale/Item │  │ DraftLine │  │   checks   │              │    │
//! │  │   └───────────┘  └───────────┘  └────────────┘              │    │
//! │  │                                                             │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                         │    │
//! │  └────┬────────────────────────────────────────────────────────┘    │
//! │       │                                                             │
//! │  venta-db (SQLite) / venta-sync (REST uplink)                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, SaleItem, ...)
//! - [`draft`] - The in-memory sale draft (the cart being assembled)
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::{DraftLine, SaleDraft};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;
