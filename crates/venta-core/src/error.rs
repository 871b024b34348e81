//! # Error Types
//!
//! Domain-specific error types for venta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  venta-core errors (this file)                                      │
//! │  ├── CoreError        - Domain rule violations                      │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  venta-db errors (separate crate)                                   │
//! │  └── StorageError     - Local ledger failures                       │
//! │                                                                     │
//! │  venta-sync errors (separate crate)                                 │
//! │  └── SyncError        - Upload / connectivity failures              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations raised by draft operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The referenced product has no line in the current draft.
    #[error("Product {0} is not in the current sale")]
    ProductNotInDraft(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any state is mutated.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-finite price, bad barcode).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A sale cannot be committed without line items.
    #[error("sale draft has no items")]
    EmptyDraft,

    /// A sale cannot be committed with a non-positive total.
    #[error("sale total must be greater than zero")]
    NonPositiveTotal,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
