//! # Catalog Operations
//!
//! Product management the way the UI drives it: validate, then hit the
//! ledger. Stock adjustments ride the same storage primitive the commit
//! engine uses, so manual restocks and sale decrements cannot race past
//! each other.

use thiserror::Error;
use tracing::info;

use crate::state::AppState;
use venta_core::validation::{validate_barcode, validate_price, validate_product_name};
use venta_core::{NewProduct, Product, ValidationError};
use venta_db::StorageError;

/// Errors surfaced by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Rejected before any storage mutation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Ledger failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

fn validate(name: &str, price: f64, barcode: Option<&str>) -> Result<(), ValidationError> {
    validate_product_name(name)?;
    validate_price(price)?;
    if let Some(barcode) = barcode {
        validate_barcode(barcode)?;
    }
    Ok(())
}

/// Adds a product to the catalog.
pub async fn add_product(state: &AppState, new: &NewProduct) -> Result<Product, CatalogError> {
    validate(&new.name, new.price, new.barcode.as_deref())?;

    let product = state.db.products().insert(new).await?;
    info!(id = product.id, name = %product.name, "Product added");
    Ok(product)
}

/// Updates an existing product.
pub async fn update_product(state: &AppState, product: &Product) -> Result<(), CatalogError> {
    validate(&product.name, product.price, product.barcode.as_deref())?;

    state.db.products().update(product).await?;
    info!(id = product.id, "Product updated");
    Ok(())
}

/// Adjusts stock by a signed delta (restock or correction) and returns the
/// new level. Negative results are recorded as-is.
pub async fn adjust_stock(
    state: &AppState,
    product_id: i64,
    delta: i64,
) -> Result<i64, CatalogError> {
    let stock = state.db.products().adjust_stock(product_id, delta).await?;
    info!(product_id, delta, stock, "Stock adjusted");
    Ok(stock)
}

/// Resolves a scanned barcode to a product, if the catalog knows it.
pub async fn lookup_barcode(
    state: &AppState,
    barcode: &str,
) -> Result<Option<Product>, CatalogError> {
    Ok(state.db.products().get_by_barcode(barcode).await?)
}

// =============================================================================
// Unit Tests
// =============================================================================
