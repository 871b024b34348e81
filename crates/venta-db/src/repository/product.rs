//! # Product Repository
//!
//! Database operations for the local product catalog.
//!
//! Every mutation flags the row as unsynced (`sync_status = 0`) so the
//! backend eventually receives the latest version. Stock changes go through
//! single atomic UPDATE statements; the sale commit uses the same statement
//! shape inside its transaction.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use venta_core::{NewProduct, Product};

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, cost, stock, barcode, category, image_url, sync_status";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product and returns it with its assigned id.
    pub async fn insert(&self, new: &NewProduct) -> StorageResult<Product> {
        debug!(name = %new.name, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, cost, stock, barcode, category, image_url, sync_status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0)
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(new.cost)
        .bind(new.stock)
        .bind(&new.barcode)
        .bind(&new.category)
        .bind(&new.image_url)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| StorageError::not_found("Product", id))
    }

    /// Gets a product by id.
    pub async fn get_by_id(&self, id: i64) -> StorageResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Looks a product up by its barcode (scanner path).
    pub async fn get_by_barcode(&self, barcode: &str) -> StorageResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE barcode = ?1"
        ))
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Case-insensitive name search for the checkout screen.
    pub async fn search(&self, query: &str, limit: u32) -> StorageResult<Vec<Product>> {
        let pattern = format!("%{}%", query);

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE name LIKE ?1 ORDER BY name LIMIT ?2"
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists the whole catalog, sorted by name.
    pub async fn list_all(&self) -> StorageResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Updates all editable fields of a product and flags it unsynced.
    pub async fn update(&self, product: &Product) -> StorageResult<()> {
        debug!(id = product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?2, description = ?3, price = ?4, cost = ?5, stock = ?6,
                barcode = ?7, category = ?8, image_url = ?9, sync_status = 0
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.cost)
        .bind(product.stock)
        .bind(&product.barcode)
        .bind(&product.category)
        .bind(&product.image_url)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Adjusts a product's stock by a signed delta (manual restock or
    /// correction) and returns the new level.
    ///
    /// The level is never clamped; a negative result is recorded as-is.
    pub async fn adjust_stock(&self, id: i64, delta: i64) -> StorageResult<i64> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock + ?1, sync_status = 0
            WHERE id = ?2
            "#,
        )
        .bind(delta)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("Product", id));
        }

        let stock: i64 = sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        debug!(id, delta, stock, "Stock adjusted");
        Ok(stock)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
