//! # Sale Repository
//!
//! Database operations for sales and sale items, including the transactional
//! commit unit.
//!
//! ## Commit Unit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   SINGLE TRANSACTION (commit_draft)                 │
//! │                                                                     │
//! │  1. INSERT INTO sales (..., sync_status = 0)                        │
//! │                                                                     │
//! │  2. For every draft line:                                           │
//! │     INSERT INTO sale_items (sale_id, product_id, name, qty, price)  │
//! │                                                                     │
//! │  3. For every draft line:                                           │
//! │     UPDATE products SET stock = stock - qty, sync_status = 0        │
//! │                                                                     │
//! │  COMMIT ← all steps succeed, or the drop of the transaction         │
//! │           rolls every one of them back                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A half-committed sale (recorded total without its items, or a stock
//! decrement without a recorded sale) is therefore impossible.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use venta_core::{Sale, SaleDraft, SaleItem, SaleWithItems, SyncStatus};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Persists a draft as a sale with its items and applies the stock
    /// decrements, as one atomic unit.
    ///
    /// ## Effects (all inside one transaction)
    /// 1. Insert the sale row with sync status pending
    /// 2. Insert one item row per draft line (name and price snapshots)
    /// 3. Decrement each product's stock by the line quantity
    ///
    /// Stock sufficiency is deliberately not checked; a resulting negative
    /// stock level is recorded as-is.
    ///
    /// ## Returns
    /// The persisted sale with its assigned id and items.
    pub async fn commit_draft(&self, draft: &SaleDraft) -> StorageResult<SaleWithItems> {
        let date = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO sales (date, total, payment_method, notes, sync_status)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(date.to_rfc3339())
        .bind(draft.total())
        .bind(draft.payment_method())
        .bind(draft.notes())
        .bind(SyncStatus::Pending)
        .execute(&mut *tx)
        .await?;

        let sale_id = result.last_insert_rowid();
        debug!(sale_id, total = draft.total(), "Inserted sale row");

        let mut items = Vec::with_capacity(draft.item_count());
        for line in draft.items() {
            let result = sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_id, product_name, quantity, price)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(sale_id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.quantity)
            .bind(line.price)
            .execute(&mut *tx)
            .await?;

            items.push(SaleItem {
                id: result.last_insert_rowid(),
                sale_id,
                product_id: line.product_id,
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                price: line.price,
            });
        }

        for line in draft.items() {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET stock = stock - ?1, sync_status = 0
                WHERE id = ?2
                "#,
            )
            .bind(line.quantity)
            .bind(line.product_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                // Early return drops the transaction, rolling back the sale
                // and item inserts above.
                return Err(StorageError::not_found("Product", line.product_id));
            }
        }

        tx.commit().await?;

        info!(
            sale_id,
            total = draft.total(),
            items = items.len(),
            "Sale committed"
        );

        Ok(SaleWithItems {
            sale: Sale {
                id: sale_id,
                server_id: None,
                date,
                total: draft.total(),
                payment_method: draft.payment_method(),
                notes: draft.notes().to_string(),
                sync_status: SyncStatus::Pending,
            },
            items,
        })
    }

    /// Gets a sale by id.
    pub async fn get_by_id(&self, id: i64) -> StorageResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, server_id, date, total, payment_method, notes, sync_status
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets a sale together with its items, in line order.
    pub async fn get_with_items(&self, id: i64) -> StorageResult<Option<SaleWithItems>> {
        let Some(sale) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let items = self.get_items(id).await?;
        Ok(Some(SaleWithItems { sale, items }))
    }

    /// Gets all items for a sale, in the order they were recorded.
    pub async fn get_items(&self, sale_id: i64) -> StorageResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, product_name, quantity, price
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists the most recent sales, newest first (history screen).
    pub async fn list_recent(&self, limit: u32) -> StorageResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, server_id, date, total, payment_method, notes, sync_status
            FROM sales
            ORDER BY date DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Returns all pending sales in local creation order, oldest first.
    ///
    /// Rowids are assigned in insertion order; `date` alone can tie within
    /// a second.
    pub async fn pending_oldest_first(&self) -> StorageResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, server_id, date, total, payment_method, notes, sync_status
            FROM sales
            WHERE sync_status = 0
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Counts sales still waiting for upload.
    pub async fn count_pending(&self) -> StorageResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE sync_status = 0")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Records a successful upload: stores the backend id and flips the sale
    /// to synced. Only the sync engine calls this.
    pub async fn mark_synced(&self, sale_id: i64, server_id: i64) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE sales
            SET server_id = ?2, sync_status = 1
            WHERE id = ?1
            "#,
        )
        .bind(sale_id)
        .bind(server_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("Sale", sale_id));
        }

        debug!(sale_id, server_id, "Sale marked synced");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use venta_core::{NewProduct, Product, SaleDraft};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, price: f64, stock: i64) -> Product {
        db.products()
            .insert(&NewProduct {
                name: name.to_string(),
                price,
                stock,
                ..Default::default()
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_commit_records_sale_items_and_stock() {
        let db = test_db().await;
        let a = seed_product(&db, "Product A", 10.0, 5).await;
        let b = seed_product(&db, "Product B", 15.0, 5).await;

        let mut draft = SaleDraft::new();
        draft.add_item(&a, 2).unwrap();
        draft.add_item(&b, 1).unwrap();

        let committed = db.sales().commit_draft(&draft).await.unwrap();

        assert_eq!(committed.sale.total, 35.0);
        assert_eq!(committed.sale.sync_status, SyncStatus::Pending);
        assert_eq!(committed.items.len(), 2);

        // Total equals the sum over the persisted items, exactly.
        let sum: f64 = committed.items.iter().map(|i| i.line_total()).sum();
        assert_eq!(committed.sale.total, sum);

        // Stock decremented per line.
        let a = db.products().get_by_id(a.id).await.unwrap().unwrap();
        let b = db.products().get_by_id(b.id).await.unwrap().unwrap();
        assert_eq!(a.stock, 3);
        assert_eq!(b.stock, 4);
    }

    #[tokio::test]
    async fn test_commit_allows_oversell_to_negative_stock() {
        let db = test_db().await;
        let product = seed_product(&db, "Scarce", 4.0, 1).await;

        let mut draft = SaleDraft::new();
        draft.add_item(&product, 3).unwrap();

        db.sales().commit_draft(&draft).await.unwrap();

        let product = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(product.stock, -2);
    }

    #[tokio::test]
    async fn test_commit_rolls_back_entirely_on_item_failure() {
        let db = test_db().await;
        let good = seed_product(&db, "Good", 10.0, 5).await;

        let mut draft = SaleDraft::new();
        draft.add_item(&good, 2).unwrap();
        // Last line references a product id that does not exist; the item
        // insert fails on the foreign key after the sale row and the first
        // item row were written.
        draft
            .add_item(
                &Product {
                    id: 9999,
                    ..good.clone()
                },
                1,
            )
            .unwrap();

        let err = db.sales().commit_draft(&draft).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::ForeignKeyViolation { .. } | StorageError::NotFound { .. }
        ));

        // Nothing persisted: no sale, no items, stock untouched.
        let sales: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(sales, 0);
        assert_eq!(items, 0);

        let good = db.products().get_by_id(good.id).await.unwrap().unwrap();
        assert_eq!(good.stock, 5);
    }

    #[tokio::test]
    async fn test_pending_oldest_first_and_mark_synced() {
        let db = test_db().await;
        let product = seed_product(&db, "Product", 2.0, 100).await;

        let mut ids = Vec::new();
        for _ in 0..3 {
            let mut draft = SaleDraft::new();
            draft.add_item(&product, 1).unwrap();
            ids.push(db.sales().commit_draft(&draft).await.unwrap().sale.id);
        }

        let pending = db.sales().pending_oldest_first().await.unwrap();
        let pending_ids: Vec<i64> = pending.iter().map(|s| s.id).collect();
        assert_eq!(pending_ids, ids);

        // Acknowledge the middle sale; it must drop out of the pending set.
        db.sales().mark_synced(ids[1], 501).await.unwrap();

        let pending = db.sales().pending_oldest_first().await.unwrap();
        let pending_ids: Vec<i64> = pending.iter().map(|s| s.id).collect();
        assert_eq!(pending_ids, vec![ids[0], ids[2]]);

        let synced = db.sales().get_by_id(ids[1]).await.unwrap().unwrap();
        assert_eq!(synced.server_id, Some(501));
        assert_eq!(synced.sync_status, SyncStatus::Synced);

        assert_eq!(db.sales().count_pending().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_with_items_round_trip() {
        let db = test_db().await;
        let product = seed_product(&db, "Refresco", 1.5, 10).await;

        let mut draft = SaleDraft::new();
        draft.add_item(&product, 4).unwrap();
        draft.set_notes("mesa 3");

        let committed = db.sales().commit_draft(&draft).await.unwrap();
        let loaded = db
            .sales()
            .get_with_items(committed.sale.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(loaded.sale.total, 6.0);
        assert_eq!(loaded.sale.notes, "mesa 3");
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].product_name, "Refresco");
        assert_eq!(loaded.items[0].quantity, 4);

        assert!(db.sales().get_with_items(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_item_price_snapshot_survives_product_update() {
        let db = test_db().await;
        let mut product = seed_product(&db, "Cafe", 3.0, 10).await;

        let mut draft = SaleDraft::new();
        draft.add_item(&product, 1).unwrap();
        let committed = db.sales().commit_draft(&draft).await.unwrap();

        // Reprice the product after the sale.
        product.price = 5.0;
        db.products().update(&product).await.unwrap();

        let loaded = db
            .sales()
            .get_with_items(committed.sale.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.items[0].price, 3.0);
        assert_eq!(loaded.sale.total, 3.0);
    }
}
