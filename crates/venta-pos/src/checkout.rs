//! # Checkout Flow
//!
//! Turns the current draft into a recorded sale.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       complete_sale()                               │
//! │                                                                     │
//! │  1. Snapshot the draft                                              │
//! │  2. Validate: at least one line, positive total                     │
//! │     └── failure: ValidationError, nothing touched                   │
//! │  3. commit_draft() - one local transaction                          │
//! │     └── failure: StorageError, draft PRESERVED for retry            │
//! │  4. Clear the draft                                                 │
//! │  5. sync.trigger() - fire and forget, never awaited                 │
//! │                                                                     │
//! │  The committed sale is visible in local history immediately,        │
//! │  whatever the sync outcome.                                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tracing::info;

use crate::state::AppState;
use venta_core::{SaleWithItems, ValidationError};
use venta_db::StorageError;

/// Errors surfaced to the cashier by the checkout flow.
///
/// Sync problems never appear here; they only show up later as a pending
/// badge in the sale history.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The draft is not committable. Rejected before any storage mutation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The local transaction failed and rolled back. The draft is kept so
    /// the cashier can retry.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Commits the current draft as a sale.
///
/// On success the draft is cleared and the sync worker is nudged without
/// waiting for it. On failure the draft is left exactly as it was.
pub async fn complete_sale(state: &AppState) -> Result<SaleWithItems, CheckoutError> {
    // Snapshot under the lock, commit outside it. The single-operator
    // assumption means nobody edits the draft between snapshot and clear.
    let snapshot = state.draft.with_draft(|d| d.clone());
    snapshot.ensure_committable()?;

    let committed = state.db.sales().commit_draft(&snapshot).await?;

    state.draft.with_draft_mut(|d| d.clear());
    state.sync.trigger();

    info!(
        sale_id = committed.sale.id,
        total = committed.sale.total,
        items = committed.items.len(),
        "Checkout complete"
    );

    Ok(committed)
}

/// Abandons the current draft without recording anything.
pub fn cancel_sale(state: &AppState) {
    state.draft.with_draft_mut(|d| d.clear());
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use venta_core::{NewProduct, Product, SyncStatus};
    use venta_db::{Database, DbConfig};
    use venta_sync::{RemoteSale, SalePayload, SaleUplink, SyncEngine, SyncHandle, SyncResult, SyncWorker};

    async fn test_state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::new(db, SyncHandle::detached())
    }

    async fn seed_product(state: &AppState, price: f64, stock: i64) -> Product {
        state
            .db
            .products()
            .insert(&NewProduct {
                name: "Producto".to_string(),
                price,
                stock,
                ..Default::default()
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_draft_is_rejected_without_side_effects() {
        let state = test_state().await;

        let err = complete_sale(&state).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Validation(ValidationError::EmptyDraft)
        ));

        assert_eq!(state.db.sales().count_pending().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_successful_checkout_clears_draft() {
        let state = test_state().await;
        let product = seed_product(&state, 12.5, 4).await;

        state
            .draft
            .with_draft_mut(|d| d.add_item(&product, 2))
            .unwrap();

        let committed = complete_sale(&state).await.unwrap();
        assert_eq!(committed.sale.total, 25.0);
        assert_eq!(committed.sale.sync_status, SyncStatus::Pending);

        // Draft reset, stock decremented, sale visible in history.
        assert!(state.draft.with_draft(|d| d.is_empty()));
        let product = state
            .db
            .products()
            .get_by_id(product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.stock, 2);
        assert_eq!(state.db.sales().count_pending().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_commit_preserves_draft() {
        let state = test_state().await;
        let product = seed_product(&state, 3.0, 10).await;

        state
            .draft
            .with_draft_mut(|d| d.add_item(&product, 1))
            .unwrap();
        // A line referencing a product the ledger does not know makes the
        // transaction roll back.
        state
            .draft
            .with_draft_mut(|d| {
                d.add_item(
                    &Product {
                        id: 404,
                        ..product.clone()
                    },
                    1,
                )
            })
            .unwrap();

        let err = complete_sale(&state).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Storage(_)));

        // The cashier keeps the draft and can retry.
        assert_eq!(state.draft.with_draft(|d| d.item_count()), 2);
        assert_eq!(state.db.sales().count_pending().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cancel_sale_discards_draft() {
        let state = test_state().await;
        let product = seed_product(&state, 5.0, 10).await;

        state
            .draft
            .with_draft_mut(|d| d.add_item(&product, 1))
            .unwrap();
        cancel_sale(&state);

        assert!(state.draft.with_draft(|d| d.is_empty()));
        assert_eq!(state.db.sales().count_pending().await.unwrap(), 0);
    }

    /// End to end: checkout commits locally, the trigger wakes the worker,
    /// and the sale ends up synced without checkout ever waiting on it.
    #[derive(Clone, Default)]
    struct RecordingUplink {
        received: Arc<Mutex<Vec<SalePayload>>>,
    }

    #[async_trait]
    impl SaleUplink for RecordingUplink {
        async fn is_reachable(&self) -> bool {
            true
        }

        async fn create_sale(&self, payload: &SalePayload) -> SyncResult<RemoteSale> {
            let mut received = self.received.lock().unwrap();
            received.push(payload.clone());
            Ok(RemoteSale {
                id: 9000 + received.len() as i64,
            })
        }
    }

    #[tokio::test]
    async fn test_checkout_triggers_background_sync() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let uplink = RecordingUplink::default();
        let engine = SyncEngine::new(db.clone(), uplink.clone());
        let (worker, handle) = SyncWorker::new(engine, Duration::from_secs(3600));
        let worker_task = tokio::spawn(worker.run());

        let state = AppState::new(db, handle.clone());
        let product = seed_product(&state, 7.0, 3).await;
        state
            .draft
            .with_draft_mut(|d| d.add_item(&product, 1))
            .unwrap();

        let committed = complete_sale(&state).await.unwrap();

        // The upload happens behind the checkout's back.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(uplink.received.lock().unwrap().len(), 1);

        let sale = state
            .db
            .sales()
            .get_by_id(committed.sale.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sale.sync_status, SyncStatus::Synced);
        assert_eq!(sale.server_id, Some(9001));

        handle.shutdown().await.unwrap();
        worker_task.await.unwrap();
    }
}
