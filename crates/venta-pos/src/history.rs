//! # Sale History
//!
//! Read paths for the history screen. A committed sale appears here
//! immediately, whatever its sync outcome; the per-sale sync status is the
//! only place sync failures become visible.

use crate::state::AppState;
use venta_core::{Sale, SaleWithItems};
use venta_db::StorageResult;

/// The most recent sales, newest first.
pub async fn recent_sales(state: &AppState, limit: u32) -> StorageResult<Vec<Sale>> {
    state.db.sales().list_recent(limit).await
}

/// One sale with its line items, or `None` when the id is unknown.
pub async fn sale_details(state: &AppState, sale_id: i64) -> StorageResult<Option<SaleWithItems>> {
    state.db.sales().get_with_items(sale_id).await
}

/// How many sales still wait for upload (the sync badge).
pub async fn pending_sync_count(state: &AppState) -> StorageResult<i64> {
    state.db.sales().count_pending().await
}

// =============================================================================
// Unit Tests
// =============================================================================
