//! # Sync Engine
//!
//! One batch pass over pending sales.
//!
//! ## Sync Pass Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       sync_pending()                                │
//! │                                                                     │
//! │  1. Probe reachability ── unreachable? ──► return (no-op, no error) │
//! │       │                                                             │
//! │  2. SELECT pending sales ORDER BY id ASC  (local creation order)    │
//! │       │                                                             │
//! │  3. For each sale, sequentially:                                    │
//! │     a. load its items                                               │
//! │     b. POST the full sale+items payload                             │
//! │     c. on success: store server_id, flip sync_status to synced      │
//! │     d. on failure: log, count it, CONTINUE with the next sale       │
//! │                                                                     │
//! │  4. Return a SyncReport (attempted / synced / failed)               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 3d is policy, not an oversight: a sale that fails to upload stays
//! pending and is retried on the next pass, and it must not hold back the
//! sales behind it.

use tracing::{debug, info, warn};

use venta_core::Sale;
use venta_db::Database;

use crate::error::SyncResult;
use crate::payload::SalePayload;
use crate::remote::SaleUplink;

// =============================================================================
// Sync Report
// =============================================================================

/// Outcome of one sync pass, for logs and status surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Sales the pass tried to upload.
    pub attempted: usize,

    /// Sales acknowledged and flagged synced.
    pub synced: usize,

    /// Sales that failed and stay pending.
    pub failed: usize,

    /// True when the backend was unreachable and the pass did nothing.
    pub unreachable: bool,
}

impl SyncReport {
    fn unreachable() -> Self {
        SyncReport {
            unreachable: true,
            ..SyncReport::default()
        }
    }
}

// =============================================================================
// Sync Engine
// =============================================================================

/// Uploads pending sales through a [`SaleUplink`].
#[derive(Debug, Clone)]
pub struct SyncEngine<U> {
    db: Database,
    uplink: U,
}

impl<U: SaleUplink> SyncEngine<U> {
    /// Creates a new engine over a ledger and an uplink.
    pub fn new(db: Database, uplink: U) -> Self {
        SyncEngine { db, uplink }
    }

    /// Runs one sync pass.
    ///
    /// Connectivity problems are not errors: an unreachable backend returns
    /// a report with `unreachable = true` and every sale left pending. Only
    /// local storage failures propagate.
    pub async fn sync_pending(&self) -> SyncResult<SyncReport> {
        if !self.uplink.is_reachable().await {
            debug!("Backend unreachable, skipping sync pass");
            return Ok(SyncReport::unreachable());
        }

        let pending = self.db.sales().pending_oldest_first().await?;
        if pending.is_empty() {
            debug!("No pending sales");
            return Ok(SyncReport::default());
        }

        info!(count = pending.len(), "Uploading pending sales");

        let mut report = SyncReport::default();
        for sale in pending {
            report.attempted += 1;
            match self.upload_one(&sale).await {
                Ok(server_id) => {
                    debug!(sale_id = sale.id, server_id, "Sale synced");
                    report.synced += 1;
                }
                Err(e) => {
                    // Deliberate batch-partial-failure policy: log and move
                    // on, the sale stays pending for the next pass.
                    warn!(
                        sale_id = sale.id,
                        retryable = e.is_retryable(),
                        error = %e,
                        "Sale upload failed, will retry on next sync"
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            attempted = report.attempted,
            synced = report.synced,
            failed = report.failed,
            "Sync pass finished"
        );

        Ok(report)
    }

    /// Uploads a single sale and records the acknowledgment.
    ///
    /// There is no idempotency key in the payload: if the backend insert
    /// succeeds but `mark_synced` fails, the next pass uploads the sale
    /// again and the backend ends up with a duplicate.
    async fn upload_one(&self, sale: &Sale) -> SyncResult<i64> {
        let items = self.db.sales().get_items(sale.id).await?;
        let payload = SalePayload::from_sale(sale, &items);

        let remote = self.uplink.create_sale(&payload).await?;
        self.db.sales().mark_synced(sale.id, remote.id).await?;

        Ok(remote.id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
