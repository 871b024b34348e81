//! # Sync Worker
//!
//! Background task that runs sync passes.
//!
//! ## Worker Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        SyncWorker::run()                            │
//! │                                                                     │
//! │   tokio::select! over three signals:                                │
//! │                                                                     │
//! │   interval tick ───────────► engine.sync_pending()                  │
//! │   (poll_interval_secs)                                              │
//! │                                                                     │
//! │   trigger channel ─────────► engine.sync_pending()                  │
//! │   (checkout fires this after every commit, without waiting)         │
//! │                                                                     │
//! │   shutdown channel ────────► break                                  │
//! │                                                                     │
//! │   A pass that is interrupted (process exit) leaves the remaining    │
//! │   sales pending; the next pass picks them up.                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::engine::SyncEngine;
use crate::error::{SyncError, SyncResult};
use crate::remote::SaleUplink;

// =============================================================================
// Handle
// =============================================================================

/// Handle for nudging and stopping the worker.
#[derive(Debug, Clone)]
pub struct SyncHandle {
    trigger_tx: mpsc::Sender<()>,
    shutdown_tx: mpsc::Sender<()>,
}

impl SyncHandle {
    /// Asks the worker to run a pass soon. Never blocks and never fails:
    /// a full channel means a pass is already queued, a closed channel means
    /// no worker is running. Checkout calls this after every commit.
    pub fn trigger(&self) {
        let _ = self.trigger_tx.try_send(());
    }

    /// Requests graceful shutdown.
    pub async fn shutdown(&self) -> SyncResult<()> {
        self.shutdown_tx
            .send(())
            .await
            .map_err(|_| SyncError::ChannelError("Shutdown channel closed".into()))
    }

    /// A handle with no worker behind it; `trigger` becomes a no-op.
    /// For headless tools and tests that do not run sync.
    pub fn detached() -> Self {
        let (trigger_tx, _) = mpsc::channel(1);
        let (shutdown_tx, _) = mpsc::channel(1);
        SyncHandle {
            trigger_tx,
            shutdown_tx,
        }
    }
}

// =============================================================================
// Worker
// =============================================================================

/// Background sync task. Create it, keep the handle, spawn `run()`.
pub struct SyncWorker<U> {
    engine: SyncEngine<U>,
    poll_interval: Duration,
    trigger_rx: mpsc::Receiver<()>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl<U: SaleUplink> SyncWorker<U> {
    /// Creates a worker and its control handle.
    pub fn new(engine: SyncEngine<U>, poll_interval: Duration) -> (Self, SyncHandle) {
        let (trigger_tx, trigger_rx) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let worker = SyncWorker {
            engine,
            poll_interval,
            trigger_rx,
            shutdown_rx,
        };

        let handle = SyncHandle {
            trigger_tx,
            shutdown_tx,
        };

        (worker, handle)
    }

    /// Runs the worker loop until shutdown. Spawn this as a background task.
    ///
    /// The first interval tick fires immediately, so pending sales left over
    /// from a previous run are picked up at startup.
    pub async fn run(mut self) {
        info!("Sync worker starting");

        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.run_pass("interval").await;
                }

                Some(_) = self.trigger_rx.recv() => {
                    self.run_pass("trigger").await;
                }

                _ = self.shutdown_rx.recv() => {
                    info!("Sync worker shutting down");
                    break;
                }
            }
        }

        info!("Sync worker stopped");
    }

    async fn run_pass(&self, reason: &str) {
        match self.engine.sync_pending().await {
            Ok(report) => {
                debug!(
                    reason,
                    attempted = report.attempted,
                    synced = report.synced,
                    failed = report.failed,
                    unreachable = report.unreachable,
                    "Sync pass complete"
                );
            }
            Err(e) => {
                error!(reason, error = %e, "Sync pass failed");
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::payload::{RemoteSale, SalePayload};
    use venta_core::{NewProduct, SaleDraft};
    use venta_db::{Database, DbConfig};

    #[derive(Clone, Default)]
    struct CountingUplink {
        received: Arc<Mutex<Vec<SalePayload>>>,
    }

    #[async_trait]
    impl SaleUplink for CountingUplink {
        async fn is_reachable(&self) -> bool {
            true
        }

        async fn create_sale(&self, payload: &SalePayload) -> SyncResult<RemoteSale> {
            let mut received = self.received.lock().unwrap();
            received.push(payload.clone());
            Ok(RemoteSale {
                id: received.len() as i64,
            })
        }
    }

    #[tokio::test]
    async fn test_trigger_causes_upload_and_shutdown_stops_worker() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&NewProduct {
                name: "Producto".to_string(),
                price: 5.0,
                stock: 10,
                ..Default::default()
            })
            .await
            .unwrap();

        let uplink = CountingUplink::default();
        let engine = SyncEngine::new(db.clone(), uplink.clone());
        // Long poll interval so only the startup tick and the trigger fire.
        let (worker, handle) = SyncWorker::new(engine, Duration::from_secs(3600));
        let worker_task = tokio::spawn(worker.run());

        // Let the startup tick drain (nothing pending yet).
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(uplink.received.lock().unwrap().is_empty());

        let mut draft = SaleDraft::new();
        draft.add_item(&product, 1).unwrap();
        db.sales().commit_draft(&draft).await.unwrap();

        handle.trigger();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(uplink.received.lock().unwrap().len(), 1);
        assert_eq!(db.sales().count_pending().await.unwrap(), 0);

        handle.shutdown().await.unwrap();
        worker_task.await.unwrap();
    }

    #[tokio::test]
    async fn test_detached_handle_trigger_is_a_noop() {
        let handle = SyncHandle::detached();
        handle.trigger();
        assert!(handle.shutdown().await.is_err());
    }
}
