//! # venta-sync: Sync Engine for Venta POS
//!
//! Best-effort, order-preserving upload of locally committed sales to the
//! backend of record. Local sale-taking never waits on this crate.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Sync Architecture                             │
//! │                                                                     │
//! │  checkout (venta-pos)                                               │
//! │       │ SyncHandle::trigger()  (non-blocking)                       │
//! │       ▼                                                             │
//! │  ┌──────────────┐   every pass   ┌──────────────┐                   │
//! │  │  SyncWorker  │ ─────────────► │  SyncEngine  │                   │
//! │  │ (tokio task) │                │ sync_pending │                   │
//! │  └──────────────┘                └──────┬───────┘                   │
//! │    interval tick                        │                           │
//! │    trigger channel              ┌───────┴────────┐                  │
//! │    shutdown channel             ▼                ▼                  │
//! │                          venta-db          SaleUplink               │
//! │                          (pending,         (RemoteClient:           │
//! │                           mark synced)      POST /sales)            │
//! │                                                                     │
//! │  Per-sale state machine:                                            │
//! │    PENDING ──upload ok──► SYNCED (terminal)                         │
//! │    PENDING ──upload err─► PENDING (retried next pass)               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Sync configuration (TOML file + env overrides)
//! - [`error`] - Sync error types
//! - [`payload`] - Wire types for the backend API
//! - [`remote`] - [`SaleUplink`] trait and the reqwest client
//! - [`engine`] - One batch pass over pending sales
//! - [`worker`] - Background task and its control handle
//!
//! ## Usage
//!
//! ```rust,ignore
//! use venta_sync::{RemoteClient, SyncConfig, SyncEngine, SyncWorker};
//!
//! let config = SyncConfig::load_or_default(None);
//! let client = RemoteClient::new(&config)?;
//! let engine = SyncEngine::new(db.clone(), client);
//! let (worker, handle) = SyncWorker::new(engine, config.poll_interval());
//! tokio::spawn(worker.run());
//! handle.trigger();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod engine;
pub mod error;
pub mod payload;
pub mod remote;
pub mod worker;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{DeviceConfig, RemoteSettings, SyncConfig, SyncSettings};
pub use engine::{SyncEngine, SyncReport};
pub use error::{SyncError, SyncResult};
pub use payload::{RemoteSale, SaleItemPayload, SalePayload};
pub use remote::{RemoteClient, SaleUplink};
pub use worker::{SyncHandle, SyncWorker};
