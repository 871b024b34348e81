//! # venta-pos: Application Layer
//!
//! The orchestration layer of Venta POS. A UI shell (desktop or mobile)
//! binds to the operations in this crate; everything below it is venta-core,
//! venta-db, and venta-sync.
//!
//! ## Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Startup Wiring                               │
//! │                                                                     │
//! │  init_tracing()                                                     │
//! │  Database::new(DbConfig::new(db_path))                              │
//! │  SyncConfig::load_or_default(None)                                  │
//! │  RemoteClient::new(&sync_config)                                    │
//! │  SyncWorker::new(SyncEngine::new(db, client), poll_interval)        │
//! │  tokio::spawn(worker.run())                                         │
//! │  AppState::new(db, handle)  ──► injected into every operation       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`state`] - Owned application state ([`AppState`], [`DraftState`])
//! - [`checkout`] - Draft commit flow
//! - [`catalog`] - Product management
//! - [`history`] - Sale history reads
//! - [`telemetry`] - Tracing initialization

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod history;
pub mod state;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::CatalogError;
pub use checkout::{cancel_sale, complete_sale, CheckoutError};
pub use state::{AppState, DraftState};
pub use telemetry::init_tracing;
