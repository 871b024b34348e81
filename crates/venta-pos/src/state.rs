//! # Application State
//!
//! Owned state injected into every operation, instead of ambient globals.
//!
//! ## Thread Safety
//! The draft sits behind `Arc<Mutex<_>>`: operations from the UI may land
//! concurrently, and exactly one of them mutates the draft at a time. All
//! access goes through the closures below so the lock scope stays small.

use std::sync::{Arc, Mutex};

use venta_core::SaleDraft;
use venta_db::Database;
use venta_sync::SyncHandle;

// =============================================================================
// Draft State
// =============================================================================

/// Shared handle to the current sale draft.
#[derive(Debug, Clone, Default)]
pub struct DraftState {
    draft: Arc<Mutex<SaleDraft>>,
}

impl DraftState {
    /// Creates an empty draft state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a closure with read access to the draft.
    ///
    /// ```rust,ignore
    /// let total = state.draft.with_draft(|d| d.total());
    /// ```
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SaleDraft) -> R,
    {
        let draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&draft)
    }

    /// Executes a closure with write access to the draft.
    ///
    /// ```rust,ignore
    /// state.draft.with_draft_mut(|d| d.add_item(&product, 1))?;
    /// ```
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SaleDraft) -> R,
    {
        let mut draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&mut draft)
    }
}

// =============================================================================
// App State
// =============================================================================

/// Everything an operation needs, owned in one place and passed explicitly.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local ledger.
    pub db: Database,

    /// The sale currently being assembled.
    pub draft: DraftState,

    /// Handle to the background sync worker. May be detached when no worker
    /// is running (headless tools, tests).
    pub sync: SyncHandle,
}

impl AppState {
    /// Creates application state over an open ledger and a sync handle.
    pub fn new(db: Database, sync: SyncHandle) -> Self {
        AppState {
            db,
            draft: DraftState::new(),
            sync,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
