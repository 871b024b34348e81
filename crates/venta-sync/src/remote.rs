//! # Remote Sale Service Client
//!
//! The uplink seam and its production implementation over HTTP.
//!
//! [`SaleUplink`] is the boundary the engine talks through; tests substitute
//! an in-memory implementation, production uses [`RemoteClient`] against the
//! backend REST API.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::payload::{RemoteSale, SalePayload};

// =============================================================================
// Uplink Trait
// =============================================================================

/// The consumed surface of the Remote Sale Service.
#[async_trait]
pub trait SaleUplink: Send + Sync {
    /// Cheap reachability probe. `false` turns a sync run into a no-op.
    async fn is_reachable(&self) -> bool;

    /// Submits one sale and returns the backend's persisted copy.
    ///
    /// The backend performs its own atomic insert-sale + insert-items +
    /// decrement-stock; this client only reports success or failure.
    async fn create_sale(&self, payload: &SalePayload) -> SyncResult<RemoteSale>;
}

// =============================================================================
// HTTP Client
// =============================================================================

/// Production uplink over the backend REST API.
///
/// `POST {base_url}/sales` with a JSON body and, when configured, a bearer
/// token. Any non-2xx answer is a [`SyncError::RemoteRejected`].
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl RemoteClient {
    /// Builds a client from the sync configuration.
    pub fn new(config: &SyncConfig) -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.remote.request_timeout_secs))
            .build()
            .map_err(|e| SyncError::InvalidConfig(e.to_string()))?;

        Ok(RemoteClient {
            http,
            base_url: config.remote.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.remote.bearer_token.clone(),
        })
    }

    fn sales_url(&self) -> String {
        format!("{}/sales", self.base_url)
    }
}

#[async_trait]
impl SaleUplink for RemoteClient {
    async fn is_reachable(&self) -> bool {
        // Any answer counts, including error statuses; only a transport
        // failure means unreachable.
        match self.http.head(&self.base_url).send().await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Backend unreachable");
                false
            }
        }
    }

    async fn create_sale(&self, payload: &SalePayload) -> SyncResult<RemoteSale> {
        let mut request = self.http.post(self.sales_url()).json(payload);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SyncError::RemoteRejected {
                status: status.as_u16(),
                message,
            });
        }

        let remote: RemoteSale = response.json().await?;
        debug!(server_id = remote.id, "Sale accepted by backend");
        Ok(remote)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
