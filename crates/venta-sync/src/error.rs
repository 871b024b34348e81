//! # Sync Error Types
//!
//! Error types for sync operations.
//!
//! Sync errors never reach the checkout flow. A per-sale upload failure is
//! logged by the engine and the sale simply stays pending; only configuration
//! and local storage problems propagate to the caller of a sync run.

use thiserror::Error;

use venta_db::StorageError;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync error type covering configuration, transport, and storage failures.
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid sync configuration.
    #[error("Invalid sync configuration: {0}")]
    InvalidConfig(String),

    /// Missing device ID (required for sync).
    #[error("Device ID not configured")]
    MissingDeviceId,

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Could not reach the backend.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Backend answered with a non-success status.
    #[error("Backend rejected the request ({status}): {message}")]
    RemoteRejected { status: u16, message: String },

    /// Backend answered 2xx but the body could not be decoded.
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// Local ledger failure while reading pending sales or flagging them
    /// synced.
    #[error("Storage error during sync: {0}")]
    Storage(#[from] StorageError),

    /// Failed to serialize a payload.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Worker channel send/receive failed.
    #[error("Channel error: {0}")]
    ChannelError(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SyncError::Timeout
        } else if err.is_decode() {
            SyncError::InvalidResponse(err.to_string())
        } else {
            SyncError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::SerializationFailed(err.to_string())
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SyncError {
    /// Whether a later retry of the same upload can reasonably succeed.
    ///
    /// Pending sales are retried on the next run either way; this only feeds
    /// log severity and status surfaces.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SyncError::ConnectionFailed(_)
                | SyncError::Timeout
                | SyncError::RemoteRejected { status: 500..=599, .. }
        )
    }

    /// Whether this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SyncError::InvalidConfig(_)
                | SyncError::MissingDeviceId
                | SyncError::ConfigLoadFailed(_)
                | SyncError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(SyncError::ConnectionFailed("refused".into()).is_retryable());
        assert!(SyncError::Timeout.is_retryable());
        assert!(SyncError::RemoteRejected {
            status: 503,
            message: "down".into()
        }
        .is_retryable());

        assert!(!SyncError::RemoteRejected {
            status: 400,
            message: "bad payload".into()
        }
        .is_retryable());
        assert!(!SyncError::MissingDeviceId.is_retryable());
    }

    #[test]
    fn test_config_errors() {
        assert!(SyncError::InvalidConfig("bad".into()).is_config_error());
        assert!(!SyncError::Timeout.is_config_error());
    }
}
