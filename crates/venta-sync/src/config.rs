//! # Sync Configuration
//!
//! Configuration for the sync engine.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                           │
//! │                                                                     │
//! │  1. Environment Variables (highest)                                 │
//! │     VENTA_REMOTE_URL, VENTA_API_TOKEN, VENTA_DEVICE_ID, ...         │
//! │                                                                     │
//! │  2. TOML Config File                                                │
//! │     ~/.config/venta-pos/sync.toml (Linux)                           │
//! │     ~/Library/Application Support/com.venta.pos/sync.toml (macOS)   │
//! │                                                                     │
//! │  3. Default Values (lowest)                                         │
//! │     auto-generated device id, localhost backend                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [device]
//! id = "550e8400-e29b-41d4-a716-446655440000"
//! name = "Register 1"
//!
//! [remote]
//! base_url = "https://api.example.com/api"
//! bearer_token = "..."
//! request_timeout_secs = 10
//!
//! [sync]
//! poll_interval_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{SyncError, SyncResult};

// =============================================================================
// Device Configuration
// =============================================================================

/// Configuration for this device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Unique device identifier (UUID v4). Auto-generated on first run.
    pub id: String,

    /// Human-readable device name.
    #[serde(default = "default_device_name")]
    pub name: String,
}

fn default_device_name() -> String {
    "Venta Terminal".to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            id: Uuid::new_v4().to_string(),
            name: default_device_name(),
        }
    }
}

// =============================================================================
// Remote Settings
// =============================================================================

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Base URL of the backend API (sales are posted to `{base_url}/sales`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token attached to every request, when present.
    ///
    /// Token issuance is out of scope here; whatever obtained the token
    /// stores it in this config.
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Per-request timeout (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for RemoteSettings {
    fn default() -> Self {
        RemoteSettings {
            base_url: default_base_url(),
            bearer_token: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

// =============================================================================
// Sync Settings
// =============================================================================

/// Sync behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Interval between background sync passes (seconds). Checkout also
    /// fires an immediate trigger after every commit.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

// =============================================================================
// Main Sync Configuration
// =============================================================================

/// Complete sync configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Device-specific configuration.
    #[serde(default)]
    pub device: DeviceConfig,

    /// Backend API settings.
    #[serde(default)]
    pub remote: RemoteSettings,

    /// Sync behavior settings.
    #[serde(default)]
    pub sync: SyncSettings,
}

impl SyncConfig {
    /// Creates a new config with defaults and a generated device id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (sync.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading sync config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load sync config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SyncResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SyncError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Sync config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SyncResult<()> {
        if self.device.id.is_empty() {
            return Err(SyncError::MissingDeviceId);
        }

        if !self.remote.base_url.starts_with("http://")
            && !self.remote.base_url.starts_with("https://")
        {
            return Err(SyncError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got: {}",
                self.remote.base_url
            )));
        }

        if self.sync.poll_interval_secs == 0 {
            return Err(SyncError::InvalidConfig(
                "poll_interval_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(id) = std::env::var("VENTA_DEVICE_ID") {
            debug!(device_id = %id, "Overriding device id from environment");
            self.device.id = id;
        }

        if let Ok(name) = std::env::var("VENTA_DEVICE_NAME") {
            self.device.name = name;
        }

        if let Ok(url) = std::env::var("VENTA_REMOTE_URL") {
            debug!(url = %url, "Overriding remote url from environment");
            self.remote.base_url = url;
        }

        if let Ok(token) = std::env::var("VENTA_API_TOKEN") {
            self.remote.bearer_token = Some(token);
        }

        if let Ok(interval) = std::env::var("VENTA_POLL_INTERVAL") {
            if let Ok(secs) = interval.parse::<u64>() {
                self.sync.poll_interval_secs = secs;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "venta", "pos")
            .map(|dirs| dirs.config_dir().join("sync.toml"))
    }

    /// Returns the device id.
    pub fn device_id(&self) -> &str {
        &self.device.id
    }

    /// Returns the background poll interval as a [`std::time::Duration`].
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sync.poll_interval_secs)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert!(!config.device.id.is_empty()); // Auto-generated
        assert_eq!(config.remote.base_url, "http://localhost:5000/api");
        assert_eq!(config.sync.poll_interval_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SyncConfig::default();

        config.device.id = String::new();
        assert!(matches!(
            config.validate(),
            Err(SyncError::MissingDeviceId)
        ));

        config.device.id = "register-1".to_string();
        config.remote.base_url = "ftp://nope".to_string();
        assert!(config.validate().is_err());

        config.remote.base_url = "https://api.example.com/api".to_string();
        assert!(config.validate().is_ok());

        config.sync.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SyncConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[device]"));
        assert!(toml_str.contains("[remote]"));

        let parsed: SyncConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.device.id, config.device.id);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: SyncConfig = toml::from_str(
            r#"
            [remote]
            base_url = "https://pos.example.com/api"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.remote.base_url, "https://pos.example.com/api");
        assert_eq!(parsed.sync.poll_interval_secs, 30);
        assert!(!parsed.device.id.is_empty());
    }
}
