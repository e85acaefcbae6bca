//! Configuration for remote table-store clients.
//!
//! This module provides [`StoreConfig`], the explicit configuration value a
//! remote [`TableStore`](crate::TableStore) implementation is constructed
//! from. It replaces implicit, context-threaded client/table parameters
//! with a validated value the caller passes where it is needed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Default request timeout (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (5 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for a remote table-store instance.
///
/// The transport itself lives outside this crate; `StoreConfig` is the
/// contract a remote implementation consumes. All credential fields are
/// required and validated at build time.
///
/// # Example
///
/// ```
/// use tablerow_store::StoreConfig;
///
/// let config = StoreConfig::builder()
///     .endpoint("https://instance.region.example.com")
///     .instance("my-instance")
///     .access_key_id("AKID")
///     .access_key_secret("SECRET")
///     .build()?;
///
/// assert_eq!(config.instance(), "my-instance");
/// # Ok::<(), tablerow_store::StoreError>(())
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Service endpoint URL.
    pub(crate) endpoint: String,

    /// Store instance name.
    pub(crate) instance: String,

    /// Access-key identifier.
    pub(crate) access_key_id: String,

    /// Access-key secret. Redacted from `Debug` output.
    pub(crate) access_key_secret: String,

    /// Request timeout.
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub(crate) timeout: Duration,

    /// Connection timeout.
    #[serde(with = "humantime_serde", default = "default_connect_timeout")]
    pub(crate) connect_timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("instance", &self.instance)
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[bon::bon]
impl StoreConfig {
    /// Creates a new configuration, validating all required fields.
    ///
    /// # Optional Fields
    ///
    /// * `timeout` - request timeout (default: 30 seconds)
    /// * `connect_timeout` - connection timeout (default: 5 seconds)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if `endpoint`, `instance`,
    /// `access_key_id`, or `access_key_secret` is empty.
    #[builder]
    pub fn new(
        #[builder(into)] endpoint: String,
        #[builder(into)] instance: String,
        #[builder(into)] access_key_id: String,
        #[builder(into)] access_key_secret: String,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
        #[builder(default = DEFAULT_CONNECT_TIMEOUT)] connect_timeout: Duration,
    ) -> StoreResult<Self> {
        if endpoint.is_empty() {
            return Err(StoreError::config("endpoint cannot be empty"));
        }
        if instance.is_empty() {
            return Err(StoreError::config("instance cannot be empty"));
        }
        if access_key_id.is_empty() || access_key_secret.is_empty() {
            return Err(StoreError::config("access key id and secret cannot be empty"));
        }

        Ok(Self { endpoint, instance, access_key_id, access_key_secret, timeout, connect_timeout })
    }

    /// Returns the service endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the instance name.
    #[must_use]
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Returns the access-key identifier.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Returns the access-key secret.
    #[must_use]
    pub fn access_key_secret(&self) -> &str {
        &self.access_key_secret
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the connection timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn valid() -> StoreResult<StoreConfig> {
        StoreConfig::builder()
            .endpoint("https://host")
            .instance("inst")
            .access_key_id("id")
            .access_key_secret("secret")
            .build()
    }

    #[test]
    fn test_valid_config() {
        let config = valid().expect("valid config");
        assert_eq!(config.endpoint(), "https://host");
        assert_eq!(config.instance(), "inst");
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.connect_timeout(), DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn test_validation_empty_endpoint() {
        let result = StoreConfig::builder()
            .endpoint("")
            .instance("inst")
            .access_key_id("id")
            .access_key_secret("secret")
            .build();
        assert!(matches!(result, Err(StoreError::Config { .. })));
    }

    #[test]
    fn test_validation_empty_instance() {
        let result = StoreConfig::builder()
            .endpoint("https://host")
            .instance("")
            .access_key_id("id")
            .access_key_secret("secret")
            .build();
        assert!(matches!(result, Err(StoreError::Config { .. })));
    }

    #[test]
    fn test_validation_empty_credentials() {
        let result = StoreConfig::builder()
            .endpoint("https://host")
            .instance("inst")
            .access_key_id("")
            .access_key_secret("secret")
            .build();
        assert!(matches!(result, Err(StoreError::Config { .. })));
    }

    #[test]
    fn test_custom_timeouts() {
        let config = StoreConfig::builder()
            .endpoint("https://host")
            .instance("inst")
            .access_key_id("id")
            .access_key_secret("secret")
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("valid config");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_deserialization_applies_timeout_defaults() {
        let json = r#"{
            "endpoint": "https://host",
            "instance": "inst",
            "access_key_id": "id",
            "access_key_secret": "secret"
        }"#;

        let config: StoreConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = StoreConfig::builder()
            .endpoint("https://host")
            .instance("inst")
            .access_key_id("id")
            .access_key_secret("hunter2")
            .build()
            .expect("valid config");
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("hunter2"));
    }
}
