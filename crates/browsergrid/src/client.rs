// Client facade
//
// Holds the HTTP handle, the current configuration snapshot, and the
// registry of automation drivers. The configuration is the only mutable
// shared state in the library: readers clone the current Arc, and updates
// follow read-modify-validate-commit, so a failed update never leaves a
// partially mutated configuration behind.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::config::{BrowserFlavor, ClientConfig, ConfigUpdate};
use crate::connect::{AutomationDriver, ConnectMode};
use crate::dispatch::{self, Method, Payload};
use crate::error::Result;

/// Client for the BrowserGrid remote browser platform.
///
/// One client serves any number of concurrent operations; calls issued
/// concurrently race independently with no queueing or serialization.
///
/// # Example
///
/// ```ignore
/// use browsergrid::{Client, ClientConfig, Region};
///
/// let config = ClientConfig::builder()
///     .token("tok_live_...")
///     .region(Region::Eu)
///     .build()?;
/// let client = Client::new(config);
/// let health = client.health().await?;
/// ```
pub struct Client {
    http: reqwest::Client,
    config: RwLock<Arc<ClientConfig>>,
    drivers: RwLock<HashMap<ConnectMode, Arc<dyn AutomationDriver>>>,
}

impl Client {
    /// Creates a client from a validated configuration.
    pub fn new(config: ClientConfig) -> Self {
        Client {
            http: reqwest::Client::new(),
            config: RwLock::new(Arc::new(config)),
            drivers: RwLock::new(HashMap::new()),
        }
    }

    /// The current configuration snapshot.
    ///
    /// Concurrent readers observe either the pre-update or the fully
    /// committed post-update snapshot, never an intermediate state.
    pub fn config(&self) -> Arc<ClientConfig> {
        self.config.read().clone()
    }

    /// Merges a partial update into the configuration.
    ///
    /// The fully merged result is validated before anything is committed;
    /// on failure the previous configuration remains intact.
    pub fn update_config(&self, update: ConfigUpdate) -> Result<()> {
        let merged = self.config().merged(update)?;
        *self.config.write() = Arc::new(merged);
        Ok(())
    }

    /// Registers an automation driver for its connect mode, replacing any
    /// driver previously registered for that mode.
    pub fn register_driver(&self, driver: Arc<dyn AutomationDriver>) {
        let mode = driver.mode();
        self.drivers.write().insert(mode, driver);
    }

    pub(crate) fn driver_for(&self, mode: ConnectMode) -> Option<Arc<dyn AutomationDriver>> {
        self.drivers.read().get(&mode).cloned()
    }

    pub(crate) async fn send(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
        flavor: Option<BrowserFlavor>,
    ) -> Result<Payload> {
        let config = self.config();
        dispatch::send(&self.http, &config, path, method, body, flavor).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.config();
        f.debug_struct("Client")
            .field("base_url", &config.base_url().as_str())
            .field("default_flavor", &config.default_flavor())
            .field("timeout", &config.timeout())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Region;
    use std::time::Duration;

    fn client() -> Client {
        let config = ClientConfig::builder()
            .token("tok_123")
            .region(Region::Us)
            .build()
            .unwrap();
        Client::new(config)
    }

    #[test]
    fn test_failed_update_leaves_previous_config_intact() {
        let client = client();
        let before = client.config();

        let result = client.update_config(ConfigUpdate {
            token: Some(String::new()),
            timeout_ms: Some(60_000),
            ..Default::default()
        });
        assert!(result.is_err());

        let after = client.config();
        assert_eq!(after.token(), before.token());
        // The valid timeout in the same failed update must not leak through
        assert_eq!(after.timeout(), before.timeout());
    }

    #[test]
    fn test_successful_update_commits_atomically() {
        let client = client();
        client
            .update_config(ConfigUpdate {
                timeout_ms: Some(60_000),
                default_flavor: Some(BrowserFlavor::Webkit),
                ..Default::default()
            })
            .unwrap();

        let config = client.config();
        assert_eq!(config.timeout(), Duration::from_millis(60_000));
        assert_eq!(config.default_flavor(), BrowserFlavor::Webkit);
        assert_eq!(config.token(), "tok_123");
    }

    #[test]
    fn test_old_snapshots_survive_updates() {
        let client = client();
        let snapshot = client.config();
        client
            .update_config(ConfigUpdate {
                default_flavor: Some(BrowserFlavor::Edge),
                ..Default::default()
            })
            .unwrap();
        // A reader holding the old Arc still sees the old value
        assert_eq!(snapshot.default_flavor(), BrowserFlavor::Chrome);
        assert_eq!(client.config().default_flavor(), BrowserFlavor::Edge);
    }
}
