// Service introspection: health, metrics and server configuration.
// All three are flavor-agnostic reads.

use serde::Deserialize;
use serde_json::Value;

use crate::client::Client;
use crate::dispatch::Method;
use crate::error::{Error, Result};

/// Service health summary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    /// Overall status string, e.g. "ok"
    pub status: String,

    /// Browsers currently executing work
    #[serde(default)]
    pub running: Option<u64>,

    /// Requests waiting for a browser
    #[serde(default)]
    pub queued: Option<u64>,
}

impl Client {
    /// Reads the service health summary.
    pub async fn health(&self) -> Result<Health> {
        let payload = self
            .send("/health", Method::Get, None, None)
            .await?
            .expect_json()?;
        serde_json::from_value(payload).map_err(|e| {
            Error::new(
                crate::ErrorKind::Generic,
                format!("malformed health response: {e}"),
            )
        })
    }

    /// Reads the service metrics document.
    ///
    /// The metric set is deployment-specific, so it is returned as raw
    /// JSON.
    pub async fn metrics(&self) -> Result<Value> {
        self.send("/metrics", Method::Get, None, None)
            .await?
            .expect_json()
    }

    /// Reads the server's advertised configuration.
    pub async fn server_config(&self) -> Result<Value> {
        self.send("/config", Method::Get, None, None)
            .await?
            .expect_json()
    }
}
