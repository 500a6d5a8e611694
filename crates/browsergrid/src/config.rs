// Client configuration
//
// Configuration is supplied at construction time by the embedding
// application (never parsed from the environment here), validated as a
// whole, and exposed as an immutable snapshot. Updates go through
// `Client::update_config`, which merges and revalidates before committing.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;
use crate::validate::Violations;

/// Default operation timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Minimum accepted operation timeout in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 1_000;

/// Maximum accepted operation timeout in milliseconds.
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Which browser engine a remote operation targets.
///
/// Flavor-scoped endpoints compose their URL as `base/<flavor>/<path>`;
/// the flavor is either the client-wide default or a per-call override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserFlavor {
    /// Chromium-based Chrome (the default)
    #[default]
    Chrome,
    /// Firefox
    Firefox,
    /// WebKit
    Webkit,
    /// Chromium-based Edge
    Edge,
}

impl BrowserFlavor {
    /// URL path segment for this flavor.
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserFlavor::Chrome => "chrome",
            BrowserFlavor::Firefox => "firefox",
            BrowserFlavor::Webkit => "webkit",
            BrowserFlavor::Edge => "edge",
        }
    }
}

impl std::fmt::Display for BrowserFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hosted regions of the BrowserGrid platform.
///
/// The region-to-base-URL mapping is a static lookup: an unknown region is
/// unrepresentable, not a runtime case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// United States
    Us,
    /// European Union
    Eu,
    /// Asia-Pacific
    Ap,
}

impl Region {
    /// The fixed base URL for this region.
    pub fn base_url(&self) -> &'static str {
        match self {
            Region::Us => "https://us.browsergrid.dev",
            Region::Eu => "https://eu.browsergrid.dev",
            Region::Ap => "https://ap.browsergrid.dev",
        }
    }
}

/// Validated, immutable client configuration snapshot.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    token: String,
    base_url: Url,
    timeout: Duration,
    default_flavor: BrowserFlavor,
}

impl ClientConfig {
    /// Creates a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// API token, sent as a bearer authorization header (REST) or a
    /// `token` query parameter (WebSocket).
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Base URL with any trailing slash stripped.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-operation deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Flavor used when an operation does not override it.
    pub fn default_flavor(&self) -> BrowserFlavor {
        self.default_flavor
    }

    /// Applies a partial update, revalidating the merged whole.
    ///
    /// The merge itself never mutates `self`; the caller commits the
    /// returned snapshot only when validation passed.
    pub(crate) fn merged(&self, update: ConfigUpdate) -> Result<ClientConfig> {
        ClientConfigBuilder {
            token: Some(update.token.unwrap_or_else(|| self.token.clone())),
            base_url: Some(
                update
                    .base_url
                    .unwrap_or_else(|| self.base_url.as_str().to_string()),
            ),
            timeout_ms: Some(
                update
                    .timeout_ms
                    .unwrap_or(self.timeout.as_millis() as u64),
            ),
            default_flavor: Some(update.default_flavor.unwrap_or(self.default_flavor)),
        }
        .build()
    }
}

/// Partial configuration update, merged into the current snapshot by
/// `Client::update_config`.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    /// Replacement API token
    pub token: Option<String>,
    /// Replacement base URL
    pub base_url: Option<String>,
    /// Replacement timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Replacement default flavor
    pub default_flavor: Option<BrowserFlavor>,
}

/// Builder for [`ClientConfig`].
///
/// `build` validates everything at once and reports every violated
/// constraint in one message.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    token: Option<String>,
    base_url: Option<String>,
    timeout_ms: Option<u64>,
    default_flavor: Option<BrowserFlavor>,
}

impl ClientConfigBuilder {
    /// Set the API token (required, non-empty).
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the base URL (required, absolute http/https).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the base URL from a hosted region.
    pub fn region(mut self, region: Region) -> Self {
        self.base_url = Some(region.base_url().to_string());
        self
    }

    /// Set the operation timeout in milliseconds (1000–300000, default 30000).
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Set the default browser flavor (default chrome).
    pub fn default_flavor(mut self, flavor: BrowserFlavor) -> Self {
        self.default_flavor = Some(flavor);
        self
    }

    /// Validates and builds the configuration.
    pub fn build(self) -> Result<ClientConfig> {
        let mut violations = Violations::new();

        let token = self.token.unwrap_or_default();
        violations.check(!token.trim().is_empty(), "token must not be empty");

        let raw_base = self.base_url.unwrap_or_default();
        violations.check(!raw_base.trim().is_empty(), "base url must not be empty");
        let base_url = match Url::parse(raw_base.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
            Ok(url) => {
                violations.check(
                    false,
                    format!("base url scheme must be http or https, got {}", url.scheme()),
                );
                None
            }
            Err(e) => {
                violations.check(false, format!("base url is not a valid absolute URL: {e}"));
                None
            }
        };

        let timeout_ms = self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        violations.range_u64(
            "timeout",
            Some(timeout_ms),
            MIN_TIMEOUT_MS,
            MAX_TIMEOUT_MS,
        );

        violations.finish("client configuration")?;

        // finish() returned Ok, so every base-url failure path above was empty.
        let Some(mut base_url) = base_url else {
            return Err(crate::error::Error::validation(
                "invalid client configuration: base url is not a valid absolute URL",
            ));
        };
        let trimmed = base_url.path().trim_end_matches('/').to_string();
        base_url.set_path(&trimmed);
        base_url.set_query(None);
        base_url.set_fragment(None);

        Ok(ClientConfig {
            token,
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            default_flavor: self.default_flavor.unwrap_or_default(),
        })
    }
}
