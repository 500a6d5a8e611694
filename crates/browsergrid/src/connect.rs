// WebSocket connection broker
//
// Builds raw socket URLs for a chosen browser flavor and automation mode,
// probes reachability, and hands the URL to a caller-registered automation
// driver to obtain a live remote-browser handle. Sockets carry no custom
// headers in this design, so the auth token always rides as a query
// parameter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::client::Client;
use crate::config::{BrowserFlavor, ClientConfig};
use crate::error::{Error, Result};

/// Which automation protocol the remote socket speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectMode {
    /// CDP-style endpoint at `/<flavor>`
    Puppeteer,
    /// Playwright server endpoint at `/<flavor>/playwright`
    Playwright,
}

impl std::fmt::Display for ConnectMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectMode::Puppeteer => f.write_str("puppeteer"),
            ConnectMode::Playwright => f.write_str("playwright"),
        }
    }
}

/// Network proxy settings for a remote browser launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxySettings {
    /// Proxy server URL (e.g., "http://proxy:8080" or "socks5://proxy:1080")
    pub server: String,

    /// Comma-separated domains to bypass proxy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bypass: Option<String>,

    /// Proxy username for authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Proxy password for authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Options for launching the remote browser behind the socket.
///
/// Serialized key-by-key as query parameters on the connection URL.
/// Composite values (the argument list, the proxy descriptor) are
/// JSON-encoded into a single parameter value.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchOptions {
    /// Run the remote browser headless (the platform default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headless: Option<bool>,

    /// Enable the platform's bot-detection evasions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stealth: Option<bool>,

    /// Additional arguments for the remote browser instance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// Network proxy for the remote browser
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxySettings>,

    /// Slow down remote operations by N milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slow_mo: Option<f64>,
}

impl LaunchOptions {
    /// Creates empty launch options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends these options to `url` as query parameters.
    fn append_query(&self, url: &mut Url) -> Result<()> {
        let encoded = serde_json::to_value(self)
            .map_err(|e| Error::validation(format!("unencodable launch options: {e}")))?;
        let Value::Object(map) = encoded else {
            return Ok(());
        };
        let mut pairs = url.query_pairs_mut();
        for (key, value) in map {
            match value {
                Value::String(s) => {
                    pairs.append_pair(&key, &s);
                }
                Value::Bool(b) => {
                    pairs.append_pair(&key, if b { "true" } else { "false" });
                }
                Value::Number(n) => {
                    pairs.append_pair(&key, &n.to_string());
                }
                // Arrays and objects travel JSON-encoded in one value
                composite => {
                    pairs.append_pair(&key, &composite.to_string());
                }
            }
        }
        Ok(())
    }
}

/// Everything a driver needs to attach to a remote browser.
///
/// Never persisted; once a live handle is obtained its lifetime is the
/// caller's responsibility.
#[derive(Debug, Clone)]
pub struct ConnectionDescriptor {
    /// The ws/wss socket URL, token and launch options included
    pub socket_url: Url,
    /// The browser flavor behind the socket
    pub flavor: BrowserFlavor,
    /// The launch options the URL was built from
    pub launch: LaunchOptions,
}

/// A live handle to a remote browser, produced by a driver.
#[async_trait]
pub trait RemoteBrowser: Send {
    /// Closes the remote browser and releases the connection.
    async fn close(&mut self) -> Result<()>;
}

/// Capability seam for external browser-automation driver libraries.
///
/// The library does not ship a protocol implementation of its own; callers
/// register a driver per [`ConnectMode`] and `connect` resolves it at call
/// time. An unregistered mode is a [`DriverMissing`](crate::ErrorKind)
/// condition, distinct from connectivity failures, because the remediation
/// (register/install a driver) differs from a network problem.
#[async_trait]
pub trait AutomationDriver: Send + Sync {
    /// The mode this driver implements.
    fn mode(&self) -> ConnectMode;

    /// Attaches to the remote browser behind `descriptor.socket_url`.
    async fn attach(&self, descriptor: &ConnectionDescriptor) -> Result<Box<dyn RemoteBrowser>>;
}

/// Builds the raw socket URL for `mode` and `flavor`.
///
/// The scheme derives from the base URL (http→ws, https→wss); the path is
/// `/<flavor>` for puppeteer and `/<flavor>/playwright` for playwright;
/// the token is always a query parameter.
pub fn build_connection_url(
    config: &ClientConfig,
    mode: ConnectMode,
    flavor: BrowserFlavor,
    launch: &LaunchOptions,
) -> Result<Url> {
    let mut url = config.base_url().clone();
    let ws_scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        other => {
            return Err(Error::validation(format!(
                "base url scheme {other} has no websocket equivalent"
            )));
        }
    };
    url.set_scheme(ws_scheme)
        .map_err(|_| Error::validation("base url cannot carry a websocket scheme"))?;

    let base_path = url.path().trim_end_matches('/').to_string();
    let path = match mode {
        ConnectMode::Puppeteer => format!("{base_path}/{flavor}"),
        ConnectMode::Playwright => format!("{base_path}/{flavor}/playwright"),
    };
    url.set_path(&path);

    url.query_pairs_mut().append_pair("token", config.token());
    launch.append_query(&mut url)?;
    Ok(url)
}

impl Client {
    /// Connects to a remote browser through the driver registered for
    /// `mode`.
    ///
    /// Two steps: build the socket URL (always succeeds for valid inputs),
    /// then resolve the driver and ask it to attach. A missing driver is
    /// reported as [`ErrorKind::DriverMissing`](crate::ErrorKind), never as
    /// a Network error.
    pub async fn connect(
        &self,
        mode: ConnectMode,
        flavor: Option<BrowserFlavor>,
        launch: LaunchOptions,
    ) -> Result<Box<dyn RemoteBrowser>> {
        let config = self.config();
        let flavor = flavor.unwrap_or_else(|| config.default_flavor());
        let socket_url = build_connection_url(&config, mode, flavor, &launch)?;

        let Some(driver) = self.driver_for(mode) else {
            return Err(Error::driver_missing(mode));
        };

        let descriptor = ConnectionDescriptor {
            socket_url,
            flavor,
            launch,
        };
        tracing::debug!(%mode, %flavor, "attaching driver to remote browser");
        driver.attach(&descriptor).await
    }

    /// Probes whether the remote socket endpoint is reachable.
    ///
    /// Opens a socket and waits for the open handshake or the configured
    /// timeout; no driver handoff is attempted. Useful to validate
    /// reachability independent of any specific automation library.
    pub async fn test_connection(&self, mode: ConnectMode, flavor: Option<BrowserFlavor>) -> bool {
        let config = self.config();
        let flavor = flavor.unwrap_or_else(|| config.default_flavor());
        let url = match build_connection_url(&config, mode, flavor, &LaunchOptions::new()) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(error = %e, "connection probe could not build a socket url");
                return false;
            }
        };

        match tokio::time::timeout(
            config.timeout(),
            tokio_tungstenite::connect_async(url.as_str()),
        )
        .await
        {
            Ok(Ok((mut stream, _response))) => {
                let _ = stream.close(None).await;
                true
            }
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "connection probe failed");
                false
            }
            Err(_elapsed) => {
                tracing::debug!("connection probe timed out");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::builder()
            .token("tok_ws")
            .base_url("https://h.test")
            .build()
            .unwrap()
    }

    #[test]
    fn test_playwright_path_and_token() {
        let url = build_connection_url(
            &config(),
            ConnectMode::Playwright,
            BrowserFlavor::Firefox,
            &LaunchOptions::new(),
        )
        .unwrap();
        assert_eq!(url.scheme(), "wss");
        assert!(url.path().ends_with("/firefox/playwright"));
        assert!(
            url.query_pairs()
                .any(|(k, v)| k == "token" && v == "tok_ws")
        );
    }

    #[test]
    fn test_puppeteer_path_has_no_mode_segment() {
        let url = build_connection_url(
            &config(),
            ConnectMode::Puppeteer,
            BrowserFlavor::Chrome,
            &LaunchOptions::new(),
        )
        .unwrap();
        assert_eq!(url.path(), "/chrome");
    }

    #[test]
    fn test_http_base_maps_to_ws() {
        let config = ClientConfig::builder()
            .token("t")
            .base_url("http://localhost:4000")
            .build()
            .unwrap();
        let url = build_connection_url(
            &config,
            ConnectMode::Puppeteer,
            BrowserFlavor::Chrome,
            &LaunchOptions::new(),
        )
        .unwrap();
        assert_eq!(url.scheme(), "ws");
    }

    #[test]
    fn test_scalar_launch_options_are_plain_query_params() {
        let launch = LaunchOptions {
            headless: Some(false),
            stealth: Some(true),
            slow_mo: Some(250.0),
            ..Default::default()
        };
        let url = build_connection_url(
            &config(),
            ConnectMode::Puppeteer,
            BrowserFlavor::Chrome,
            &launch,
        )
        .unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("headless".into(), "false".into())));
        assert!(pairs.contains(&("stealth".into(), "true".into())));
        assert!(pairs.contains(&("slowMo".into(), "250.0".into())));
    }

    #[test]
    fn test_composite_launch_options_are_json_encoded() {
        let launch = LaunchOptions {
            args: Some(vec!["--disable-gpu".into(), "--no-sandbox".into()]),
            proxy: Some(ProxySettings {
                server: "http://proxy:8080".into(),
                bypass: None,
                username: None,
                password: None,
            }),
            ..Default::default()
        };
        let url = build_connection_url(
            &config(),
            ConnectMode::Playwright,
            BrowserFlavor::Chrome,
            &launch,
        )
        .unwrap();
        let args = url
            .query_pairs()
            .find(|(k, _)| k == "args")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(args, r#"["--disable-gpu","--no-sandbox"]"#);

        let proxy = url
            .query_pairs()
            .find(|(k, _)| k == "proxy")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        let decoded: Value = serde_json::from_str(&proxy).unwrap();
        assert_eq!(decoded["server"], "http://proxy:8080");
    }

    #[test]
    fn test_unset_launch_options_add_no_params() {
        let url = build_connection_url(
            &config(),
            ConnectMode::Puppeteer,
            BrowserFlavor::Chrome,
            &LaunchOptions::new(),
        )
        .unwrap();
        assert_eq!(url.query_pairs().count(), 1); // token only
    }
}
