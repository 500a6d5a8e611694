// Request dispatcher
//
// Turns a validated request into an HTTP call and a classified outcome.
// URL construction, header policy, timeout enforcement and response
// decoding all live here so every endpoint operation shares one path to
// the network.

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::config::{BrowserFlavor, ClientConfig};
use crate::error::{Error, Result, TransportSignal};

/// HTTP methods used by the REST surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Delete,
}

/// A decoded response body.
///
/// The three-way split is part of the dispatcher contract: JSON content
/// types decode to a parsed structure, binary content types (documents,
/// images) to a raw byte buffer, and anything else to plain text. Callers
/// of file-returning endpoints depend on receiving bytes, not text.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Parsed `application/json` body
    Json(Value),
    /// Raw bytes for document/image/octet-stream bodies
    Binary(Bytes),
    /// Everything else, decoded as UTF-8 text
    Text(String),
}

impl Payload {
    /// Unwraps a JSON payload, failing with a Generic error otherwise.
    pub fn expect_json(self) -> Result<Value> {
        match self {
            Payload::Json(value) => Ok(value),
            other => Err(Error::new(
                crate::ErrorKind::Generic,
                format!("expected a JSON response, got {}", other.kind_name()),
            )),
        }
    }

    /// Unwraps a binary payload, failing with a Generic error otherwise.
    pub fn expect_binary(self) -> Result<Bytes> {
        match self {
            Payload::Binary(bytes) => Ok(bytes),
            other => Err(Error::new(
                crate::ErrorKind::Generic,
                format!("expected a binary response, got {}", other.kind_name()),
            )),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Payload::Json(_) => "json",
            Payload::Binary(_) => "binary",
            Payload::Text(_) => "text",
        }
    }
}

/// Builds the URL for an endpoint path.
///
/// Paths starting with `/` append directly to the base URL (health,
/// metrics, sessions); bare paths compose `base/<flavor>/<path>` where the
/// flavor is the per-call override or the configured default. One builder
/// serves both shapes so flavor-scoped and flavor-agnostic endpoints stay
/// consistent.
pub(crate) fn endpoint_url(
    config: &ClientConfig,
    path: &str,
    flavor: Option<BrowserFlavor>,
) -> Url {
    let mut url = config.base_url().clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    let full_path = if let Some(rest) = path.strip_prefix('/') {
        format!("{base_path}/{rest}")
    } else {
        let flavor = flavor.unwrap_or_else(|| config.default_flavor());
        format!("{base_path}/{flavor}/{path}")
    };
    url.set_path(&full_path);
    url
}

/// Performs one HTTP call and decodes the outcome.
///
/// Header policy: `Content-Type: application/json` plus a bearer
/// authorization header derived from the configured token, attached to
/// every call; callers cannot override the authorization header. The
/// configured timeout bounds the whole call, and expiry actively aborts
/// the in-flight request.
pub(crate) async fn send(
    http: &reqwest::Client,
    config: &ClientConfig,
    path: &str,
    method: Method,
    body: Option<&Value>,
    flavor: Option<BrowserFlavor>,
) -> Result<Payload> {
    let url = endpoint_url(config, path, flavor);
    tracing::debug!(%url, ?method, "dispatching request");

    let mut request = match method {
        Method::Get => http.get(url.clone()),
        Method::Post => http.post(url.clone()),
        Method::Delete => http.delete(url.clone()),
    };
    request = request
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {}", config.token()))
        .timeout(config.timeout());
    if let Some(body) = body {
        request = request.json(body);
    }

    let response = request.send().await.map_err(|e| transport_error(&e))?;
    let status = response.status();

    if !status.is_success() {
        // Best effort: a failed body read falls back to a generic message.
        let body = response.text().await.ok().filter(|t| !t.is_empty());
        let message = body
            .clone()
            .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
        tracing::debug!(status = status.as_u16(), "request rejected by remote");
        return Err(Error::classified(
            Some(status.as_u16()),
            None,
            message,
            body,
        ));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
        let value = response.json().await.map_err(|e| decode_error(&e))?;
        Ok(Payload::Json(value))
    } else if is_binary(&content_type) {
        let bytes = response.bytes().await.map_err(|e| transport_error(&e))?;
        Ok(Payload::Binary(bytes))
    } else {
        let text = response.text().await.map_err(|e| transport_error(&e))?;
        Ok(Payload::Text(text))
    }
}

fn is_binary(content_type: &str) -> bool {
    content_type.starts_with("application/pdf")
        || content_type.starts_with("image/")
        || content_type.starts_with("application/octet-stream")
}

/// Transport-level failure with no HTTP status: timeout expiry routes to
/// Timeout, everything else to Network.
fn transport_error(error: &reqwest::Error) -> Error {
    let signal = if error.is_timeout() {
        TransportSignal::TimedOut
    } else {
        TransportSignal::ConnectionFailed
    };
    Error::classified(None, Some(signal), error.to_string(), None)
}

fn decode_error(error: &reqwest::Error) -> Error {
    if error.is_timeout() {
        return transport_error(error);
    }
    Error::new(
        crate::ErrorKind::Generic,
        format!("failed to decode response body: {error}"),
    )
}
