// Anti-bot unblock
//
// POST /<flavor>/unblock navigates through the platform's bot-detection
// evasions and hands back whatever artifacts were requested. A live site
// is the whole point here, so the request requires a URL; there is no
// inline-markup form.

use serde::{Deserialize, Serialize};

use crate::api::options::Cookie;
use crate::client::Client;
use crate::config::BrowserFlavor;
use crate::dispatch::Method;
use crate::error::{Error, Result};
use crate::validate::Violations;

/// Request for [`Client::unblock`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnblockRequest {
    /// Target URL (required)
    pub url: String,

    /// Return the rendered page content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<bool>,

    /// Return the cookies the page set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<bool>,

    /// Return a screenshot, base64-encoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<bool>,

    /// Keep the unblocked browser alive for this long, in milliseconds,
    /// so a follow-up socket connection can reuse it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_ms: Option<u64>,

    #[serde(skip)]
    pub flavor: Option<BrowserFlavor>,
}

impl UnblockRequest {
    /// Request unblocking `url`.
    pub fn new(url: impl Into<String>) -> Self {
        UnblockRequest {
            url: url.into(),
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let mut violations = Violations::new();
        violations.check(!self.url.trim().is_empty(), "url must not be empty");
        if !self.url.trim().is_empty() {
            violations.check(
                url::Url::parse(self.url.trim()).is_ok(),
                "url must be a valid absolute URL",
            );
        }
        violations.finish("unblock request")
    }
}

/// Artifacts produced by an unblock run. Fields are present only when the
/// request asked for them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnblockResult {
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub cookies: Option<Vec<Cookie>>,

    /// Base64-encoded screenshot; decode with
    /// [`util::from_base64`](crate::util::from_base64)
    #[serde(default)]
    pub screenshot: Option<String>,

    /// Socket endpoint of the still-alive unblocked browser, when a ttl
    /// was requested
    #[serde(default)]
    pub browser_ws_endpoint: Option<String>,

    #[serde(default)]
    pub ttl: Option<u64>,
}

impl Client {
    /// Navigates the target through anti-bot evasions.
    pub async fn unblock(&self, request: UnblockRequest) -> Result<UnblockResult> {
        request.validate()?;
        let body = serde_json::to_value(&request)
            .map_err(|e| Error::validation(format!("unencodable unblock request: {e}")))?;
        let payload = self
            .send("unblock", Method::Post, Some(&body), request.flavor)
            .await?
            .expect_json()?;
        serde_json::from_value(payload).map_err(|e| {
            Error::new(
                crate::ErrorKind::Generic,
                format!("malformed unblock response: {e}"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_is_required_and_must_parse() {
        assert!(UnblockRequest::new("").validate().is_err());
        assert!(UnblockRequest::new("not a url").validate().is_err());
        assert!(UnblockRequest::new("https://example.com").validate().is_ok());
    }

    #[test]
    fn test_sparse_result_decodes() {
        let result: UnblockResult = serde_json::from_value(serde_json::json!({
            "content": "<html></html>"
        }))
        .unwrap();
        assert!(result.content.is_some());
        assert!(result.cookies.is_none());
        assert!(result.browser_ws_endpoint.is_none());
    }
}
