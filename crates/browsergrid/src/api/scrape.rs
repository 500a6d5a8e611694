// Structured scraping
//
// POST /<flavor>/scrape captures text, markup and attributes for a set of
// selectors in one round trip.

use serde::{Deserialize, Serialize};

use crate::api::options::{Cookie, WaitOptions};
use crate::client::Client;
use crate::config::BrowserFlavor;
use crate::dispatch::Method;
use crate::error::{Error, Result};
use crate::validate::Violations;

/// One selector to capture.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeTarget {
    /// CSS selector
    pub selector: String,

    /// Per-selector wait deadline in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl ScrapeTarget {
    /// Target for `selector` with no per-selector deadline.
    pub fn new(selector: impl Into<String>) -> Self {
        ScrapeTarget {
            selector: selector.into(),
            timeout_ms: None,
        }
    }
}

/// Request for [`Client::scrape`]. Either `url` or `html` must be present,
/// and at least one element must be requested.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Selectors to capture
    pub elements: Vec<ScrapeTarget>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<WaitOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<Cookie>>,

    #[serde(skip)]
    pub flavor: Option<BrowserFlavor>,
}

impl ScrapeRequest {
    /// Request scraping `elements` from `url`.
    pub fn for_url(url: impl Into<String>, elements: Vec<ScrapeTarget>) -> Self {
        ScrapeRequest {
            url: Some(url.into()),
            elements,
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let mut violations = Violations::new();
        violations.require_target(&self.url, &self.html);
        violations.check(
            !self.elements.is_empty(),
            "at least one element selector is required",
        );
        for (i, target) in self.elements.iter().enumerate() {
            violations.check(
                !target.selector.trim().is_empty(),
                format!("element selector {i} must not be empty"),
            );
            violations.range_u64(
                &format!("element {i} timeout"),
                target.timeout_ms,
                0,
                crate::api::options::MAX_WAIT_MS,
            );
        }
        if let Some(wait) = &self.wait {
            wait.validate_into(&mut violations);
        }
        violations.finish("scrape request")
    }
}

/// One element matched by a selector.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedElement {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub html: Option<String>,

    /// Attribute name/value pairs as the service reported them
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Matches for one requested selector.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedSelector {
    pub selector: String,

    #[serde(default)]
    pub results: Vec<ScrapedElement>,
}

/// Everything the scrape captured.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    #[serde(default)]
    pub data: Vec<ScrapedSelector>,
}

impl Client {
    /// Captures the requested selectors from the target page.
    pub async fn scrape(&self, request: ScrapeRequest) -> Result<ScrapeResult> {
        request.validate()?;
        let body = serde_json::to_value(&request)
            .map_err(|e| Error::validation(format!("unencodable scrape request: {e}")))?;
        let payload = self
            .send("scrape", Method::Post, Some(&body), request.flavor)
            .await?
            .expect_json()?;
        serde_json::from_value(payload).map_err(|e| {
            Error::new(
                crate::ErrorKind::Generic,
                format!("malformed scrape response: {e}"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_elements_rejected() {
        let err = ScrapeRequest::for_url("https://example.com", vec![])
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("at least one element"));
    }

    #[test]
    fn test_blank_selector_is_named_by_index() {
        let err = ScrapeRequest::for_url(
            "https://example.com",
            vec![ScrapeTarget::new("h1"), ScrapeTarget::new("  ")],
        )
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("element selector 1"));
    }

    #[test]
    fn test_result_tolerates_sparse_elements() {
        let result: ScrapeResult = serde_json::from_value(serde_json::json!({
            "data": [
                {"selector": "h1", "results": [{"text": "Title"}]},
                {"selector": ".missing"}
            ]
        }))
        .unwrap();
        assert_eq!(result.data.len(), 2);
        assert_eq!(result.data[0].results[0].text.as_deref(), Some("Title"));
        assert!(result.data[1].results.is_empty());
    }
}
