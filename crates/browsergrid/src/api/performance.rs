// Performance audit: POST /<flavor>/performance, returns the audit report.

use serde::Serialize;
use serde_json::Value;

use crate::client::Client;
use crate::config::BrowserFlavor;
use crate::dispatch::Method;
use crate::error::{Error, Result};
use crate::validate::Violations;

/// Audit tuning knobs.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceConfig {
    /// Audit categories to run (service defaults apply when omitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    /// Budget thresholds forwarded to the audit engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budgets: Option<Value>,
}

/// Request for [`Client::performance`]. Either `url` or `html` must be
/// present.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<PerformanceConfig>,

    #[serde(skip)]
    pub flavor: Option<BrowserFlavor>,
}

impl PerformanceRequest {
    /// Request auditing `url`.
    pub fn for_url(url: impl Into<String>) -> Self {
        PerformanceRequest {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let mut violations = Violations::new();
        violations.require_target(&self.url, &self.html);
        violations.finish("performance request")
    }
}

impl Client {
    /// Runs a performance audit against the target.
    ///
    /// The report shape is owned by the audit engine and varies across
    /// service versions, so it is returned as raw JSON.
    pub async fn performance(&self, request: PerformanceRequest) -> Result<Value> {
        request.validate()?;
        let body = serde_json::to_value(&request)
            .map_err(|e| Error::validation(format!("unencodable performance request: {e}")))?;
        self.send("performance", Method::Post, Some(&body), request.flavor)
            .await?
            .expect_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_rule() {
        assert!(PerformanceRequest::default().validate().is_err());
        assert!(
            PerformanceRequest::for_url("https://example.com")
                .validate()
                .is_ok()
        );
    }
}
