// Content extraction: POST /<flavor>/content, returns the rendered HTML.

use serde::{Deserialize, Serialize};

use crate::api::options::{Cookie, ResourceBlocking, WaitOptions};
use crate::client::Client;
use crate::config::BrowserFlavor;
use crate::dispatch::Method;
use crate::error::{Error, Result};
use crate::validate::Violations;

/// Request for [`Client::extract_content`]. Either `url` or `html` must be
/// present.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<WaitOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<Cookie>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<ResourceBlocking>,

    #[serde(skip)]
    pub flavor: Option<BrowserFlavor>,
}

#[derive(Debug, Deserialize)]
struct ContentEnvelope {
    data: String,
}

impl ContentRequest {
    /// Request targeting a URL.
    pub fn for_url(url: impl Into<String>) -> Self {
        ContentRequest {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Request rendering inline markup.
    pub fn for_html(html: impl Into<String>) -> Self {
        ContentRequest {
            html: Some(html.into()),
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let mut violations = Violations::new();
        violations.require_target(&self.url, &self.html);
        if let Some(wait) = &self.wait {
            wait.validate_into(&mut violations);
        }
        violations.finish("content request")
    }
}

impl Client {
    /// Returns the fully rendered markup of the target.
    pub async fn extract_content(&self, request: ContentRequest) -> Result<String> {
        request.validate()?;
        let body = serde_json::to_value(&request)
            .map_err(|e| Error::validation(format!("unencodable content request: {e}")))?;
        let payload = self
            .send("content", Method::Post, Some(&body), request.flavor)
            .await?
            .expect_json()?;
        let envelope: ContentEnvelope = serde_json::from_value(payload)
            .map_err(|e| Error::new(crate::ErrorKind::Generic, format!("malformed content response: {e}")))?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_rule() {
        assert!(ContentRequest::default().validate().is_err());
        assert!(ContentRequest::for_url("https://example.com").validate().is_ok());
        assert!(ContentRequest::for_html("<p>x</p>").validate().is_ok());
    }
}
