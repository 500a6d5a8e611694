// File download
//
// POST /<flavor>/download navigates to the target, waits for the page to
// produce a file, and returns that file's raw bytes.

use bytes::Bytes;
use serde::Serialize;

use crate::api::options::{Cookie, WaitOptions};
use crate::client::Client;
use crate::config::BrowserFlavor;
use crate::dispatch::Method;
use crate::error::{Error, Result};
use crate::validate::Violations;

/// Request for [`Client::download`]. Either `url` or `html` must be
/// present; the page behind it is expected to trigger a download.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<WaitOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<Cookie>>,

    #[serde(skip)]
    pub flavor: Option<BrowserFlavor>,
}

impl DownloadRequest {
    /// Request downloading from `url`.
    pub fn for_url(url: impl Into<String>) -> Self {
        DownloadRequest {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let mut violations = Violations::new();
        violations.require_target(&self.url, &self.html);
        if let Some(wait) = &self.wait {
            wait.validate_into(&mut violations);
        }
        violations.finish("download request")
    }
}

impl Client {
    /// Returns the file the target page produces.
    pub async fn download(&self, request: DownloadRequest) -> Result<Bytes> {
        request.validate()?;
        let body = serde_json::to_value(&request)
            .map_err(|e| Error::validation(format!("unencodable download request: {e}")))?;
        self.send("download", Method::Post, Some(&body), request.flavor)
            .await?
            .expect_binary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_rule() {
        assert!(DownloadRequest::default().validate().is_err());
        assert!(
            DownloadRequest::for_url("https://example.com/report")
                .validate()
                .is_ok()
        );
    }
}
