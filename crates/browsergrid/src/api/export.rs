// Data export: POST /<flavor>/export, returns the page converted to the
// requested textual format.

use serde::{Deserialize, Serialize};

use crate::api::options::WaitOptions;
use crate::client::Client;
use crate::config::BrowserFlavor;
use crate::dispatch::Method;
use crate::error::{Error, Result};
use crate::validate::Violations;

/// Output format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Markdown,
    Text,
}

/// Request for [`Client::export`]. Either `url` or `html` must be present.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Output format (service default when omitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ExportFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<WaitOptions>,

    #[serde(skip)]
    pub flavor: Option<BrowserFlavor>,
}

impl ExportRequest {
    /// Request exporting `url` as `format`.
    pub fn for_url(url: impl Into<String>, format: ExportFormat) -> Self {
        ExportRequest {
            url: Some(url.into()),
            format: Some(format),
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let mut violations = Violations::new();
        violations.require_target(&self.url, &self.html);
        if let Some(wait) = &self.wait {
            wait.validate_into(&mut violations);
        }
        violations.finish("export request")
    }
}

/// The exported document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    /// The converted document
    pub data: String,

    /// The format the service actually produced
    pub format: ExportFormat,
}

impl Client {
    /// Converts the target page to a textual format.
    pub async fn export(&self, request: ExportRequest) -> Result<ExportResult> {
        request.validate()?;
        let body = serde_json::to_value(&request)
            .map_err(|e| Error::validation(format!("unencodable export request: {e}")))?;
        let payload = self
            .send("export", Method::Post, Some(&body), request.flavor)
            .await?
            .expect_json()?;
        serde_json::from_value(payload).map_err(|e| {
            Error::new(
                crate::ErrorKind::Generic,
                format!("malformed export response: {e}"),
            )
        })
    }
}
