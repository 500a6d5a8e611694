// Render-to-PDF operation
//
// POST /<flavor>/pdf, returns the rendered document as raw bytes.

use bytes::Bytes;
use serde::Serialize;

use crate::api::options::{Cookie, HttpCredentials, ResourceBlocking, Viewport, WaitOptions};
use crate::client::Client;
use crate::config::BrowserFlavor;
use crate::dispatch::Method;
use crate::error::Result;
use crate::validate::Violations;

/// Paper size for a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperFormat {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfMargins {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
}

/// Request for [`Client::render_pdf`].
///
/// Either `url` or `html` must be present.
///
/// # Example
///
/// ```ignore
/// use browsergrid::api::{PaperFormat, PdfRequest};
///
/// let request = PdfRequest::builder()
///     .url("https://example.com")
///     .format(PaperFormat::A4)
///     .landscape(true)
///     .build();
/// let document = client.render_pdf(request).await?;
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfRequest {
    /// Target URL to render
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Inline markup to render instead of navigating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Paper size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<PaperFormat>,

    /// Landscape orientation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landscape: Option<bool>,

    /// Page margins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<PdfMargins>,

    /// Render scale factor (0.1–2)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    /// Include background graphics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_background: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<Cookie>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<WaitOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<ResourceBlocking>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<HttpCredentials>,

    /// Per-call flavor override; never serialized, never mutates the
    /// client-wide default.
    #[serde(skip)]
    pub flavor: Option<BrowserFlavor>,
}

impl PdfRequest {
    /// Creates a new builder.
    pub fn builder() -> PdfRequestBuilder {
        PdfRequestBuilder::default()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let mut violations = Violations::new();
        violations.require_target(&self.url, &self.html);
        violations.range_f64("scale", self.scale, 0.1, 2.0);
        if let Some(viewport) = &self.viewport {
            viewport.validate_into(&mut violations);
        }
        if let Some(wait) = &self.wait {
            wait.validate_into(&mut violations);
        }
        violations.finish("pdf request")
    }
}

/// Builder for [`PdfRequest`].
#[derive(Debug, Clone, Default)]
pub struct PdfRequestBuilder {
    request: PdfRequest,
}

impl PdfRequestBuilder {
    /// Set the target URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.request.url = Some(url.into());
        self
    }

    /// Set inline markup to render.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.request.html = Some(html.into());
        self
    }

    /// Set the paper size.
    pub fn format(mut self, format: PaperFormat) -> Self {
        self.request.format = Some(format);
        self
    }

    /// Render in landscape orientation.
    pub fn landscape(mut self, landscape: bool) -> Self {
        self.request.landscape = Some(landscape);
        self
    }

    /// Set page margins.
    pub fn margins(mut self, margins: PdfMargins) -> Self {
        self.request.margins = Some(margins);
        self
    }

    /// Set the render scale factor (0.1–2).
    pub fn scale(mut self, scale: f64) -> Self {
        self.request.scale = Some(scale);
        self
    }

    /// Include background graphics.
    pub fn print_background(mut self, print_background: bool) -> Self {
        self.request.print_background = Some(print_background);
        self
    }

    /// Set the viewport.
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.request.viewport = Some(viewport);
        self
    }

    /// Install cookies before rendering.
    pub fn cookies(mut self, cookies: Vec<Cookie>) -> Self {
        self.request.cookies = Some(cookies);
        self
    }

    /// Set wait conditions.
    pub fn wait(mut self, wait: WaitOptions) -> Self {
        self.request.wait = Some(wait);
        self
    }

    /// Set resource-blocking flags.
    pub fn block(mut self, block: ResourceBlocking) -> Self {
        self.request.block = Some(block);
        self
    }

    /// Set basic-auth credentials for the target.
    pub fn credentials(mut self, credentials: HttpCredentials) -> Self {
        self.request.credentials = Some(credentials);
        self
    }

    /// Override the browser flavor for this call only.
    pub fn flavor(mut self, flavor: BrowserFlavor) -> Self {
        self.request.flavor = Some(flavor);
        self
    }

    /// Build the request.
    pub fn build(self) -> PdfRequest {
        self.request
    }
}

impl Client {
    /// Renders the target to a PDF document.
    pub async fn render_pdf(&self, request: PdfRequest) -> Result<Bytes> {
        request.validate()?;
        let body = serde_json::to_value(&request)
            .map_err(|e| crate::Error::validation(format!("unencodable pdf request: {e}")))?;
        self.send("pdf", Method::Post, Some(&body), request.flavor)
            .await?
            .expect_binary()
    }
}
