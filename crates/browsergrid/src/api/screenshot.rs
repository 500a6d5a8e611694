// Screenshot operation
//
// POST /<flavor>/screenshot, returns the captured image as raw bytes.

use bytes::Bytes;
use serde::Serialize;

use crate::api::options::{Cookie, HttpCredentials, ResourceBlocking, Viewport, WaitOptions};
use crate::client::Client;
use crate::config::BrowserFlavor;
use crate::dispatch::Method;
use crate::error::Result;
use crate::validate::Violations;

/// Screenshot image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG (lossless, supports transparency)
    Png,
    /// JPEG (lossy, smaller)
    Jpeg,
    /// WebP
    Webp,
}

/// Rectangular region to capture instead of the full viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenshotClip {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Request for [`Client::screenshot`].
///
/// Either `url` or `html` must be present.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotRequest {
    /// Target URL to capture
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Inline markup to capture instead of navigating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Image format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ImageFormat>,

    /// Lossy-format quality (0–100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,

    /// Capture the full scrollable page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_page: Option<bool>,

    /// Capture only this region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<ScreenshotClip>,

    /// Transparent background where the page defines none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omit_background: Option<bool>,

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

    /// Per-call flavor override; never serialized.
    #[serde(skip)]
    pub flavor: Option<BrowserFlavor>,
}

impl ScreenshotRequest {
    /// Creates a new builder.
    pub fn builder() -> ScreenshotRequestBuilder {
        ScreenshotRequestBuilder::default()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let mut violations = Violations::new();
        violations.require_target(&self.url, &self.html);
        violations.range_u64("quality", self.quality.map(u64::from), 0, 100);
        if let Some(clip) = &self.clip {
            violations.check(
                clip.width > 0.0 && clip.height > 0.0,
                "clip region must have positive width and height",
            );
        }
        if let Some(viewport) = &self.viewport {
            viewport.validate_into(&mut violations);
        }
        if let Some(wait) = &self.wait {
            wait.validate_into(&mut violations);
        }
        violations.finish("screenshot request")
    }
}

/// Builder for [`ScreenshotRequest`].
#[derive(Debug, Clone, Default)]
pub struct ScreenshotRequestBuilder {
    request: ScreenshotRequest,
}

impl ScreenshotRequestBuilder {
    /// Set the target URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.request.url = Some(url.into());
        self
    }

    /// Set inline markup to capture.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.request.html = Some(html.into());
        self
    }

    /// Set the image format.
    pub fn format(mut self, format: ImageFormat) -> Self {
        self.request.format = Some(format);
        self
    }

    /// Set the lossy-format quality (0–100).
    pub fn quality(mut self, quality: u8) -> Self {
        self.request.quality = Some(quality);
        self
    }

    /// Capture the full scrollable page.
    pub fn full_page(mut self, full_page: bool) -> Self {
        self.request.full_page = Some(full_page);
        self
    }

    /// Capture only the given region.
    pub fn clip(mut self, clip: ScreenshotClip) -> Self {
        self.request.clip = Some(clip);
        self
    }

    /// Transparent background where the page defines none.
    pub fn omit_background(mut self, omit_background: bool) -> Self {
        self.request.omit_background = Some(omit_background);
        self
    }

    /// Set the viewport.
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.request.viewport = Some(viewport);
        self
    }

    /// Install cookies before capturing.
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
    pub fn build(self) -> ScreenshotRequest {
        self.request
    }
}

impl Client {
    /// Captures a screenshot of the target.
    pub async fn screenshot(&self, request: ScreenshotRequest) -> Result<Bytes> {
        request.validate()?;
        let body = serde_json::to_value(&request)
            .map_err(|e| crate::Error::validation(format!("unencodable screenshot request: {e}")))?;
        self.send("screenshot", Method::Post, Some(&body), request.flavor)
            .await?
            .expect_binary()
    }
}
