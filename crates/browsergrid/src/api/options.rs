// Shared option types used across endpoint operations.

use serde::{Deserialize, Serialize};

use crate::validate::Violations;

/// Maximum wait timeout in milliseconds.
pub(crate) const MAX_WAIT_MS: u64 = 300_000;

/// Viewport dimensions for the remote page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Page width in CSS pixels (1–4096)
    pub width: u32,
    /// Page height in CSS pixels (1–4096)
    pub height: u32,
    /// Device scale factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_scale_factor: Option<f64>,
}

impl Viewport {
    /// A viewport with the given dimensions and no scale override.
    pub fn new(width: u32, height: u32) -> Self {
        Viewport {
            width,
            height,
            device_scale_factor: None,
        }
    }

    pub(crate) fn validate_into(&self, violations: &mut Violations) {
        violations.range_u64("viewport width", Some(self.width as u64), 1, 4096);
        violations.range_u64("viewport height", Some(self.height as u64), 1, 4096);
    }
}

/// Cookie same-site policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// A cookie installed before the page loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Unix time in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub same_site: Option<SameSite>,
}

impl Cookie {
    /// A session cookie with just a name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Cookie {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            expires: None,
            http_only: None,
            secure: None,
            same_site: None,
        }
    }
}

/// Page lifecycle event to wait for before the operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaitEvent {
    /// The `load` event fired
    Load,
    /// The `DOMContentLoaded` event fired
    DomContentLoaded,
    /// No network connections for at least 500ms
    NetworkIdle,
}

/// Wait conditions applied before the operation captures its result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitOptions {
    /// Lifecycle event to wait for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<WaitEvent>,

    /// CSS selector that must appear before proceeding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,

    /// Wait deadline in milliseconds (0–300000)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl WaitOptions {
    pub(crate) fn validate_into(&self, violations: &mut Violations) {
        violations.range_u64("wait timeout", self.timeout_ms, 0, MAX_WAIT_MS);
        if let Some(selector) = &self.selector {
            violations.check(
                !selector.trim().is_empty(),
                "wait selector must not be empty",
            );
        }
    }
}

/// Resource classes the remote browser should refuse to load.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBlocking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ads: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheets: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<bool>,
}

/// HTTP basic-auth credentials for the target site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpCredentials {
    pub username: String,
    pub password: String,
}
