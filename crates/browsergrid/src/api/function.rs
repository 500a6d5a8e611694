// Arbitrary function execution
//
// POST /<flavor>/function runs caller-supplied code inside the remote
// browser and returns whatever it produced, tagged with its type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;
use crate::config::BrowserFlavor;
use crate::dispatch::Method;
use crate::error::{Error, Result};
use crate::validate::Violations;

/// Request for [`Client::run_function`]. The code is the target here, so
/// it must be non-empty; no URL/markup rule applies.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRequest {
    /// Code to execute in the remote browser
    pub code: String,

    /// Value exposed to the function as its context argument
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    #[serde(skip)]
    pub flavor: Option<BrowserFlavor>,
}

impl FunctionRequest {
    /// Request executing `code` with no context.
    pub fn new(code: impl Into<String>) -> Self {
        FunctionRequest {
            code: code.into(),
            ..Default::default()
        }
    }

    /// Attach a context value passed to the function.
    pub fn context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let mut violations = Violations::new();
        violations.check(!self.code.trim().is_empty(), "code must not be empty");
        violations.finish("function request")
    }
}

/// What the remote function produced.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionResult {
    /// The returned value
    pub data: Value,

    /// The remote type tag of the value
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Client {
    /// Executes caller-supplied code in the remote browser.
    pub async fn run_function(&self, request: FunctionRequest) -> Result<FunctionResult> {
        request.validate()?;
        let body = serde_json::to_value(&request)
            .map_err(|e| Error::validation(format!("unencodable function request: {e}")))?;
        let payload = self
            .send("function", Method::Post, Some(&body), request.flavor)
            .await?
            .expect_json()?;
        serde_json::from_value(payload).map_err(|e| {
            Error::new(
                crate::ErrorKind::Generic,
                format!("malformed function response: {e}"),
            )
        })
    }
}
