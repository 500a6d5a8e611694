// Session lifecycle
//
// Sessions are remote-service-managed browser instances referenced by id.
// The lifecycle is strictly create → reads by id → close, and the library
// holds no local cache of session state: every read goes to the remote
// service. Closing an unknown or already-closed id is forwarded as-is and
// the remote's error response is classified normally.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::config::BrowserFlavor;
use crate::dispatch::Method;
use crate::error::{Error, Result};
use crate::validate::Violations;

/// Remote-reported session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Running,
    Closed,
}

/// A remote browser session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub status: SessionStatus,

    /// Flavor the session was created with
    #[serde(default)]
    pub flavor: Option<BrowserFlavor>,

    /// Socket endpoint for attaching a driver to this session
    #[serde(default)]
    pub ws_endpoint: Option<String>,

    /// Creation time as reported by the service (RFC 3339)
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Request for [`Client::create_session`].
///
/// The `/sessions` path is flavor-agnostic, so the flavor rides in the
/// body; the service falls back to its own default when omitted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor: Option<BrowserFlavor>,

    /// Idle lifetime in milliseconds before the service reclaims the
    /// session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stealth: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headless: Option<bool>,
}

impl CreateSessionRequest {
    /// A session with all service defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        // Structurally unconstrained; kept so creation flows through the
        // same validate-then-dispatch path as every other operation.
        Violations::new().finish("session request")
    }
}

impl Client {
    /// Creates a remote browser session.
    pub async fn create_session(&self, request: CreateSessionRequest) -> Result<Session> {
        request.validate()?;
        let body = serde_json::to_value(&request)
            .map_err(|e| Error::validation(format!("unencodable session request: {e}")))?;
        let payload = self
            .send("/sessions", Method::Post, Some(&body), None)
            .await?
            .expect_json()?;
        decode_session(payload)
    }

    /// Reads a session's current state from the remote service.
    pub async fn get_session(&self, id: &str) -> Result<Session> {
        validate_session_id(id)?;
        let payload = self
            .send(&format!("/sessions/{id}"), Method::Get, None, None)
            .await?
            .expect_json()?;
        decode_session(payload)
    }

    /// Closes a session.
    ///
    /// An unknown or already-closed id is the remote's call to reject;
    /// its error response comes back classified, with no idempotent-
    /// success special case.
    pub async fn close_session(&self, id: &str) -> Result<()> {
        validate_session_id(id)?;
        self.send(&format!("/sessions/{id}"), Method::Delete, None, None)
            .await?;
        Ok(())
    }
}

fn validate_session_id(id: &str) -> Result<()> {
    let mut violations = Violations::new();
    violations.check(!id.trim().is_empty(), "session id must not be empty");
    violations.finish("session id")
}

fn decode_session(payload: serde_json::Value) -> Result<Session> {
    serde_json::from_value(payload).map_err(|e| {
        Error::new(
            crate::ErrorKind::Generic,
            format!("malformed session response: {e}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_session_id_rejected() {
        let err = validate_session_id(" ").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Validation);
    }

    #[test]
    fn test_session_decodes_with_unknown_extras_ignored() {
        let session: Session = serde_json::from_value(serde_json::json!({
            "id": "sess_42",
            "status": "running",
            "flavor": "firefox",
            "region": "eu-west"
        }))
        .unwrap();
        assert_eq!(session.id, "sess_42");
        assert_eq!(session.status, SessionStatus::Running);
        assert_eq!(session.flavor, Some(BrowserFlavor::Firefox));
    }

    #[test]
    fn test_create_body_is_flavor_in_body() {
        let request = CreateSessionRequest {
            flavor: Some(BrowserFlavor::Webkit),
            ttl_ms: Some(60_000),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["flavor"], "webkit");
        assert_eq!(json["ttlMs"], 60_000);
    }
}
