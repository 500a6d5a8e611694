// Error types for the BrowserGrid client
//
// Every failure in the library is normalized to a single `Error` value
// carrying one `ErrorKind`. Callers branch on the kind, never on message
// text. Classification from transport/status signals is a pure function
// (`classify`) so the mapping is testable without constructing errors.

use std::fmt;

use thiserror::Error;

/// Result type alias for BrowserGrid operations
pub type Result<T> = std::result::Result<T, Error>;

/// The closed set of failure categories.
///
/// `DriverMissing` is never produced by [`classify`]; it is raised directly
/// by the connection broker when no automation driver is registered for the
/// requested mode, so callers can tell "install/register a driver" apart
/// from a connectivity problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Credentials rejected by the remote service (401/403)
    Authentication,
    /// The call exceeded its deadline, locally or remotely (408, aborted)
    Timeout,
    /// The remote service is throttling this token (429)
    RateLimit,
    /// Input rejected before or by the remote service (400, local checks)
    Validation,
    /// The request never reached the remote service
    Network,
    /// The remote service failed internally (500/502/503/504)
    Server,
    /// No automation driver registered for the requested connect mode
    DriverMissing,
    /// Any other failure, carrying the original status when there was one
    Generic,
}

impl ErrorKind {
    /// Stable lowercase name, used in log fields and error prefixes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Authentication => "authentication",
            ErrorKind::Timeout => "timeout",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Validation => "validation",
            ErrorKind::Network => "network",
            ErrorKind::Server => "server",
            ErrorKind::DriverMissing => "driver_missing",
            ErrorKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport-level failure signal, reported by the HTTP layer when the
/// response status alone cannot explain what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportSignal {
    /// The in-flight call was aborted by the configured deadline
    TimedOut,
    /// The connection could not be established or broke mid-flight
    ConnectionFailed,
}

/// Maps (status, transport signal) to an [`ErrorKind`].
///
/// Checked in order: 401/403 → Authentication; 408 or an abort signal →
/// Timeout; 429 → RateLimit; 400 → Validation; 500/502/503/504 → Server;
/// no status at all → Network; anything else → Generic.
pub fn classify(status: Option<u16>, signal: Option<TransportSignal>) -> ErrorKind {
    match (status, signal) {
        (Some(401 | 403), _) => ErrorKind::Authentication,
        (Some(408), _) | (_, Some(TransportSignal::TimedOut)) => ErrorKind::Timeout,
        (Some(429), _) => ErrorKind::RateLimit,
        (Some(400), _) => ErrorKind::Validation,
        (Some(500 | 502 | 503 | 504), _) => ErrorKind::Server,
        (None, _) => ErrorKind::Network,
        (Some(_), _) => ErrorKind::Generic,
    }
}

/// A classified failure.
///
/// The kind is intrinsic and inspectable via [`Error::kind`]; the original
/// HTTP status and raw response body are preserved when they existed.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    body: Option<String>,
}

impl Error {
    /// Builds an error with an explicit kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error {
            kind,
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Builds an error by classifying the status and transport signal.
    pub fn classified(
        status: Option<u16>,
        signal: Option<TransportSignal>,
        message: impl Into<String>,
        body: Option<String>,
    ) -> Self {
        Error {
            kind: classify(status, signal),
            message: message.into(),
            status,
            body,
        }
    }

    /// Local validation failure; never reaches the network.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Validation, message)
    }

    /// Deadline expiry, local or remote.
    pub fn timeout(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Timeout, message)
    }

    /// The request never reached the remote service.
    pub fn network(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Network, message)
    }

    /// No automation driver is registered for `mode`.
    pub fn driver_missing(mode: impl fmt::Display) -> Self {
        Error::new(
            ErrorKind::DriverMissing,
            format!("no automation driver registered for {mode} mode"),
        )
    }

    /// The failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The HTTP status, when the remote service produced one.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// The raw response body, when one could be read.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
