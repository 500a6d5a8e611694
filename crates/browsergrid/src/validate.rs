// Declarative input validation
//
// Each request shape and the client configuration validate through a
// `Violations` accumulator: every failing predicate is recorded, and the
// result is one aggregated message enumerating everything wrong at once
// rather than stopping at the first failure. No network or I/O here.

use crate::error::{Error, Result};

/// Accumulates constraint violations for one input shape.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub fn new() -> Self {
        Violations::default()
    }

    /// Records `message` when `ok` is false.
    pub fn check(&mut self, ok: bool, message: impl Into<String>) {
        if !ok {
            self.messages.push(message.into());
        }
    }

    /// Inclusive numeric range check on an optional field.
    pub fn range_f64(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) {
        if let Some(v) = value {
            self.check(
                v >= min && v <= max,
                format!("{field} must be between {min} and {max}, got {v}"),
            );
        }
    }

    /// Inclusive numeric range check on an optional integer field.
    pub fn range_u64(&mut self, field: &str, value: Option<u64>, min: u64, max: u64) {
        if let Some(v) = value {
            self.check(
                v >= min && v <= max,
                format!("{field} must be between {min} and {max}, got {v}"),
            );
        }
    }

    /// The URL-or-inline-markup disjunction: at least one must be present
    /// and non-empty for operations that act on a page.
    pub fn require_target(&mut self, url: &Option<String>, html: &Option<String>) {
        let has_url = url.as_deref().is_some_and(|u| !u.trim().is_empty());
        let has_html = html.as_deref().is_some_and(|h| !h.trim().is_empty());
        self.check(
            has_url || has_html,
            "either a target url or inline html must be provided",
        );
    }

    /// Returns `Ok(())` when nothing was violated, otherwise one
    /// `Validation` error listing every recorded violation.
    pub fn finish(self, context: &str) -> Result<()> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(format!(
                "invalid {context}: {}",
                self.messages.join("; ")
            )))
        }
    }
}
