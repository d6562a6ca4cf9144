//! Domain types shared by the check engine and its front ends.
//!
//! An [`Outcome`] records a single attempt against one endpoint. A
//! [`RunResult`] holds the final outcome per endpoint for one full pass,
//! ordered successes-first, together with its summary counts.

use serde::{Deserialize, Serialize};

/// Error message recorded when a URL has neither `http://` nor `https://`.
pub const INVALID_PROTOCOL: &str = "Invalid URL protocol";

/// Error message recorded when no response arrives within the timeout.
pub const TIMEOUT: &str = "Timeout";

/// Error message recorded for an endpoint whose check never settled.
pub const UNKNOWN: &str = "unknown";

// ── Outcome ────────────────────────────────────────────────────────

/// Result of checking one endpoint at one attempt.
///
/// A successful outcome carries a status code and no error. A failed
/// outcome carries either the status code of a non-2xx response or an
/// error message when no response was received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    pub url: String,
    pub success: bool,
    #[serde(rename = "status", default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Wall time of this attempt in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: u64,
}

impl Outcome {
    /// Outcome for a received response. Success iff the status is 2xx.
    pub fn from_status(url: impl Into<String>, status: u16, duration_ms: u64) -> Self {
        Self {
            url: url.into(),
            success: (200..300).contains(&status),
            status_code: Some(status),
            error_message: None,
            duration_ms,
        }
    }

    /// Failed outcome where no response was received.
    pub fn from_error(
        url: impl Into<String>,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            url: url.into(),
            success: false,
            status_code: None,
            error_message: Some(error.into()),
            duration_ms,
        }
    }

    /// Placeholder for a check that failed internally and never settled.
    pub fn unsettled(url: impl Into<String>) -> Self {
        Self::from_error(url, UNKNOWN, 0)
    }

    /// The failure explanation, if any: the error text or the status code.
    pub fn detail(&self) -> Option<String> {
        match (&self.error_message, self.status_code) {
            (Some(err), _) => Some(err.clone()),
            (None, Some(status)) => Some(status.to_string()),
            (None, None) => None,
        }
    }
}

// ── RunResult ──────────────────────────────────────────────────────

/// Final outcomes for one full pass over the endpoint list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    outcomes: Vec<Outcome>,
    healthy_count: usize,
}

impl RunResult {
    /// Build a result from already-ordered outcomes.
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        let healthy_count = outcomes.iter().filter(|o| o.success).count();
        Self {
            outcomes,
            healthy_count,
        }
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<Outcome> {
        self.outcomes
    }

    /// Number of outcomes with `success = true`.
    pub fn healthy_count(&self) -> usize {
        self.healthy_count
    }

    /// Number of endpoints checked.
    pub fn total_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether every endpoint passed.
    pub fn all_healthy(&self) -> bool {
        self.healthy_count == self.outcomes.len()
    }
}
