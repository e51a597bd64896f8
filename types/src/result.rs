//! Scoring results and the typed submission outcome.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Advice attached to a result. The service sends either one paragraph or a
/// list of short tips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tips {
    Text(String),
    List(Vec<String>),
}

impl Tips {
    /// Individual tip lines, skipping blanks.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Tips::Text(text) => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect(),
            Tips::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .collect(),
        }
    }
}

impl Default for Tips {
    fn default() -> Self {
        Tips::Text(String::new())
    }
}

/// The scored outcome returned by the assessment service.
///
/// Opaque to the client: it is only carried to the summary view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub label: String,
    pub description: String,
    pub confidence_percent: f64,
    #[serde(default)]
    pub tips: Tips,
}

/// Why a submission did not produce a result.
///
/// Every variant is recoverable; the user is asked to try again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("could not reach the assessment service: {0}")]
    Network(String),
    #[error("assessment service returned HTTP {status}")]
    Status { status: u16, body: String },
    #[error("assessment service sent an unreadable response: {0}")]
    Malformed(String),
    #[error("assessment service declined the submission{}", message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected { message: Option<String> },
}

impl SubmissionError {
    /// The message shown to the user for any failure.
    pub const USER_MESSAGE: &'static str = "Something went wrong, please try again.";
}
