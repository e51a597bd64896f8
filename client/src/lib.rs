//! Client for the assessment scoring service.
//!
//! One call: `POST {base_url}/api/self-assessment` with the payload as JSON.
//! The service answers `{"success": true, "assessment_result": {...}}` or
//! `{"success": false, "message": "..."}`. Every way that can go wrong is
//! folded into [`SubmissionError`], so callers branch on a typed result
//! instead of inspecting the body.
//!
//! # Failure mapping
//!
//! | Condition | Error |
//! |-----------|-------|
//! | connect/timeout/transport failure | `Network` |
//! | `success: false` | `Rejected` |
//! | non-2xx with no readable failure body | `Status` |
//! | unparsable body, missing flag or missing result | `Malformed` |

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use moodlens_types::{AssessmentPayload, AssessmentResult, SubmissionError};

pub use moodlens_types;

/// Path of the scoring endpoint, relative to the base URL.
pub const ASSESSMENT_PATH: &str = "/api/self-assessment";

const TCP_KEEPALIVE_SECS: u64 = 60;
const MAX_RESPONSE_BYTES: usize = 1024 * 1024;
const MAX_ERROR_BODY_BYTES: usize = 4 * 1024;

/// Connection settings for [`AssessmentClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssessmentClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AssessmentClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint_url(&settings.base_url),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit a completed questionnaire and return the scored result.
    pub async fn submit(
        &self,
        payload: &AssessmentPayload,
    ) -> Result<AssessmentResult, SubmissionError> {
        debug!(endpoint = %self.endpoint, age = payload.age(), "Submitting assessment");

        let response = self
            .http
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!("Assessment request failed: {e}");
                SubmissionError::Network(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = read_capped_body(response, MAX_RESPONSE_BYTES).await?;
        interpret_response(status, &body)
    }
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}{ASSESSMENT_PATH}", base_url.trim().trim_end_matches('/'))
}

async fn read_capped_body(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<String, SubmissionError> {
    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| SubmissionError::Network(e.to_string()))?
    {
        body.extend_from_slice(&chunk);
        if body.len() > limit {
            return Err(SubmissionError::Malformed(format!(
                "response body exceeds {limit} bytes"
            )));
        }
    }
    String::from_utf8(body).map_err(|_| SubmissionError::Malformed("response is not UTF-8".into()))
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    success: Option<bool>,
    assessment_result: Option<AssessmentResult>,
    message: Option<String>,
    error: Option<String>,
}

/// Map an HTTP status and body to the typed outcome.
pub fn interpret_response(status: u16, body: &str) -> Result<AssessmentResult, SubmissionError> {
    let ok_status = (200..300).contains(&status);

    let wire: WireResponse = match serde_json::from_str(body) {
        Ok(wire) => wire,
        Err(e) if ok_status => {
            return Err(SubmissionError::Malformed(e.to_string()));
        }
        Err(_) => {
            return Err(SubmissionError::Status {
                status,
                body: truncate_body(body),
            });
        }
    };

    match wire.success {
        Some(true) => wire.assessment_result.ok_or_else(|| {
            SubmissionError::Malformed("success response without assessment_result".into())
        }),
        Some(false) => Err(SubmissionError::Rejected {
            message: wire.message.or(wire.error),
        }),
        None if ok_status => Err(SubmissionError::Malformed(
            "response has no success flag".into(),
        )),
        None => Err(SubmissionError::Status {
            status,
            body: truncate_body(body),
        }),
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...(truncated)", &body[..end])
}
