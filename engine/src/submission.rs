//! The in-flight assessment request.

use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::debug;

use moodlens_client::AssessmentClient;
use moodlens_types::{AssessmentPayload, AssessmentResult, SubmissionError};

type Outcome = Result<AssessmentResult, SubmissionError>;

/// A submission running on its own task. Dropping this discards the outcome.
#[derive(Debug)]
pub(crate) struct PendingSubmission {
    receiver: oneshot::Receiver<Outcome>,
}

impl PendingSubmission {
    pub(crate) fn spawn(client: AssessmentClient, payload: AssessmentPayload) -> Self {
        let (tx, receiver) = oneshot::channel();
        tokio::spawn(async move {
            let outcome = client.submit(&payload).await;
            if tx.send(outcome).is_err() {
                debug!("Assessment outcome discarded: form was closed");
            }
        });
        Self { receiver }
    }

    /// Non-blocking check for the outcome.
    pub(crate) fn poll(&mut self) -> Option<Outcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(SubmissionError::Network(
                "submission task ended without a result".to_string(),
            ))),
        }
    }
}
