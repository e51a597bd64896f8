//! A failed submission keeps the answers and allows another attempt.

use crossterm::event::KeyCode;
use moodlens_engine::{Answer, QUESTION_COUNT, RouteKind, SubmissionError, WizardStep};
use wiremock::MockServer;

use crate::common::{
    build_app, complete_questionnaire, mount_failure_once, mount_success, open_questionnaire,
    press, settle, signed_in_store,
};

#[tokio::test]
async fn retry_after_server_error_sends_one_new_request() {
    let server = MockServer::start().await;
    mount_failure_once(&server, 503).await;
    mount_success(&server, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(&server.uri(), Some(signed_in_store(&dir)));
    open_questionnaire(&mut app);
    complete_questionnaire(&mut app, &['y'; QUESTION_COUNT]);
    settle(&mut app).await;

    assert_eq!(app.route_kind(), RouteKind::AssessmentForm);
    assert_eq!(
        app.status_message().map(|s| s.text.as_str()),
        Some(SubmissionError::USER_MESSAGE)
    );
    {
        let wizard = app.form().unwrap().wizard();
        assert_eq!(wizard.step(), &WizardStep::AwaitingAnswer);
        assert!(wizard.is_last_question());
        assert_eq!(wizard.selected_answer(), Some(Answer::Yes));
        assert_eq!(wizard.answers().unwrap().answer_count(), QUESTION_COUNT + 1);
    }

    // Change the final answer and try again.
    press(&mut app, KeyCode::Char('n'));
    press(&mut app, KeyCode::Enter);
    assert!(app.is_submitting());
    settle(&mut app).await;

    assert_eq!(app.route_kind(), RouteKind::AssessmentSummary);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let first: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(first["increased_energy"], 1);
    assert_eq!(second["increased_energy"], 0);
    assert_eq!(second.as_object().unwrap().len(), QUESTION_COUNT + 1);
}

#[tokio::test]
async fn unreachable_service_is_reported_and_retryable() {
    // Nothing listens on the discard port.
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app("http://127.0.0.1:9", Some(signed_in_store(&dir)));
    open_questionnaire(&mut app);
    complete_questionnaire(&mut app, &['n'; QUESTION_COUNT]);
    settle(&mut app).await;

    assert_eq!(app.route_kind(), RouteKind::AssessmentForm);
    assert_eq!(
        app.status_message().map(|s| s.text.as_str()),
        Some(SubmissionError::USER_MESSAGE)
    );
    assert!(!app.is_submitting());
}
