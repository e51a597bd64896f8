//! End-to-end questionnaire flow driven through key events.

use crossterm::event::KeyCode;
use moodlens_engine::{QUESTION_COUNT, Route, RouteKind, WizardStep};
use wiremock::MockServer;

use crate::common::{
    build_app, complete_questionnaire, mount_success, open_questionnaire, press, settle,
    signed_in_store,
};

#[tokio::test]
async fn questionnaire_reaches_summary_and_returns_home() {
    let server = MockServer::start().await;
    mount_success(&server, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(&server.uri(), Some(signed_in_store(&dir)));
    assert_eq!(app.session().username(), Some("mira"));

    open_questionnaire(&mut app);
    assert_eq!(app.route_kind(), RouteKind::AssessmentForm);

    complete_questionnaire(&mut app, &['n'; QUESTION_COUNT]);
    assert!(app.is_submitting());
    settle(&mut app).await;

    let Route::AssessmentSummary(Some(result)) = app.route() else {
        panic!("expected summary, got {:?}", app.route_kind());
    };
    assert_eq!(result.label, "Stress");
    assert_eq!(result.tips.lines(), vec!["Take short breaks during the day."]);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.route_kind(), RouteKind::Home);
}

#[tokio::test]
async fn escape_abandons_questionnaire_without_request() {
    let server = MockServer::start().await;
    mount_success(&server, 0).await;

    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(&server.uri(), Some(signed_in_store(&dir)));
    open_questionnaire(&mut app);
    complete_questionnaire(&mut app, &['y'; 5]);
    assert_eq!(
        app.form().unwrap().wizard().current_question_index(),
        5
    );

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.route_kind(), RouteKind::Home);

    // A fresh visit starts over.
    open_questionnaire(&mut app);
    assert_eq!(
        app.form().unwrap().wizard().step(),
        &WizardStep::AwaitingBirthDate
    );
    assert_eq!(app.form().unwrap().birth_date_draft(), "");
}

#[tokio::test]
async fn unanswered_question_blocks_progress() {
    let server = MockServer::start().await;
    mount_success(&server, 0).await;

    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(&server.uri(), Some(signed_in_store(&dir)));
    open_questionnaire(&mut app);
    complete_questionnaire(&mut app, &[]);

    press(&mut app, KeyCode::Enter);
    let wizard = app.form().unwrap().wizard();
    assert_eq!(wizard.current_question_index(), 0);
    assert_eq!(
        app.status_message().map(|s| s.text.as_str()),
        Some("Please select an answer before continuing.")
    );
}
