//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests: a mock scoring service, a
//! signed-in session store and helpers that drive the app through key events.

#![allow(dead_code)]

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use moodlens_engine::{
    ASSESSMENT_PATH, AUTH_TOKEN_KEY, App, AppOptions, AssessmentClient, ClientSettings,
    HomeEntry, RouteKind, SessionStore, USER_DATA_KEY, UiOptions,
};
use moodlens_tui::apply_event;
use moodlens_types::NaiveDate;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Birth date typed by the helpers; the fixed clock makes the user 24.
pub const BIRTH_DATE: &str = "2000-01-31";
pub const EXPECTED_AGE: i64 = 24;

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// A successful scoring response.
pub fn success_body() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "assessment_result": {
            "label": "Stress",
            "description": "Several stress indicators were reported.",
            "confidence_percent": 64.2,
            "tips": "Take short breaks during the day."
        }
    })
}

/// Mount a 200 response at the assessment endpoint, expected `times` times.
pub async fn mount_success(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path(ASSESSMENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(times)
        .mount(server)
        .await;
}

/// Mount a single failing response ahead of any later mocks.
pub async fn mount_failure_once(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(ASSESSMENT_PATH))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_json(serde_json::json!({ "success": false, "error": "model offline" })),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;
}

pub fn signed_in_store(dir: &tempfile::TempDir) -> SessionStore {
    let store = SessionStore::new(dir.path().join("session.json"));
    store.set(AUTH_TOKEN_KEY, "token-abc").unwrap();
    store
        .set(
            USER_DATA_KEY,
            r#"{"username":"mira","email":"mira@example.com"}"#,
        )
        .unwrap();
    store
}

pub fn build_app(base_url: &str, store: Option<SessionStore>) -> App {
    let client = AssessmentClient::new(&ClientSettings::new(base_url)).unwrap();
    App::new(AppOptions {
        client,
        session_store: store,
        ui_options: UiOptions::default(),
    })
    .with_today(fixed_today)
}

pub fn press(app: &mut App, code: KeyCode) {
    apply_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// From the home screen, open Self Assessment and reach the birth date step.
pub fn open_questionnaire(app: &mut App) {
    assert_eq!(app.route_kind(), RouteKind::Home);
    while app.home_selection() != HomeEntry::SelfAssessment {
        press(app, KeyCode::Down);
    }
    for _ in 0..3 {
        press(app, KeyCode::Enter);
    }
}

/// Enter the birth date and answer every question, one key per answer.
pub fn complete_questionnaire(app: &mut App, answers: &[char]) {
    type_text(app, BIRTH_DATE);
    press(app, KeyCode::Enter);
    for answer in answers {
        press(app, KeyCode::Char(*answer));
        press(app, KeyCode::Enter);
    }
}

/// Tick until no submission is in flight.
pub async fn settle(app: &mut App) {
    for _ in 0..500 {
        app.tick();
        if !app.is_submitting() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("submission did not settle");
}
