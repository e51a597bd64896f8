//! Protected routes and the stored session.

use crossterm::event::KeyCode;
use moodlens_engine::{
    AUTH_TOKEN_KEY, LOGIN_REQUIRED_MESSAGE, RouteKind, SessionStore, USER_DATA_KEY,
};

use crate::common::{build_app, open_questionnaire, press, signed_in_store};

#[test]
fn anonymous_user_is_redirected_to_login() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    let mut app = build_app("http://127.0.0.1:9", Some(store));

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.route_kind(), RouteKind::LoginRequired);
    assert_eq!(
        app.status_message().map(|s| s.text.as_str()),
        Some(LOGIN_REQUIRED_MESSAGE)
    );

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.route_kind(), RouteKind::Home);
}

#[test]
fn corrupt_user_data_clears_stored_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    store.set(AUTH_TOKEN_KEY, "token-abc").unwrap();
    store.set(USER_DATA_KEY, "{not json").unwrap();

    let mut app = build_app("http://127.0.0.1:9", Some(store.clone()));
    assert_eq!(app.session().username(), None);
    assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(USER_DATA_KEY).unwrap(), None);

    open_questionnaire(&mut app);
    assert_eq!(app.route_kind(), RouteKind::LoginRequired);
}

#[test]
fn login_picked_up_on_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    let mut app = build_app("http://127.0.0.1:9", Some(store));
    assert_eq!(app.session().username(), None);

    // Another process signs the user in.
    signed_in_store(&dir);
    press(&mut app, KeyCode::Char('r'));
    assert_eq!(app.session().username(), Some("mira"));

    open_questionnaire(&mut app);
    assert_eq!(app.route_kind(), RouteKind::AssessmentForm);
}

#[test]
fn quit_key_only_applies_on_home() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app("http://127.0.0.1:9", Some(signed_in_store(&dir)));
    open_questionnaire(&mut app);
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit());

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());
}
