use ratatui::{Terminal, backend::TestBackend};

use moodlens_engine::{
    AUTH_TOKEN_KEY, Answer, AppOptions, AssessmentClient, AssessmentResult, ClientSettings,
    HomeEntry, MoodReading, SessionStore, Tips, USER_DATA_KEY, UiOptions,
};

use super::*;
use crate::screens::progress_bar;

fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn app(dir: &tempfile::TempDir, signed_in: bool, ui_options: UiOptions) -> App {
    let store = SessionStore::new(dir.path().join("session.json"));
    if signed_in {
        store.set(AUTH_TOKEN_KEY, "tok").unwrap();
        store
            .set(USER_DATA_KEY, r#"{"username":"ana","email":"ana@example.com"}"#)
            .unwrap();
    }
    let client = AssessmentClient::new(&ClientSettings::new("http://127.0.0.1:9")).unwrap();
    App::new(AppOptions {
        client,
        session_store: Some(store),
        ui_options,
    })
}

fn result(tips: Tips) -> AssessmentResult {
    AssessmentResult {
        label: "Anxiety".into(),
        description: "Several anxiety indicators were reported.".into(),
        confidence_percent: 78.4,
        tips,
    }
}

#[test]
fn home_welcomes_signed_in_user() {
    let dir = tempfile::tempdir().unwrap();
    let screen = render(&app(&dir, true, UiOptions::default()));
    assert!(screen.contains("Welcome back, ana!"));
    assert!(screen.contains("Mood Check-In"));
    assert!(screen.contains("Self Assessment"));
    assert!(screen.contains("Signed in as ana"));
}

#[test]
fn home_for_anonymous_user_has_no_welcome() {
    let dir = tempfile::tempdir().unwrap();
    let screen = render(&app(&dir, false, UiOptions::default()));
    assert!(!screen.contains("Welcome back"));
    assert!(screen.contains("Not signed in"));
}

#[test]
fn login_required_shows_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir, false, UiOptions::default());
    app.open(HomeEntry::SelfAssessment);
    let screen = render(&app);
    assert!(screen.contains("Please log in to access this feature."));
}

#[test]
fn landing_and_start_screens() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir, true, UiOptions::default());
    app.open(HomeEntry::SelfAssessment);
    let screen = render(&app);
    assert!(screen.contains("Stop guessing."));
    assert!(screen.contains("Aristotle"));

    app.continue_from_landing();
    assert!(render(&app).contains("How are you feeling today?"));
}

#[test]
fn birth_date_step_shows_placeholder_then_draft() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir, true, UiOptions::default());
    app.open(HomeEntry::SelfAssessment);
    app.continue_from_landing();
    app.start_assessment();
    assert!(render(&app).contains("YYYY-MM-DD"));

    for c in "1995-04".chars() {
        app.push_birth_date_char(c);
    }
    let screen = render(&app);
    assert!(screen.contains("Birth date: 1995-04"));
}

#[test]
fn question_step_shows_progress_and_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir, true, UiOptions::default());
    app.open(HomeEntry::SelfAssessment);
    app.continue_from_landing();
    app.start_assessment();
    for c in "1995-04-10".chars() {
        app.push_birth_date_char(c);
    }
    app.submit_birth_date();

    let screen = render(&app);
    assert!(screen.contains("Question 1 of 19"));
    assert!(screen.contains("Do you often feel panicked?"));
    assert!(screen.contains("Next"));

    app.select_answer(Answer::Yes);
    app.advance();
    let screen = render(&app);
    assert!(screen.contains("Question 2 of 19"));
}

#[test]
fn summary_without_result_shows_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir, true, UiOptions::default());
    app.show_summary(None);
    let screen = render(&app);
    assert!(screen.contains("No assessment data found"));
}

#[test]
fn summary_with_result_shows_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir, true, UiOptions::default());
    app.show_summary(Some(result(Tips::List(vec![
        "Breathe slowly".into(),
        "Talk to someone".into(),
    ]))));
    let screen = render(&app);
    assert!(screen.contains("Result: Anxiety"));
    assert!(screen.contains("Several anxiety indicators were reported."));
    assert!(screen.contains("Confidence: 78.4%"));
    assert!(screen.contains("• Breathe slowly"));
    assert!(screen.contains("• Talk to someone"));
}

#[test]
fn summary_strips_control_sequences() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir, true, UiOptions::default());
    let mut hostile = result(Tips::Text("Rest.".into()));
    hostile.label = "Calm\u{1b}[2J".into();
    app.show_summary(Some(hostile));
    let screen = render(&app);
    assert!(screen.contains("Result: Calm"));
    assert!(!screen.contains('\u{1b}'));
}

#[test]
fn mood_result_without_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir, true, UiOptions::default());
    app.open(HomeEntry::MoodCheckIn);
    let screen = render(&app);
    assert!(screen.contains("No mood data available."));
    assert!(screen.contains("No image captured or loaded."));
}

#[test]
fn mood_result_with_reading() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir, true, UiOptions::default());
    app.show_mood_result(Some(MoodReading {
        mood: "happy".into(),
        confidence: Some(0.8765),
        captured_image_url: Some("file:///tmp/capture.png".into()),
    }));
    let screen = render(&app);
    assert!(screen.contains("HAPPY"));
    assert!(screen.contains("87.65%"));
    assert!(screen.contains("file:///tmp/capture.png"));
}

#[test]
fn mood_result_without_mood_shows_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir, true, UiOptions::default());
    app.show_mood_result(Some(MoodReading {
        mood: String::new(),
        confidence: Some(0.5),
        captured_image_url: None,
    }));
    let screen = render(&app);
    assert!(screen.contains("Unknown"));
    assert!(screen.contains("Confidence: 50.00%"));
    assert!(screen.contains("No image captured or loaded."));
}

#[test]
fn ascii_mode_renders_ascii_markers() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(
        &dir,
        true,
        UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        },
    );
    let screen = render(&app);
    assert!(screen.contains("> Mood Check-In"));
    assert!(!screen.contains('▸'));
}

#[test]
fn validation_error_appears_on_status_line() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir, true, UiOptions::default());
    app.open(HomeEntry::SelfAssessment);
    app.continue_from_landing();
    app.start_assessment();
    app.submit_birth_date();
    assert!(render(&app).contains("Please select your birth date."));
}

#[test]
fn progress_bar_fills_proportionally() {
    let glyphs = glyphs(UiOptions {
        ascii_only: true,
        ..UiOptions::default()
    });
    assert_eq!(progress_bar(0.0, 4, &glyphs), "----");
    assert_eq!(progress_bar(0.5, 4, &glyphs), "##--");
    assert_eq!(progress_bar(1.0, 4, &glyphs), "####");
    assert_eq!(progress_bar(2.0, 4, &glyphs), "####");
}
