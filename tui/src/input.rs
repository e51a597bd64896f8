//! Input handling for the MoodLens TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use moodlens_engine::{Answer, App, RouteKind, WizardStep};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking task and hands them to the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(&stop2, &tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so a blocked send on the input thread returns.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: &AtomicBool, tx: &mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain queued input into `app`. Returns `true` when the app should exit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply one terminal event. Returns `true` when the app should exit.
pub fn apply_event(app: &mut App, event: Event) -> bool {
    let Event::Key(key) = event else {
        return app.should_quit();
    };
    // Handle press + repeat events (ignore releases)
    if matches!(key.kind, KeyEventKind::Release) {
        return app.should_quit();
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        debug!("Ctrl+C");
        app.request_quit();
        return true;
    }

    match app.route_kind() {
        RouteKind::Home => handle_home(app, key),
        RouteKind::SelfAssessmentLanding => match key.code {
            KeyCode::Enter => app.continue_from_landing(),
            KeyCode::Esc => app.go_home(),
            _ => {}
        },
        RouteKind::AssessmentStart => match key.code {
            KeyCode::Enter => app.start_assessment(),
            KeyCode::Esc => app.go_home(),
            _ => {}
        },
        RouteKind::AssessmentForm => handle_form(app, key),
        RouteKind::AssessmentSummary | RouteKind::MoodResult | RouteKind::LoginRequired => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                app.go_home();
            }
        }
    }
    app.should_quit()
}

fn handle_home(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Char('k') | KeyCode::Up => app.home_select_prev(),
        KeyCode::Char('j') | KeyCode::Down => app.home_select_next(),
        KeyCode::Char('r') => app.refresh_session(),
        KeyCode::Enter => app.open_selected(),
        _ => {}
    }
}

fn handle_form(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.go_home();
        return;
    }

    let Some(step) = app.form().map(|form| form.wizard().step().clone()) else {
        return;
    };
    match step {
        WizardStep::AwaitingBirthDate => match key.code {
            KeyCode::Char(c) => app.push_birth_date_char(c),
            KeyCode::Backspace => app.pop_birth_date_char(),
            KeyCode::Enter => app.submit_birth_date(),
            _ => {}
        },
        WizardStep::AwaitingAnswer => match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Left => app.select_answer(Answer::Yes),
            KeyCode::Char('n' | 'N') | KeyCode::Right => app.select_answer(Answer::No),
            KeyCode::Enter => app.advance(),
            _ => {}
        },
        WizardStep::Submitting | WizardStep::Complete(_) => {}
    }
}
