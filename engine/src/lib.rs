//! Application state for MoodLens.
//!
//! `App` owns the current route, the session context and the in-flight
//! submission. It has no terminal dependencies: the TUI reads it to draw and
//! calls its actions in response to keys.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

mod route;
mod submission;

pub use route::{FormScreen, HomeEntry, Route, RouteKind};

// Re-export from crates for public API
pub use moodlens_client::{ASSESSMENT_PATH, AssessmentClient, ClientSettings};
pub use moodlens_config::MoodlensConfig;
pub use moodlens_core::{
    AUTH_TOKEN_KEY, Advance, AssessmentWizard, Resolution, SessionStore, USER_DATA_KEY,
    ValidationError, WizardError, WizardStep,
};
pub use moodlens_types::{
    Answer, AnswerSheet, AssessmentPayload, AssessmentResult, MoodReading, MoodTone,
    QUESTION_COUNT, Question, SessionContext, SubmissionError, Tips, UiOptions,
    sanitize_display_text,
};

use submission::PendingSubmission;

/// Shown when an anonymous user opens a protected screen.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access this feature.";

/// Longest birth date draft accepted, `YYYY-MM-DD`.
const BIRTH_DATE_DRAFT_MAX: usize = 10;

// ============================================================================
// Status line
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Transient message for the status line, cleared by the next user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

// ============================================================================
// Construction
// ============================================================================

/// Everything `App` needs from the outside world.
pub struct AppOptions {
    pub client: AssessmentClient,
    pub session_store: Option<SessionStore>,
    pub ui_options: UiOptions,
}

impl AppOptions {
    /// Build options from the loaded config, falling back to defaults.
    pub fn from_config(config: Option<&MoodlensConfig>) -> anyhow::Result<Self> {
        let defaults = MoodlensConfig::default();
        let config = config.unwrap_or(&defaults);

        let settings = client_settings(config);
        info!(base_url = %settings.base_url, "Using assessment service");
        let client =
            AssessmentClient::new(&settings).context("failed to build the HTTP client")?;

        Ok(Self {
            client,
            session_store: config.session_path().map(SessionStore::new),
            ui_options: config.ui_options(),
        })
    }
}

#[must_use]
pub fn client_settings(config: &MoodlensConfig) -> ClientSettings {
    ClientSettings {
        base_url: config.api_base_url(),
        timeout: config.request_timeout(),
        connect_timeout: config.connect_timeout(),
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    route: Route,
    home_selection: usize,
    session: SessionContext,
    session_store: Option<SessionStore>,
    client: AssessmentClient,
    pending: Option<PendingSubmission>,
    status_message: Option<StatusMessage>,
    ui_options: UiOptions,
    today: fn() -> NaiveDate,
    tick: usize,
    should_quit: bool,
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        let session = options
            .session_store
            .as_ref()
            .map(SessionStore::load_session)
            .unwrap_or_default();
        info!(signed_in = session.is_signed_in(), "Session loaded");

        Self {
            route: Route::Home,
            home_selection: 0,
            session,
            session_store: options.session_store,
            client: options.client,
            pending: None,
            status_message: None,
            ui_options: options.ui_options,
            today: local_today,
            tick: 0,
            should_quit: false,
        }
    }

    /// Replace the clock used to derive the age from the birth date.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn route_kind(&self) -> RouteKind {
        self.route.kind()
    }

    pub fn form(&self) -> Option<&FormScreen> {
        match &self.route {
            Route::AssessmentForm(form) => Some(form),
            _ => None,
        }
    }

    fn form_mut(&mut self) -> Option<&mut FormScreen> {
        match &mut self.route {
            Route::AssessmentForm(form) => Some(form),
            _ => None,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    pub fn home_selection(&self) -> HomeEntry {
        HomeEntry::ALL[self.home_selection % HomeEntry::ALL.len()]
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn tick_count(&self) -> usize {
        self.tick
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn status_message(&self) -> Option<&StatusMessage> {
        self.status_message.as_ref()
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn navigate(&mut self, route: Route) {
        debug!(from = self.route.kind().name(), to = route.kind().name(), "Navigate");
        if self.pending.take().is_some() {
            info!("Left the form with a submission in flight; its outcome will be discarded");
        }
        self.route = route;
    }

    // ------------------------------------------------------------------------
    // Home
    // ------------------------------------------------------------------------

    pub fn home_select_next(&mut self) {
        self.clear_status();
        self.home_selection = (self.home_selection + 1) % HomeEntry::ALL.len();
    }

    pub fn home_select_prev(&mut self) {
        self.clear_status();
        self.home_selection =
            (self.home_selection + HomeEntry::ALL.len() - 1) % HomeEntry::ALL.len();
    }

    pub fn open_selected(&mut self) {
        self.open(self.home_selection());
    }

    pub fn open(&mut self, entry: HomeEntry) {
        self.clear_status();
        if entry.is_protected() && !self.session.is_signed_in() {
            info!(entry = entry.title(), "Protected entry opened without a session");
            self.set_status(StatusKind::Error, LOGIN_REQUIRED_MESSAGE);
            self.navigate(Route::LoginRequired);
            return;
        }
        match entry {
            HomeEntry::MoodCheckIn => self.navigate(Route::MoodResult(None)),
            HomeEntry::SelfAssessment => self.navigate(Route::SelfAssessmentLanding),
        }
    }

    /// Re-read the session store.
    pub fn refresh_session(&mut self) {
        self.clear_status();
        self.session = self
            .session_store
            .as_ref()
            .map(SessionStore::load_session)
            .unwrap_or_default();
        match self.session.username() {
            Some(username) => {
                let text = format!("Signed in as {username}");
                self.set_status(StatusKind::Info, text);
            }
            None => self.set_status(StatusKind::Info, "Not signed in"),
        }
    }

    pub fn go_home(&mut self) {
        self.clear_status();
        self.navigate(Route::Home);
    }

    /// Open the summary with whatever result the caller has, if any.
    pub fn show_summary(&mut self, result: Option<AssessmentResult>) {
        self.navigate(Route::AssessmentSummary(result));
    }

    /// Open the mood result view with a reading handed over by the capture flow.
    pub fn show_mood_result(&mut self, reading: Option<MoodReading>) {
        self.navigate(Route::MoodResult(reading));
    }

    // ------------------------------------------------------------------------
    // Landing screens
    // ------------------------------------------------------------------------

    pub fn continue_from_landing(&mut self) {
        self.clear_status();
        if matches!(self.route, Route::SelfAssessmentLanding) {
            self.navigate(Route::AssessmentStart);
        }
    }

    pub fn start_assessment(&mut self) {
        self.clear_status();
        if matches!(self.route, Route::AssessmentStart) {
            self.navigate(Route::AssessmentForm(Box::default()));
        }
    }

    // ------------------------------------------------------------------------
    // Questionnaire
    // ------------------------------------------------------------------------

    fn awaiting_birth_date(&mut self) -> Option<&mut FormScreen> {
        self.form_mut()
            .filter(|form| matches!(form.wizard().step(), WizardStep::AwaitingBirthDate))
    }

    /// Append to the birth date draft. Only digits and `-` are accepted.
    pub fn push_birth_date_char(&mut self, c: char) {
        self.clear_status();
        if !(c.is_ascii_digit() || c == '-') {
            return;
        }
        if let Some(form) = self.awaiting_birth_date()
            && form.birth_date_draft().len() < BIRTH_DATE_DRAFT_MAX
        {
            form.draft_mut().push(c);
        }
    }

    pub fn pop_birth_date_char(&mut self) {
        self.clear_status();
        if let Some(form) = self.awaiting_birth_date() {
            form.draft_mut().pop();
        }
    }

    /// Parse the draft and move on to the first question.
    pub fn submit_birth_date(&mut self) {
        self.clear_status();
        let today = (self.today)();
        let Some(form) = self.form_mut() else {
            return;
        };
        let draft = form.birth_date_draft().to_string();
        let wizard = form.wizard_mut();
        let outcome = wizard
            .enter_birth_date(&draft)
            .and_then(|()| wizard.submit_birth_date(today));
        match outcome {
            Ok(age) => debug!(age, "Questionnaire started"),
            Err(err) => self.report_wizard_error(&err),
        }
    }

    pub fn select_answer(&mut self, answer: Answer) {
        self.clear_status();
        let Some(form) = self.form_mut() else {
            return;
        };
        if let Err(err) = form.wizard_mut().select_answer(answer) {
            self.report_wizard_error(&err);
        }
    }

    /// Record the selected answer. On the last question this starts the
    /// submission.
    pub fn advance(&mut self) {
        self.clear_status();
        let Some(form) = self.form_mut() else {
            return;
        };
        match form.wizard_mut().advance() {
            Ok(Advance::NextQuestion { index }) => debug!(index, "Next question"),
            Ok(Advance::Submit(payload)) => {
                info!(endpoint = self.client.endpoint(), "Submitting assessment");
                self.pending = Some(PendingSubmission::spawn(self.client.clone(), payload));
            }
            Err(err) => self.report_wizard_error(&err),
        }
    }

    fn report_wizard_error(&mut self, err: &WizardError) {
        match err {
            WizardError::Validation(validation) => {
                self.set_status(StatusKind::Error, validation.to_string());
            }
            WizardError::SubmissionInFlight => debug!("Ignoring input while submitting"),
            WizardError::WrongStep { .. } | WizardError::Sheet(_) => {
                warn!("Wizard refused action: {err}");
            }
        }
    }

    // ------------------------------------------------------------------------
    // Frame tick
    // ------------------------------------------------------------------------

    /// Advance per-frame state: collect a finished submission, if any.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        let Some(outcome) = self.pending.as_mut().and_then(PendingSubmission::poll) else {
            return;
        };
        self.pending = None;

        let Some(form) = self.form_mut() else {
            warn!("Submission finished outside the form; discarding");
            return;
        };
        match form.wizard_mut().resolve(outcome) {
            Ok(Resolution::Completed(result)) => {
                info!(label = %result.label, "Assessment complete");
                self.navigate(Route::AssessmentSummary(Some(result)));
            }
            Ok(Resolution::Retry(_)) => {
                self.set_status(StatusKind::Error, SubmissionError::USER_MESSAGE);
            }
            Err(err) => warn!("Could not resolve submission: {err}"),
        }
    }
}
