//! Screens of the client and the state each one carries.

use moodlens_core::AssessmentWizard;
use moodlens_types::{AssessmentResult, MoodReading};

/// Entries of the home menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEntry {
    MoodCheckIn,
    SelfAssessment,
}

impl HomeEntry {
    pub const ALL: [HomeEntry; 2] = [HomeEntry::MoodCheckIn, HomeEntry::SelfAssessment];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            HomeEntry::MoodCheckIn => "Mood Check-In",
            HomeEntry::SelfAssessment => "Self Assessment",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            HomeEntry::MoodCheckIn => "See the mood detected from your latest photo",
            HomeEntry::SelfAssessment => "Answer a short questionnaire about how you feel",
        }
    }

    /// Both entries require a signed-in session.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        match self {
            HomeEntry::MoodCheckIn | HomeEntry::SelfAssessment => true,
        }
    }
}

/// The questionnaire screen: the wizard plus the text being typed for the
/// birth date.
#[derive(Debug, Clone, Default)]
pub struct FormScreen {
    wizard: AssessmentWizard,
    birth_date_draft: String,
}

impl FormScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn wizard(&self) -> &AssessmentWizard {
        &self.wizard
    }

    pub(crate) fn wizard_mut(&mut self) -> &mut AssessmentWizard {
        &mut self.wizard
    }

    #[must_use]
    pub fn birth_date_draft(&self) -> &str {
        &self.birth_date_draft
    }

    pub(crate) fn draft_mut(&mut self) -> &mut String {
        &mut self.birth_date_draft
    }
}

#[derive(Debug, Clone)]
pub enum Route {
    Home,
    SelfAssessmentLanding,
    AssessmentStart,
    AssessmentForm(Box<FormScreen>),
    /// `None` when the summary was reached without a result.
    AssessmentSummary(Option<AssessmentResult>),
    /// `None` when no reading was handed over.
    MoodResult(Option<MoodReading>),
    LoginRequired,
}

/// Data-free mirror of [`Route`] for matching in the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Home,
    SelfAssessmentLanding,
    AssessmentStart,
    AssessmentForm,
    AssessmentSummary,
    MoodResult,
    LoginRequired,
}

impl Route {
    #[must_use]
    pub fn kind(&self) -> RouteKind {
        match self {
            Route::Home => RouteKind::Home,
            Route::SelfAssessmentLanding => RouteKind::SelfAssessmentLanding,
            Route::AssessmentStart => RouteKind::AssessmentStart,
            Route::AssessmentForm(_) => RouteKind::AssessmentForm,
            Route::AssessmentSummary(_) => RouteKind::AssessmentSummary,
            Route::MoodResult(_) => RouteKind::MoodResult,
            Route::LoginRequired => RouteKind::LoginRequired,
        }
    }
}

impl RouteKind {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            RouteKind::Home => "home",
            RouteKind::SelfAssessmentLanding => "self-assessment",
            RouteKind::AssessmentStart => "assessment-start",
            RouteKind::AssessmentForm => "assessment-form",
            RouteKind::AssessmentSummary => "assessment-summary",
            RouteKind::MoodResult => "mood-result",
            RouteKind::LoginRequired => "login",
        }
    }
}
