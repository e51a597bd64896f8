//! Self-assessment wizard state machine.
//!
//! ```text
//! AwaitingBirthDate --submit_birth_date--> AwaitingAnswer
//! AwaitingAnswer --advance (not last)--> AwaitingAnswer
//! AwaitingAnswer --advance (last)--> Submitting
//! Submitting --resolve(Ok)--> Complete
//! Submitting --resolve(Err)--> AwaitingAnswer (last question, answers kept)
//! ```
//!
//! The wizard performs no IO. `advance` hands the payload back to the caller,
//! which issues the request and reports the outcome through `resolve`. While a
//! request is outstanding every input action is refused, so at most one
//! submission exists per completed sheet.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use moodlens_types::{
    Answer, AnswerSheet, AnswerSheetError, AssessmentPayload, AssessmentResult,
    BirthDateParseError, LAST_QUESTION_INDEX, QUESTION_COUNT, Question, SubmissionError, age_on,
    catalog, parse_birth_date,
};

/// Where the wizard is in the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    AwaitingBirthDate,
    AwaitingAnswer,
    Submitting,
    Complete(AssessmentResult),
}

impl WizardStep {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            WizardStep::AwaitingBirthDate => "awaiting birth date",
            WizardStep::AwaitingAnswer => "awaiting answer",
            WizardStep::Submitting => "submitting",
            WizardStep::Complete(_) => "complete",
        }
    }
}

/// Missing or unusable user input. The transition is blocked and nothing changes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select your birth date.")]
    MissingBirthDate,
    #[error("Please enter your birth date as YYYY-MM-DD.")]
    MalformedBirthDate(#[from] BirthDateParseError),
    #[error("Please select an answer before continuing.")]
    MissingAnswer,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("cannot {action} while {step}")]
    WrongStep {
        action: &'static str,
        step: &'static str,
    },
    #[error("a submission is already in progress")]
    SubmissionInFlight,
    #[error(transparent)]
    Sheet(#[from] AnswerSheetError),
}

/// Result of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at `index`.
    NextQuestion { index: usize },
    /// The sheet is complete; send this payload and report back via `resolve`.
    Submit(AssessmentPayload),
}

/// Result of resolving an outstanding submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Completed(AssessmentResult),
    /// Back on the last question with every answer kept.
    Retry(SubmissionError),
}

#[derive(Debug, Clone)]
pub struct AssessmentWizard {
    step: WizardStep,
    birth_date: Option<NaiveDate>,
    current_question: usize,
    answers: Option<AnswerSheet>,
    selected: Option<Answer>,
}

impl Default for AssessmentWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentWizard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: WizardStep::AwaitingBirthDate,
            birth_date: None,
            current_question: 0,
            answers: None,
            selected: None,
        }
    }

    #[must_use]
    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    #[must_use]
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.current_question
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&'static Question> {
        match self.step {
            WizardStep::AwaitingAnswer | WizardStep::Submitting => {
                catalog::question(self.current_question)
            }
            WizardStep::AwaitingBirthDate | WizardStep::Complete(_) => None,
        }
    }

    #[must_use]
    pub fn answers(&self) -> Option<&AnswerSheet> {
        self.answers.as_ref()
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<Answer> {
        self.selected
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.step, WizardStep::Submitting)
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_question == LAST_QUESTION_INDEX
    }

    /// Fraction of questions reached, `(index + 1) / 19`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.current_question + 1) as f64 / QUESTION_COUNT as f64
    }

    /// Label of the continue action on the current question.
    #[must_use]
    pub fn continue_label(&self) -> &'static str {
        if self.is_last_question() {
            "Finish"
        } else {
            "Next"
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&AssessmentResult> {
        match &self.step {
            WizardStep::Complete(result) => Some(result),
            _ => None,
        }
    }

    fn require(&self, action: &'static str, expected: &WizardStep) -> Result<(), WizardError> {
        if self.is_submitting() {
            return Err(WizardError::SubmissionInFlight);
        }
        if std::mem::discriminant(&self.step) != std::mem::discriminant(expected) {
            return Err(WizardError::WrongStep {
                action,
                step: self.step.name(),
            });
        }
        Ok(())
    }

    pub fn set_birth_date(&mut self, birth_date: Option<NaiveDate>) -> Result<(), WizardError> {
        self.require("set the birth date", &WizardStep::AwaitingBirthDate)?;
        self.birth_date = birth_date;
        Ok(())
    }

    /// Parse a `YYYY-MM-DD` draft into the birth date.
    ///
    /// A blank draft clears the date. An unparsable draft leaves the previous
    /// value untouched.
    pub fn enter_birth_date(&mut self, raw: &str) -> Result<(), WizardError> {
        self.require("set the birth date", &WizardStep::AwaitingBirthDate)?;
        if raw.trim().is_empty() {
            self.birth_date = None;
            return Ok(());
        }
        let parsed = parse_birth_date(raw).map_err(ValidationError::from)?;
        self.birth_date = Some(parsed);
        Ok(())
    }

    /// Leave the birth date step, recording the age as evaluated on `today`.
    pub fn submit_birth_date(&mut self, today: NaiveDate) -> Result<i32, WizardError> {
        self.require("submit the birth date", &WizardStep::AwaitingBirthDate)?;
        let birth = self.birth_date.ok_or(ValidationError::MissingBirthDate)?;
        let age = age_on(birth, today);

        self.answers = Some(AnswerSheet::new(age));
        self.current_question = 0;
        self.selected = None;
        self.step = WizardStep::AwaitingAnswer;
        debug!(age, "Birth date accepted");
        Ok(age)
    }

    pub fn select_answer(&mut self, answer: Answer) -> Result<(), WizardError> {
        self.require("select an answer", &WizardStep::AwaitingAnswer)?;
        self.selected = Some(answer);
        Ok(())
    }

    /// Record the selected answer and move on.
    pub fn advance(&mut self) -> Result<Advance, WizardError> {
        self.require("continue", &WizardStep::AwaitingAnswer)?;
        let answer = self.selected.ok_or(ValidationError::MissingAnswer)?;
        let Some(sheet) = self.answers.as_mut() else {
            return Err(WizardError::WrongStep {
                action: "continue",
                step: "missing an answer sheet",
            });
        };

        // A complete sheet here means a failed submission is being retried.
        if sheet.is_complete() {
            sheet.replace_last(answer)?;
        } else {
            sheet.record(answer)?;
        }
        self.selected = None;

        if self.current_question < LAST_QUESTION_INDEX {
            self.current_question += 1;
            return Ok(Advance::NextQuestion {
                index: self.current_question,
            });
        }

        let payload = AssessmentPayload::from_sheet(sheet)?;
        self.step = WizardStep::Submitting;
        debug!(answers = sheet.answer_count(), "Questionnaire complete, submitting");
        Ok(Advance::Submit(payload))
    }

    /// Report the outcome of the outstanding submission.
    pub fn resolve(
        &mut self,
        outcome: Result<AssessmentResult, SubmissionError>,
    ) -> Result<Resolution, WizardError> {
        if !self.is_submitting() {
            return Err(WizardError::WrongStep {
                action: "resolve a submission",
                step: self.step.name(),
            });
        }

        match outcome {
            Ok(result) => {
                debug!(label = %result.label, "Assessment scored");
                self.step = WizardStep::Complete(result.clone());
                Ok(Resolution::Completed(result))
            }
            Err(err) => {
                warn!("Assessment submission failed: {err}");
                self.step = WizardStep::AwaitingAnswer;
                self.current_question = LAST_QUESTION_INDEX;
                self.selected = self.answers.as_ref().and_then(AnswerSheet::last_response);
                Ok(Resolution::Retry(err))
            }
        }
    }
}
