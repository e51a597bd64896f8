//! Core domain types for MoodLens.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod age;
mod answers;
pub mod catalog;
mod mood;
mod result;
mod session;
mod text;

pub use age::{BIRTH_DATE_FORMAT, BirthDateParseError, age_on, parse_birth_date};
pub use answers::{Answer, AnswerSheet, AnswerSheetError, AssessmentPayload};
pub use catalog::{LAST_QUESTION_INDEX, QUESTION_CATALOG, QUESTION_COUNT, Question};
pub use mood::{MoodReading, MoodTone};
pub use result::{AssessmentResult, SubmissionError, Tips};
pub use session::{AuthToken, SessionContext, UserProfile};
pub use text::sanitize_display_text;

pub use chrono::NaiveDate;

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}
