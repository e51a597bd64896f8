//! Collected answers and the submission payload built from them.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::catalog::{QUESTION_CATALOG, QUESTION_COUNT};

/// A yes/no response to one catalog question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Answer::Yes => Answer::No,
            Answer::No => Answer::Yes,
        }
    }

    /// Payload encoding: 1 for "Yes", 0 for "No".
    #[must_use]
    pub const fn as_flag(self) -> u8 {
        match self {
            Answer::Yes => 1,
            Answer::No => 0,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnswerSheetError {
    #[error("all {QUESTION_COUNT} questions are already answered")]
    Full,
    #[error("answer sheet has {answered} of {QUESTION_COUNT} responses")]
    Incomplete { answered: usize },
}

/// The answers of one questionnaire session.
///
/// Slot 0 is the derived age; slots `1..=19` are the yes/no responses in
/// catalog order. [`AnswerSheet::answer_count`] reports the logical length
/// including the age slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    age: i32,
    responses: Vec<Answer>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new(age: i32) -> Self {
        Self {
            age,
            responses: Vec::with_capacity(QUESTION_COUNT),
        }
    }

    #[must_use]
    pub fn age(&self) -> i32 {
        self.age
    }

    #[must_use]
    pub fn responses(&self) -> &[Answer] {
        &self.responses
    }

    /// Number of filled slots, counting the age.
    #[must_use]
    pub fn answer_count(&self) -> usize {
        1 + self.responses.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.responses.len() == QUESTION_COUNT
    }

    #[must_use]
    pub fn last_response(&self) -> Option<Answer> {
        self.responses.last().copied()
    }

    pub fn record(&mut self, answer: Answer) -> Result<(), AnswerSheetError> {
        if self.is_complete() {
            return Err(AnswerSheetError::Full);
        }
        self.responses.push(answer);
        Ok(())
    }

    /// Overwrite the final response of a complete sheet.
    pub fn replace_last(&mut self, answer: Answer) -> Result<Answer, AnswerSheetError> {
        if !self.is_complete() {
            return Err(AnswerSheetError::Incomplete {
                answered: self.responses.len(),
            });
        }
        let slot = self
            .responses
            .last_mut()
            .ok_or(AnswerSheetError::Incomplete { answered: 0 })?;
        Ok(std::mem::replace(slot, answer))
    }
}

/// Request body for the scoring endpoint: `{age, panic, sweating, ...}`.
///
/// Serializes as a JSON object with `age` first and the flags in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentPayload {
    age: i32,
    fields: Vec<(&'static str, u8)>,
}

impl AssessmentPayload {
    /// Build the payload from a complete sheet.
    pub fn from_sheet(sheet: &AnswerSheet) -> Result<Self, AnswerSheetError> {
        if !sheet.is_complete() {
            return Err(AnswerSheetError::Incomplete {
                answered: sheet.responses.len(),
            });
        }
        let names = QUESTION_CATALOG.iter().map(|q| q.field);
        Ok(Self::build(sheet.age, &sheet.responses, names))
    }

    /// Pair each field name at position `i` with the response at `i`.
    ///
    /// `responses` is the answer sequence without the age slot, so response
    /// `i` is answer `i + 1` of the full sheet.
    pub fn build(
        age: i32,
        responses: &[Answer],
        field_names: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        let fields = field_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let flag = responses.get(i).map_or(0, |answer| answer.as_flag());
                (name, flag)
            })
            .collect();
        Self { age, fields }
    }

    #[must_use]
    pub fn age(&self) -> i32 {
        self.age
    }

    #[must_use]
    pub fn fields(&self) -> &[(&'static str, u8)] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<u8> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, flag)| *flag)
    }
}

impl Serialize for AssessmentPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("age", &self.age)?;
        for (name, flag) in &self.fields {
            map.serialize_entry(name, flag)?;
        }
        map.end()
    }
}
