//! Birth date parsing and age derivation.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Accepted birth date format (the HTML date input format).
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{input}` is not a date in YYYY-MM-DD form")]
pub struct BirthDateParseError {
    pub input: String,
}

/// Parse a `YYYY-MM-DD` birth date, ignoring surrounding whitespace.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, BirthDateParseError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, BIRTH_DATE_FORMAT).map_err(|_| BirthDateParseError {
        input: trimmed.to_string(),
    })
}

/// Whole years elapsed between `birth` and `today`.
///
/// `today.year - birth.year`, minus one when today's (month, day) falls
/// before the birthday's (month, day).
#[must_use]
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
