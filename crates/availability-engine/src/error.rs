//! Error types for rules validation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Invalid time of day {0:?}: expected \"HH:mm\"")]
    InvalidTime(String),

    #[error("Invalid calendar date {0:?}: expected \"YYYY-MM-DD\"")]
    InvalidDate(String),

    #[error("Non-positive slot interval: {0} min")]
    NonPositiveStep(i64),

    #[error("Degenerate slot range: start {start:?} is not before end {end:?}")]
    EmptyRange { start: String, end: String },
}

pub type Result<T> = std::result::Result<T, RulesError>;
