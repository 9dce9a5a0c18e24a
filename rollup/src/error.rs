use thiserror::Error;
use time::Date;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollupError {
    #[error("could not parse date: {0}")]
    InvalidDate(String),
    #[error("invalid date range: {from} is after {to}")]
    InvalidDateRange { from: Date, to: Date },
    #[error("invalid hours value: {0}")]
    InvalidHours(String),
    #[error("unknown role: {0}")]
    UnknownRole(String),
}
