//! Error types for freeslot-engine operations.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Busy time provider failed: {0}")]
    Provider(String),

    #[error("Local time {time} does not exist on {date} in {timezone}")]
    NonexistentLocalTime {
        date: NaiveDate,
        time: NaiveTime,
        timezone: String,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
