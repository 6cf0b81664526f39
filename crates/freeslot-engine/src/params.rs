//! Search parameters for a free-slot query.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::dst::DstPolicy;
use crate::error::{EngineError, Result};

/// Parse an IANA timezone name.
///
/// # Errors
/// Returns `EngineError::InvalidTimezone` if `name` is not a known IANA identifier.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

/// Immutable description of one free-slot search: which dates, which daily
/// window, how long a slot must be, and in which timezone the window is read.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParameters {
    start: NaiveDate,
    end: NaiveDate,
    availability_start: NaiveTime,
    availability_end: NaiveTime,
    duration_minutes: i64,
    timezone: Tz,
    dst_policy: DstPolicy,
}

impl SearchParameters {
    /// Build search parameters for the inclusive date range `[start, end]`.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidArgument` if `duration_minutes <= 0`, if
    /// `availability_start` is not before `availability_end`, or if `end` is
    /// before `start`. Returns `EngineError::InvalidTimezone` for an unknown
    /// timezone.
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        availability_start: NaiveTime,
        availability_end: NaiveTime,
        duration_minutes: i64,
        timezone: &str,
    ) -> Result<Self> {
        validate_duration(duration_minutes)?;
        if availability_start >= availability_end {
            return Err(EngineError::InvalidArgument(format!(
                "availability start ({}) must be before availability end ({})",
                availability_start.format("%H:%M"),
                availability_end.format("%H:%M")
            )));
        }
        if end < start {
            return Err(EngineError::InvalidArgument(format!(
                "end date ({end}) is before start date ({start})"
            )));
        }
        let timezone = parse_timezone(timezone)?;

        Ok(Self {
            start,
            end,
            availability_start,
            availability_end,
            duration_minutes,
            timezone,
            dst_policy: DstPolicy::default(),
        })
    }

    /// Use `policy` for window boundaries that fall in a DST gap.
    pub fn with_dst_policy(mut self, policy: DstPolicy) -> Self {
        self.dst_policy = policy;
        self
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn availability_start(&self) -> NaiveTime {
        self.availability_start
    }

    pub fn availability_end(&self) -> NaiveTime {
        self.availability_end
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn dst_policy(&self) -> DstPolicy {
        self.dst_policy
    }

    /// Every calendar date from `start` to `end`, inclusive.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

pub(crate) fn validate_duration(duration_minutes: i64) -> Result<()> {
    if duration_minutes <= 0 {
        return Err(EngineError::InvalidArgument(format!(
            "duration must be a positive number of minutes, got {duration_minutes}"
        )));
    }
    Ok(())
}
