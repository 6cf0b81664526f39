//! BusyTimeProvider trait definition.
//!
//! A provider answers one question: which periods are busy on a given day,
//! across a set of calendars. It owns authentication, pagination, retries,
//! and error categorization; the scheduler only sees typed intervals or an
//! error for that day.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::{EngineError, Result};
use crate::interval::BusyInterval;

/// Source of busy periods for a single day.
pub trait BusyTimeProvider {
    /// Return the union of busy intervals of all `calendar_ids` for the span
    /// `[day_start, day_end)`.
    ///
    /// Intervals may overlap, may be unsorted, and may extend past either
    /// edge of the span.
    ///
    /// # Errors
    /// Returns `EngineError::Provider` on an unrecoverable fetch failure.
    fn day_busy_times(
        &self,
        calendar_ids: &[String],
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
        timezone: Tz,
    ) -> Result<Vec<BusyInterval>>;
}

impl<P: BusyTimeProvider + ?Sized> BusyTimeProvider for &P {
    fn day_busy_times(
        &self,
        calendar_ids: &[String],
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
        timezone: Tz,
    ) -> Result<Vec<BusyInterval>> {
        (**self).day_busy_times(calendar_ids, day_start, day_end, timezone)
    }
}

/// In-memory provider holding busy intervals per calendar id.
#[derive(Debug, Clone, Default)]
pub struct StaticBusyTimes {
    calendars: HashMap<String, Vec<BusyInterval>>,
}

impl StaticBusyTimes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `calendar_id` with no busy periods, if not already known.
    pub fn add_calendar(&mut self, calendar_id: impl Into<String>) {
        self.calendars.entry(calendar_id.into()).or_default();
    }

    /// Add a busy interval to `calendar_id`, registering the calendar if needed.
    pub fn add_busy(&mut self, calendar_id: impl Into<String>, interval: BusyInterval) {
        self.calendars
            .entry(calendar_id.into())
            .or_default()
            .push(interval);
    }

    /// Builder form of [`add_busy`](Self::add_busy).
    pub fn with_busy(mut self, calendar_id: impl Into<String>, interval: BusyInterval) -> Self {
        self.add_busy(calendar_id, interval);
        self
    }

    pub fn calendar_ids(&self) -> impl Iterator<Item = &str> {
        self.calendars.keys().map(String::as_str)
    }
}

impl BusyTimeProvider for StaticBusyTimes {
    fn day_busy_times(
        &self,
        calendar_ids: &[String],
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
        _timezone: Tz,
    ) -> Result<Vec<BusyInterval>> {
        let mut busy = Vec::new();
        for id in calendar_ids {
            let intervals = self
                .calendars
                .get(id)
                .ok_or_else(|| EngineError::Provider(format!("unknown calendar: {id}")))?;
            busy.extend(
                intervals
                    .iter()
                    .filter(|b| b.overlaps(day_start, day_end))
                    .copied(),
            );
        }
        Ok(busy)
    }
}
