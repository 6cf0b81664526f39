//! Day-by-day free slot search across calendars.
//!
//! The [`Scheduler`] walks every date of a [`SearchParameters`] range, builds
//! that day's availability window in the search timezone, asks the
//! [`BusyTimeProvider`] for busy periods, and subtracts them from the window.
//!
//! Days are independent: a provider failure on one day is recorded in that
//! day's [`DayReport`] and the search moves on to the next date.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::dst::combine;
use crate::error::{EngineError, Result};
use crate::freebusy;
use crate::interval::{BusyInterval, FreeInterval};
use crate::params::{validate_duration, SearchParameters};
use crate::provider::BusyTimeProvider;

/// Outcome of the search for a single date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    pub date: NaiveDate,
    pub outcome: std::result::Result<Vec<FreeInterval>, EngineError>,
}

/// Per-day outcomes of a [`Scheduler::free_slots`] run, in date order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FreeSlotReport {
    pub days: Vec<DayReport>,
}

impl FreeSlotReport {
    /// Free slots of every successful day, in chronological order.
    pub fn slots(&self) -> impl Iterator<Item = &FreeInterval> {
        self.days
            .iter()
            .filter_map(|day| day.outcome.as_ref().ok())
            .flatten()
    }

    pub fn into_slots(self) -> Vec<FreeInterval> {
        self.days
            .into_iter()
            .filter_map(|day| day.outcome.ok())
            .flatten()
            .collect()
    }

    /// Dates whose search failed, with the reason.
    pub fn failures(&self) -> Vec<(NaiveDate, &EngineError)> {
        self.days
            .iter()
            .filter_map(|day| day.outcome.as_ref().err().map(|e| (day.date, e)))
            .collect()
    }

    /// True when no day failed.
    pub fn is_complete(&self) -> bool {
        self.days.iter().all(|day| day.outcome.is_ok())
    }

    /// True when there was at least one day and every day failed.
    pub fn all_failed(&self) -> bool {
        !self.days.is_empty() && self.days.iter().all(|day| day.outcome.is_err())
    }
}

/// Finds free slots across calendars over a date range.
#[derive(Debug)]
pub struct Scheduler<P> {
    provider: P,
    params: SearchParameters,
    calendar_ids: Vec<String>,
}

impl<P: BusyTimeProvider> Scheduler<P> {
    /// Create a scheduler. Performs no I/O.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidArgument` if the duration is not positive.
    /// An empty `calendar_ids` list is accepted and contributes no busy times.
    pub fn new(provider: P, params: SearchParameters, calendar_ids: Vec<String>) -> Result<Self> {
        validate_duration(params.duration_minutes())?;

        debug!(
            start = %params.start(),
            end = %params.end(),
            availability_start = %params.availability_start(),
            availability_end = %params.availability_end(),
            duration_minutes = params.duration_minutes(),
            timezone = params.timezone().name(),
            calendars = ?calendar_ids,
            "Scheduler initialized"
        );

        Ok(Self {
            provider,
            params,
            calendar_ids,
        })
    }

    pub fn params(&self) -> &SearchParameters {
        &self.params
    }

    pub fn calendar_ids(&self) -> &[String] {
        &self.calendar_ids
    }

    /// See [`freebusy::is_slot_long_enough`].
    pub fn is_slot_long_enough(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        duration_minutes: i64,
    ) -> bool {
        freebusy::is_slot_long_enough(start, end, duration_minutes)
    }

    /// See [`freebusy::free_slots_for_day`].
    pub fn free_slots_for_day(
        &self,
        busy: &[BusyInterval],
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
        duration_minutes: i64,
    ) -> Vec<FreeInterval> {
        freebusy::free_slots_for_day(busy, day_start, day_end, duration_minutes)
    }

    /// Search every date in the range, one day at a time.
    pub fn free_slots(&self) -> FreeSlotReport {
        let days = self
            .params
            .dates()
            .map(|date| {
                debug!(%date, "Processing date");
                let outcome = self.search_day(date);
                match &outcome {
                    Ok(slots) => info!(%date, count = slots.len(), "Found free slots"),
                    Err(e) => warn!(%date, error = %e, "Skipping day after failure"),
                }
                DayReport { date, outcome }
            })
            .collect();

        FreeSlotReport { days }
    }

    fn search_day(&self, date: NaiveDate) -> Result<Vec<FreeInterval>> {
        let tz = self.params.timezone();
        let policy = self.params.dst_policy();

        let day_start = combine(date, self.params.availability_start(), tz, policy)?;
        let day_end = combine(date, self.params.availability_end(), tz, policy)?;
        let (Some(day_start), Some(day_end)) = (day_start, day_end) else {
            info!(%date, "Availability window falls in a DST gap, skipping day");
            return Ok(Vec::new());
        };

        let busy = self
            .provider
            .day_busy_times(&self.calendar_ids, day_start, day_end, tz)?;

        Ok(self.free_slots_for_day(&busy, day_start, day_end, self.params.duration_minutes()))
    }
}
