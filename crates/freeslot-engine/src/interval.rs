//! Typed busy and free intervals.
//!
//! Busy intervals come from a [`BusyTimeProvider`](crate::provider::BusyTimeProvider)
//! and are validated on construction, so the scheduling code never sees a
//! reversed interval. Free intervals are the only output of the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A period during which at least one calendar is occupied.
///
/// Invariant: `start <= end`. Zero-length intervals are allowed; they close
/// off no time but still take part in merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBusyInterval")]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawBusyInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawBusyInterval> for BusyInterval {
    type Error = EngineError;

    fn try_from(raw: RawBusyInterval) -> Result<Self> {
        BusyInterval::new(raw.start, raw.end)
    }
}

impl BusyInterval {
    /// Create a busy interval.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidArgument` if `end` is before `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(EngineError::InvalidArgument(format!(
                "busy interval ends ({}) before it starts ({})",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Whether this interval intersects the half-open window `[window_start, window_end)`.
    pub fn overlaps(&self, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> bool {
        self.start < window_end && self.end > window_start
    }
}

/// A free time slot within the availability window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeInterval {
    pub(crate) fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}
