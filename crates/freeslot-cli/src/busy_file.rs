//! Busy times exported from a calendar free/busy query.
//!
//! The file mirrors the shape of a Google Calendar `freebusy` response:
//!
//! ```json
//! {
//!   "calendars": {
//!     "primary": { "busy": [{ "start": "2025-05-02T16:00:00Z", "end": "2025-05-02T17:00:00Z" }] }
//!   }
//! }
//! ```
//!
//! Every interval is validated while loading, so a reversed interval fails
//! here rather than during the search.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use freeslot_engine::{BusyInterval, StaticBusyTimes};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct FreeBusyExport {
    calendars: BTreeMap<String, CalendarBusy>,
}

#[derive(Debug, Deserialize)]
struct CalendarBusy {
    #[serde(default)]
    busy: Vec<BusyInterval>,
}

/// Parse a free/busy export into an in-memory provider.
pub fn parse(json: &str) -> Result<StaticBusyTimes> {
    let export: FreeBusyExport =
        serde_json::from_str(json).context("Failed to parse busy times")?;

    let mut provider = StaticBusyTimes::new();
    for (calendar_id, calendar) in export.calendars {
        debug!(calendar = %calendar_id, count = calendar.busy.len(), "Loaded busy times");
        provider.add_calendar(calendar_id.clone());
        for interval in calendar.busy {
            provider.add_busy(calendar_id.clone(), interval);
        }
    }
    Ok(provider)
}

/// Read and parse the free/busy export at `path`.
pub fn load(path: &Path) -> Result<StaticBusyTimes> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read busy file: {}", path.display()))?;
    parse(&json).with_context(|| format!("Invalid busy file: {}", path.display()))
}
