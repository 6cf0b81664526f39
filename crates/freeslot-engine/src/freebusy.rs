//! Compute free time slots from busy intervals.
//!
//! Sorts busy intervals by start time, merges overlapping or touching periods,
//! then sweeps a cursor across the day's availability window and emits every
//! gap that is at least the requested duration.

use chrono::{DateTime, Utc};

use crate::interval::{BusyInterval, FreeInterval};

/// Whether `[start, end)` is at least `duration_minutes` long.
///
/// Always `false` for a non-positive duration or an empty/reversed range.
/// Compares whole seconds, so a slot exactly `duration_minutes` long qualifies.
pub fn is_slot_long_enough(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_minutes: i64,
) -> bool {
    if duration_minutes <= 0 || start >= end {
        return false;
    }
    (end - start).num_seconds() >= duration_minutes.saturating_mul(60)
}

/// Merge overlapping or adjacent busy intervals.
///
/// Returns a sorted list of disjoint, non-touching intervals. Intervals are not
/// clipped to any window.
pub fn merge_busy_intervals(busy: &[BusyInterval]) -> Vec<BusyInterval> {
    let mut sorted = busy.to_vec();
    sorted.sort_by_key(|b| b.start);

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            // Touching counts as overlapping: no zero-length gap survives.
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Find free slots of at least `duration_minutes` within `[day_start, day_end]`.
///
/// Busy intervals may overlap, be unsorted, or extend outside the window; they
/// are merged first. Emitted slots never start before `day_start` nor end
/// after `day_end`. Gaps shorter than the duration are dropped.
pub fn free_slots_for_day(
    busy: &[BusyInterval],
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
    duration_minutes: i64,
) -> Vec<FreeInterval> {
    let merged = merge_busy_intervals(busy);

    let mut free_slots = Vec::new();
    let mut cursor = day_start;

    for block in &merged {
        let gap_end = block.start.min(day_end);
        if is_slot_long_enough(cursor, gap_end, duration_minutes) {
            free_slots.push(FreeInterval::new(cursor, gap_end));
        }
        cursor = cursor.max(block.end);
    }

    // Trailing free slot after the last busy block.
    if cursor < day_end && is_slot_long_enough(cursor, day_end, duration_minutes) {
        free_slots.push(FreeInterval::new(cursor, day_end));
    }

    free_slots
}

/// Find the first free slot of at least `duration_minutes` within the window.
pub fn first_free_slot(
    busy: &[BusyInterval],
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
    duration_minutes: i64,
) -> Option<FreeInterval> {
    free_slots_for_day(busy, day_start, day_end, duration_minutes)
        .into_iter()
        .next()
}
