//! Property-based tests for free slot computation using proptest.
//!
//! These tests verify invariants that should hold for *any* set of busy
//! intervals, not just the scenarios in `freebusy_tests.rs`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use freeslot_engine::{free_slots_for_day, is_slot_long_enough, merge_busy_intervals, BusyInterval};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Midnight UTC on the test day; offsets below are minutes from here.
fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 2, 0, 0, 0).unwrap()
}

fn minute(offset: i64) -> DateTime<Utc> {
    base() + Duration::minutes(offset)
}

/// Busy intervals anywhere in the day, some spilling past the window edges.
fn arb_busy() -> impl Strategy<Value = Vec<BusyInterval>> {
    prop::collection::vec((0i64..1440, 0i64..240), 0..12).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(start, len)| BusyInterval::new(minute(start), minute(start + len)).unwrap())
            .collect()
    })
}

/// A window of at least one minute, in minutes from midnight.
fn arb_window() -> impl Strategy<Value = (i64, i64)> {
    (0i64..1200, 1i64..600).prop_map(|(start, len)| (start, start + len))
}

fn arb_duration() -> impl Strategy<Value = i64> {
    1i64..=120
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

fn covered(busy: &[BusyInterval], t: DateTime<Utc>) -> bool {
    busy.iter().any(|b| b.start <= t && t < b.end)
}

// ---------------------------------------------------------------------------
// P1: is_slot_long_enough agrees with whole-second arithmetic
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slot_length_check_matches_seconds(
        start in 0i64..86_400,
        len in 0i64..20_000,
        duration in -10i64..=300,
    ) {
        let s = base() + Duration::seconds(start);
        let e = s + Duration::seconds(len);
        let expected = duration > 0 && len > 0 && len >= duration * 60;
        prop_assert_eq!(is_slot_long_enough(s, e, duration), expected);
        // Reversed ranges are never long enough.
        prop_assert!(!is_slot_long_enough(e, s, duration));
    }
}

// ---------------------------------------------------------------------------
// P2: an empty day is one slot or nothing
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn empty_day_is_whole_window_or_nothing(
        (ws, we) in arb_window(),
        duration in arb_duration(),
    ) {
        let slots = free_slots_for_day(&[], minute(ws), minute(we), duration);
        if we - ws >= duration {
            prop_assert_eq!(slots.len(), 1);
            prop_assert_eq!(slots[0].start, minute(ws));
            prop_assert_eq!(slots[0].end, minute(we));
        } else {
            prop_assert!(slots.is_empty());
        }
    }
}

// ---------------------------------------------------------------------------
// P3: merged blocks are sorted, disjoint and non-adjacent, and cover the input
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn merged_blocks_are_strictly_separated(busy in arb_busy()) {
        let merged = merge_busy_intervals(&busy);

        for pair in merged.windows(2) {
            prop_assert!(
                pair[1].start > pair[0].end,
                "blocks touch or overlap: {:?} then {:?}",
                pair[0],
                pair[1]
            );
        }
        for b in &busy {
            prop_assert!(
                merged.iter().any(|m| m.start <= b.start && b.end <= m.end),
                "input {:?} not inside any merged block",
                b
            );
        }
    }
}

// ---------------------------------------------------------------------------
// P4: free and busy never overlap; uncovered time only in short gaps
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn free_and_busy_complement_each_other(
        busy in arb_busy(),
        (ws, we) in arb_window(),
        duration in arb_duration(),
    ) {
        let (day_start, day_end) = (minute(ws), minute(we));
        let slots = free_slots_for_day(&busy, day_start, day_end, duration);

        for pair in slots.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start, "slots out of order or overlapping");
        }
        for slot in &slots {
            prop_assert!(slot.start >= day_start && slot.end <= day_end);
            prop_assert!(is_slot_long_enough(slot.start, slot.end, duration));
        }

        let merged = merge_busy_intervals(&busy);
        // Probe the middle of every minute in the window.
        for m in ws..we {
            let t = minute(m) + Duration::seconds(30);
            let is_busy = covered(&merged, t);
            let is_free = slots.iter().any(|s| s.start <= t && t < s.end);
            prop_assert!(!(is_busy && is_free), "{} is both busy and free", t);

            if !is_busy && !is_free {
                // The enclosing gap must be shorter than the duration.
                let gap_start = merged
                    .iter()
                    .map(|b| b.end)
                    .filter(|end| *end <= t)
                    .max()
                    .map_or(day_start, |end| end.max(day_start));
                let gap_end = merged
                    .iter()
                    .map(|b| b.start)
                    .filter(|start| *start > t)
                    .min()
                    .map_or(day_end, |start| start.min(day_end));
                prop_assert!(
                    !is_slot_long_enough(gap_start, gap_end, duration),
                    "gap {}..{} is long enough but was not emitted",
                    gap_start,
                    gap_end
                );
            }
        }
    }
}
