//! DST transition policies for daily availability windows.
//!
//! Each day's window is built by combining a calendar date with a wall-clock
//! time in the search timezone. Around DST transitions that local time may be
//! ambiguous (fall back) or may not exist at all (spring forward).

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{EngineError, Result};

/// Policy for window boundaries that fall in a DST gap.
///
/// Ambiguous local times always resolve to the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstPolicy {
    /// Move the boundary forward by the length of the gap (02:30 becomes 03:30)
    #[default]
    ShiftForward,
    /// Drop the day: it contributes no free slots
    Skip,
    /// Record the day as failed
    Reject,
}

/// Combine a date and a wall-clock time in `tz` into an absolute instant.
///
/// Returns `Ok(None)` when the local time falls in a DST gap and the policy
/// is [`DstPolicy::Skip`].
///
/// # Errors
/// Returns `EngineError::NonexistentLocalTime` when the local time falls in a
/// DST gap and the policy is [`DstPolicy::Reject`], or when the offset in
/// effect before the gap cannot be determined.
pub fn combine(
    date: NaiveDate,
    time: NaiveTime,
    tz: Tz,
    policy: DstPolicy,
) -> Result<Option<DateTime<Utc>>> {
    let local = date.and_time(time);
    let nonexistent = || EngineError::NonexistentLocalTime {
        date,
        time,
        timezone: tz.name().to_string(),
    };

    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(Some(dt.with_timezone(&Utc))),
        LocalResult::Ambiguous(earliest, _) => Ok(Some(earliest.with_timezone(&Utc))),
        LocalResult::None => match policy {
            DstPolicy::Skip => Ok(None),
            DstPolicy::Reject => Err(nonexistent()),
            DstPolicy::ShiftForward => {
                // Read the wall clock with the offset in effect before the gap;
                // the resulting instant lies just past the transition.
                let before = tz
                    .offset_from_local_datetime(&(local - Duration::days(1)))
                    .earliest()
                    .ok_or_else(nonexistent)?
                    .fix();
                let utc = local - Duration::seconds(i64::from(before.local_minus_utc()));
                Ok(Some(Utc.from_utc_datetime(&utc)))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Los_Angeles;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn ordinary_time_converts_to_utc() {
        // PDT is UTC-7.
        let got = combine(date(2025, 5, 2), time(8, 0), Los_Angeles, DstPolicy::default())
            .unwrap()
            .unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2025, 5, 2, 15, 0, 0).unwrap());
    }

    #[test]
    fn gap_shifts_forward_by_gap_length() {
        // 2025-03-09 02:30 does not exist in Los Angeles; 03:30 PDT is 10:30 UTC.
        let got = combine(date(2025, 3, 9), time(2, 30), Los_Angeles, DstPolicy::ShiftForward)
            .unwrap()
            .unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2025, 3, 9, 10, 30, 0).unwrap());
    }

    #[test]
    fn gap_with_skip_policy_yields_none() {
        let got = combine(date(2025, 3, 9), time(2, 30), Los_Angeles, DstPolicy::Skip).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn gap_with_reject_policy_errors() {
        let err = combine(date(2025, 3, 9), time(2, 30), Los_Angeles, DstPolicy::Reject)
            .unwrap_err();
        assert!(matches!(err, EngineError::NonexistentLocalTime { .. }));
    }

    #[test]
    fn ambiguous_time_picks_earlier_instant() {
        // 2025-11-02 01:30 happens twice; the PDT reading (UTC-7) comes first.
        let got = combine(date(2025, 11, 2), time(1, 30), Los_Angeles, DstPolicy::default())
            .unwrap()
            .unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2025, 11, 2, 8, 30, 0).unwrap());
    }
}
