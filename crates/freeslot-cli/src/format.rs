//! Rendering free slots for the terminal.

use chrono::DateTime;
use chrono_tz::Tz;
use freeslot_engine::FreeInterval;
use owo_colors::OwoColorize;
use serde::Serialize;

const START_FORMAT: &str = "%a %m/%d %I:%M %p";
const END_FORMAT: &str = "%I:%M %p";

fn local(slot: &FreeInterval, tz: Tz) -> (DateTime<Tz>, DateTime<Tz>) {
    (slot.start.with_timezone(&tz), slot.end.with_timezone(&tz))
}

/// One `start - end` line per slot, in `tz`.
pub fn plain(slots: &[FreeInterval], tz: Tz) -> String {
    slots
        .iter()
        .map(|slot| {
            let (start, end) = local(slot, tz);
            format!("{} - {}\n", start.format(START_FORMAT), end.format(END_FORMAT))
        })
        .collect()
}

/// A colored grid table with start, end and total minutes.
pub fn table(slots: &[FreeInterval], tz: Tz) -> String {
    let headers = ["Start Time", "End Time", "Total Time"];
    let rows: Vec<[String; 3]> = slots
        .iter()
        .map(|slot| {
            let (start, end) = local(slot, tz);
            [
                start.format(START_FORMAT).to_string(),
                end.format(END_FORMAT).to_string(),
                format!("{} min", slot.duration_minutes),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let border = |fill: char| {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&fill.to_string().repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let rule = "=".repeat(50);
    let mut out = format!("{}\n{}\n", "Available Time Slots:".cyan(), rule.yellow());
    out.push_str(&border('-'));
    out.push('|');
    for (header, width) in headers.iter().zip(widths) {
        out.push_str(&format!(" {} |", format!("{header:<width$}").cyan()));
    }
    out.push('\n');
    out.push_str(&border('='));
    for row in &rows {
        out.push('|');
        for (i, (cell, width)) in row.iter().zip(widths).enumerate() {
            let padded = format!("{cell:<width$}");
            if i == 2 {
                out.push_str(&format!(" {} |", padded.yellow()));
            } else {
                out.push_str(&format!(" {} |", padded.green()));
            }
        }
        out.push('\n');
        out.push_str(&border('-'));
    }
    out.push_str(&format!("{}\n", rule.yellow()));
    out
}

#[derive(Serialize)]
struct JsonSlot {
    start: String,
    end: String,
    duration_minutes: i64,
}

/// The slots as a pretty-printed JSON array, with timestamps in `tz`.
pub fn json(slots: &[FreeInterval], tz: Tz) -> serde_json::Result<String> {
    let items: Vec<JsonSlot> = slots
        .iter()
        .map(|slot| {
            let (start, end) = local(slot, tz);
            JsonSlot {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
                duration_minutes: slot.duration_minutes,
            }
        })
        .collect();
    serde_json::to_string_pretty(&items).map(|s| s + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::America::Los_Angeles;

    fn slots() -> Vec<FreeInterval> {
        // 08:00-09:00 and 10:00-18:00 PDT.
        let utc = |h| Utc.with_ymd_and_hms(2025, 5, 2, h, 0, 0).unwrap();
        vec![
            FreeInterval {
                start: utc(15),
                end: utc(16),
                duration_minutes: 60,
            },
            FreeInterval {
                start: utc(17),
                end: Utc.with_ymd_and_hms(2025, 5, 3, 1, 0, 0).unwrap(),
                duration_minutes: 480,
            },
        ]
    }

    #[test]
    fn plain_lines_use_local_time() {
        assert_eq!(
            plain(&slots(), Los_Angeles),
            "Fri 05/02 08:00 AM - 09:00 AM\nFri 05/02 10:00 AM - 06:00 PM\n"
        );
    }

    #[test]
    fn plain_with_no_slots_is_empty() {
        assert_eq!(plain(&[], Los_Angeles), "");
    }

    #[test]
    fn table_lists_every_slot_with_minutes() {
        let out = table(&slots(), Los_Angeles);
        assert!(out.contains("Available Time Slots:"));
        assert!(out.contains("Start Time"));
        assert!(out.contains("Fri 05/02 08:00 AM"));
        assert!(out.contains("06:00 PM"));
        assert!(out.contains("480 min"));
    }

    #[test]
    fn json_has_offsets_and_durations() {
        let out = json(&slots(), Los_Angeles).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["start"], "2025-05-02T08:00:00-07:00");
        assert_eq!(value[1]["duration_minutes"], 480);
    }
}
