//! Meeting timestamp formatting and duration helpers.

use chrono::{Datelike, Local, NaiveDateTime, TimeZone, Timelike};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Convert an epoch-millisecond post timestamp to wall-clock local time.
pub fn local_datetime(epoch_ms: i64) -> Option<NaiveDateTime> {
    Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .map(|dt| dt.naive_local())
}

/// Format a meeting timestamp as e.g. "Jan 5 at 2:05 PM" (or "Jan 5 at 14:05"
/// with the military-time preference). Minutes are zero-padded, hours are not;
/// there are no seconds.
pub fn format_meeting_time(dt: NaiveDateTime, use_military_time: bool) -> String {
    let month = MONTH_NAMES[dt.month0() as usize];
    let day = dt.day();
    let mut hours = dt.hour();
    let minutes = dt.minute();

    let mut ampm = "";
    if !use_military_time {
        ampm = " AM";
        if hours >= 12 {
            ampm = " PM";
        }

        hours %= 12;
        if hours == 0 {
            hours = 12;
        }
    }

    format!("{} {} at {}:{:02}{}", month, day, hours, minutes, ampm)
}

/// Duration between two epoch-millisecond timestamps in whole minutes,
/// rounded up so a 2m05s meeting reads as "at least 3 minutes".
pub fn duration_minutes_ceil(start_ms: i64, end_ms: i64) -> i64 {
    let diff = (end_ms - start_ms).max(0);
    (diff + 59_999) / 60_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_format_12_hour() {
        assert_eq!(format_meeting_time(dt(14, 5), false), "Jan 5 at 2:05 PM");
        assert_eq!(format_meeting_time(dt(9, 30), false), "Jan 5 at 9:30 AM");
    }

    #[test]
    fn test_format_12_hour_midnight_and_noon() {
        assert_eq!(format_meeting_time(dt(0, 7), false), "Jan 5 at 12:07 AM");
        assert_eq!(format_meeting_time(dt(12, 0), false), "Jan 5 at 12:00 PM");
    }

    #[test]
    fn test_format_military() {
        assert_eq!(format_meeting_time(dt(14, 5), true), "Jan 5 at 14:05");
        assert_eq!(format_meeting_time(dt(0, 7), true), "Jan 5 at 0:07");
    }

    #[test]
    fn test_format_december() {
        let dt = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        assert_eq!(format_meeting_time(dt, true), "Dec 31 at 23:59");
    }

    #[test]
    fn test_duration_rounds_up() {
        // 125s rounds up to 3 whole minutes
        assert_eq!(duration_minutes_ceil(1_000, 126_000), 3);
        assert_eq!(duration_minutes_ceil(0, 60_000), 1);
        assert_eq!(duration_minutes_ceil(0, 60_001), 2);
    }

    #[test]
    fn test_duration_never_negative() {
        assert_eq!(duration_minutes_ceil(10_000, 10_000), 0);
        assert_eq!(duration_minutes_ceil(20_000, 10_000), 0);
    }
}
