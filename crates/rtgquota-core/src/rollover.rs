//! Billing rollover arithmetic.
//!
//! All dates are UTC. An anchor day that doesn't exist in a month clamps to
//! that month's last day (anchor 31 → Feb 28/29, Apr 30, ...), so every
//! month has exactly one rollover and the result is never in the future.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::model::RolloverDay;

/// Number of days in the given calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 31,
    }
}

/// Midnight UTC of the anchor day in `year`/`month`, clamped to month end.
///
/// With the day clamped, only a year outside chrono's range can fail to
/// form a date; that falls back to the Unix epoch.
pub fn occurrence(year: i32, month: u32, anchor: RolloverDay) -> DateTime<Utc> {
    let day = u32::from(anchor.get()).min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
        .and_utc()
}

/// Most recent rollover that is not after `now`.
///
/// If this month's occurrence is still ahead, the previous month's is used.
pub fn last_rollover(anchor: RolloverDay, now: DateTime<Utc>) -> DateTime<Utc> {
    let candidate = occurrence(now.year(), now.month(), anchor);
    if candidate > now {
        let (year, month) = previous_month(now.year(), now.month());
        occurrence(year, month, anchor)
    } else {
        candidate
    }
}

/// The rollover following `last`, i.e. the end of the current period.
pub fn next_rollover_after(anchor: RolloverDay, last: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = following_month(last.year(), last.month());
    occurrence(year, month, anchor)
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn following_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(d: u8) -> RolloverDay {
        RolloverDay::new(d).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn anchor_already_passed_uses_current_month() {
        assert_eq!(last_rollover(day(15), at(2025, 6, 20, 12)), at(2025, 6, 15, 0));
    }

    #[test]
    fn anchor_today_uses_today() {
        assert_eq!(last_rollover(day(15), at(2025, 6, 15, 0)), at(2025, 6, 15, 0));
        assert_eq!(last_rollover(day(15), at(2025, 6, 15, 23)), at(2025, 6, 15, 0));
    }

    #[test]
    fn anchor_ahead_uses_previous_month() {
        assert_eq!(last_rollover(day(15), at(2025, 6, 14, 23)), at(2025, 5, 15, 0));
    }

    #[test]
    fn previous_month_wraps_year() {
        assert_eq!(last_rollover(day(10), at(2025, 1, 3, 8)), at(2024, 12, 10, 0));
    }

    #[test]
    fn anchor_past_month_end_clamps() {
        // April has 30 days: anchor 31 rolls over on the 30th.
        assert_eq!(last_rollover(day(31), at(2025, 4, 30, 9)), at(2025, 4, 30, 0));
        // Before the 30th, the previous occurrence is March 31.
        assert_eq!(last_rollover(day(31), at(2025, 4, 29, 9)), at(2025, 3, 31, 0));
    }

    #[test]
    fn early_march_falls_back_to_end_of_february() {
        assert_eq!(last_rollover(day(31), at(2025, 3, 1, 0)), at(2025, 2, 28, 0));
        assert_eq!(last_rollover(day(30), at(2024, 3, 2, 0)), at(2024, 2, 29, 0));
    }

    #[test]
    fn result_is_never_in_the_future() {
        for d in 1..=31 {
            for today in 1..=28 {
                let now = at(2025, 3, today, 6);
                assert!(last_rollover(day(d), now) <= now, "anchor {d} on Mar {today}");
            }
        }
    }

    #[test]
    fn occurrence_outside_chrono_range_does_not_panic() {
        assert_eq!(occurrence(i32::MAX, 1, day(1)), DateTime::from_timestamp(0, 0).unwrap());
        assert_eq!(occurrence(2025, 2, day(31)), at(2025, 2, 28, 0));
    }

    #[test]
    fn next_rollover_is_one_period_later() {
        let last = at(2025, 1, 31, 0);
        assert_eq!(next_rollover_after(day(31), last), at(2025, 2, 28, 0));
        assert_eq!(next_rollover_after(day(5), at(2024, 12, 5, 0)), at(2025, 1, 5, 0));
    }
}
