//! Dynamic warn/critical thresholds.
//!
//! The threshold climbs linearly across the billing period:
//!
//! ```text
//! threshold = trunc( (100 - buffer - play) * (day_of_period / days_in_month) + play )
//! ```
//!
//! so it equals `play` (give or take truncation) on the rollover day and
//! `100 - buffer` on the last day of the period.

use chrono::{DateTime, Datelike, Utc};

use crate::model::{DynamicParams, RolloverDay, ThresholdMode};
use crate::rollover::{days_in_month, last_rollover, next_rollover_after};

/// Threshold percentage for `now` on the curve described by `params`.
///
/// `days_in_month` is the length of the calendar month holding the next
/// rollover, the month the period runs through. The value is not clamped:
/// when the period is longer than that month (Jan 15 to Feb 15), the
/// result keeps climbing past `100 - buffer` near the end.
pub fn dynamic_threshold(params: DynamicParams, anchor: RolloverDay, now: DateTime<Utc>) -> i32 {
    let rollover = last_rollover(anchor, now);
    let next = next_rollover_after(anchor, rollover);
    let month_days = days_in_month(next.year(), next.month());
    let day_of_period = (now - rollover).num_days() + 1;

    let value = curve(params, day_of_period, month_days);
    tracing::trace!(
        %rollover,
        day_of_period,
        month_days,
        buffer = params.buffer,
        play = params.play,
        value,
        "dynamic threshold"
    );
    value
}

/// Evaluate the linear curve at `day_of_period` (1-based).
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::as_conversions
)]
pub fn curve(params: DynamicParams, day_of_period: i64, month_days: u32) -> i32 {
    let span = 100 - i32::from(params.buffer) - i32::from(params.play);
    let progress = day_of_period as f64 / f64::from(month_days);
    (f64::from(span) * progress + f64::from(params.play)).trunc() as i32
}

impl ThresholdMode {
    /// Fixed percentage as-is, or the dynamic curve's value for `now`.
    pub fn resolve(self, params: DynamicParams, anchor: RolloverDay, now: DateTime<Utc>) -> i32 {
        match self {
            Self::Fixed(pct) => i32::from(pct),
            Self::Dynamic => dynamic_threshold(params, anchor, now),
        }
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
    fn first_day_starts_near_play() {
        // 70 * 1/31 + 5 = 7.25
        assert_eq!(curve(DynamicParams::WARN, 1, 31), 7);
        // 80 * 1/30 + 10 = 12.67
        assert_eq!(curve(DynamicParams::CRIT, 1, 30), 12);
    }

    #[test]
    fn last_day_reaches_ceiling() {
        assert_eq!(curve(DynamicParams::WARN, 31, 31), 75);
        assert_eq!(curve(DynamicParams::CRIT, 28, 28), 90);
        assert_eq!(curve(DynamicParams::new(1, 1).unwrap(), 30, 30), 99);
    }

    #[test]
    fn curve_is_non_decreasing_within_period() {
        for params in [DynamicParams::WARN, DynamicParams::CRIT] {
            for month_days in [28, 29, 30, 31] {
                let mut prev = i32::MIN;
                for d in 1..=i64::from(month_days) {
                    let v = curve(params, d, month_days);
                    assert!(v >= prev, "{params:?} day {d}/{month_days}: {v} < {prev}");
                    prev = v;
                }
            }
        }
    }

    #[test]
    fn overshoot_is_not_clamped() {
        assert!(curve(DynamicParams::WARN, 40, 30) > 75);
        assert!(curve(DynamicParams::new(1, 1).unwrap(), 62, 31) > 100);
    }

    #[test]
    fn buffer_plus_play_over_100_goes_below_play() {
        // span = 100 - 80 - 60 = -40
        assert_eq!(curve(DynamicParams::new(80, 60).unwrap(), 30, 30), 20);
    }

    #[test]
    fn truncates_rather_than_rounds() {
        // 70 * 15/31 + 5 = 38.87
        assert_eq!(curve(DynamicParams::WARN, 15, 31), 38);
    }

    #[test]
    fn dynamic_uses_elapsed_days_since_rollover() {
        // Rollover 2025-03-01, now Mar 16 noon: 15 whole days elapsed → day 16.
        // Next rollover is in April (30 days): 70 * 16/30 + 5 = 42.33
        assert_eq!(
            dynamic_threshold(DynamicParams::WARN, day(1), at(2025, 3, 16, 12)),
            42
        );
    }

    #[test]
    fn dynamic_on_rollover_day() {
        // Day 1 of a period running through July (31 days): 80/31 + 10 = 12.58
        assert_eq!(
            dynamic_threshold(DynamicParams::CRIT, day(10), at(2025, 6, 10, 0)),
            12
        );
    }

    #[test]
    fn dynamic_month_length_comes_from_next_rollover() {
        // Rollover Jan 15, next Feb 15 (28-day month); Feb 14 is day 31.
        // 70 * 31/28 + 5 = 82.5, past the 75 ceiling.
        assert_eq!(
            dynamic_threshold(DynamicParams::WARN, day(15), at(2025, 2, 14, 12)),
            82
        );
    }

    #[test]
    fn short_start_month_uses_longer_following_month() {
        // Rollover Feb 15, next Mar 15 (31 days); Mar 14 is day 28.
        // 70 * 28/31 + 5 = 68.23
        assert_eq!(
            dynamic_threshold(DynamicParams::WARN, day(15), at(2025, 3, 14, 18)),
            68
        );
    }

    #[test]
    fn clamped_anchor_reads_next_month_length() {
        // Anchor 31: rollover Jan 31, next Feb 28; Feb 27 is day 28 → ceiling.
        assert_eq!(
            dynamic_threshold(DynamicParams::WARN, day(31), at(2025, 2, 27, 6)),
            75
        );
    }

    #[test]
    fn fixed_mode_ignores_curve() {
        let now = at(2025, 6, 1, 0);
        assert_eq!(ThresholdMode::Fixed(80).resolve(DynamicParams::CRIT, day(1), now), 80);
        assert_eq!(
            ThresholdMode::Dynamic.resolve(DynamicParams::CRIT, day(1), now),
            dynamic_threshold(DynamicParams::CRIT, day(1), now)
        );
    }
}
