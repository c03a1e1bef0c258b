//! Service-day time windows.
//!
//! Transit service days roll over at 04:00 local time, not midnight. A query
//! made at 01:30 is still part of "tonight's" service, while a query made in
//! the afternoon that finds nothing left to run must look at tomorrow's.
//!
//! The two fallback cases drive different user-facing messages, so the
//! window carries both `is_next_day` and `is_later_today`.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};

use crate::config::WindowConfig;
use crate::domain::TimeWindow;

/// Computes query windows relative to a clock time.
#[derive(Debug, Clone, Default)]
pub struct TimeWindowCalculator {
    config: WindowConfig,
}

impl TimeWindowCalculator {
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    /// Window for the current local time.
    pub fn calculate(&self, fetch_next_period: bool) -> TimeWindow {
        self.calculate_at(&Local::now(), fetch_next_period)
    }

    /// Window for an explicit clock time.
    ///
    /// - Default: `[now, now + lookahead)`.
    /// - Fallback before the rollover hour: `[now, next day @ rollover)`,
    ///   flagged as both next-day and later-today.
    /// - Fallback otherwise: `[next day @ rollover, +24h)`, next-day only.
    pub fn calculate_at<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        fetch_next_period: bool,
    ) -> TimeWindow {
        let now_ms = now.timestamp_millis();

        if !fetch_next_period {
            return TimeWindow {
                start_time: now_ms,
                end_time: now_ms + self.config.lookahead().num_milliseconds(),
                is_next_day: false,
                is_later_today: false,
            };
        }

        let rollover = self.next_day_rollover(now).timestamp_millis();

        if self.is_early_morning_hours_at(now) {
            TimeWindow {
                start_time: now_ms,
                end_time: rollover,
                is_next_day: true,
                is_later_today: true,
            }
        } else {
            TimeWindow {
                start_time: rollover,
                end_time: rollover + chrono::Duration::hours(24).num_milliseconds(),
                is_next_day: true,
                is_later_today: false,
            }
        }
    }

    /// Whether the local time is before the service-day rollover.
    pub fn is_early_morning_hours(&self) -> bool {
        self.is_early_morning_hours_at(&Local::now())
    }

    pub fn is_early_morning_hours_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        now.hour() < self.config.service_day_start_hour
    }

    /// The rollover hour on the calendar day after `now`.
    fn next_day_rollover<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        let today = now.date_naive();
        let tomorrow = today.succ_opt().unwrap_or(NaiveDate::MAX);
        let at = NaiveTime::from_hms_opt(self.config.service_day_start_hour, 0, 0)
            .unwrap_or(NaiveTime::MIN);
        resolve_local(&now.timezone(), tomorrow.and_time(at))
    }
}

/// Map a local wall-clock time onto the time zone.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// DST gap move forward by an hour.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(naive + chrono::Duration::hours(1)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Window for the current local time with the default configuration.
pub fn calculate_time_window(fetch_next_period: bool) -> TimeWindow {
    TimeWindowCalculator::default().calculate(fetch_next_period)
}

/// Whether the local time is before the default 04:00 rollover.
pub fn is_early_morning_hours() -> bool {
    TimeWindowCalculator::default().is_early_morning_hours()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, hour, min, 0).unwrap()
    }

    fn ms(dt: DateTime<Utc>) -> i64 {
        dt.timestamp_millis()
    }

    #[test]
    fn default_window_is_three_hours_from_now() {
        let calc = TimeWindowCalculator::default();
        let now = at(10, 0);
        let w = calc.calculate_at(&now, false);

        assert_eq!(w.start_time, ms(now));
        assert_eq!(w.end_time, ms(at(13, 0)));
        assert!(!w.is_next_day);
        assert!(!w.is_later_today);
    }

    #[test]
    fn early_morning_fallback_is_later_today() {
        let calc = TimeWindowCalculator::default();
        let now = at(2, 0);
        let w = calc.calculate_at(&now, true);

        let end = Utc.with_ymd_and_hms(2024, 3, 16, 4, 0, 0).unwrap();
        assert_eq!(w.start_time, ms(now));
        assert_eq!(w.end_time, ms(end));
        assert!(w.is_next_day);
        assert!(w.is_later_today);
    }

    #[test]
    fn daytime_fallback_is_tomorrow() {
        let calc = TimeWindowCalculator::default();
        let w = calc.calculate_at(&at(10, 0), true);

        let start = Utc.with_ymd_and_hms(2024, 3, 16, 4, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 17, 4, 0, 0).unwrap();
        assert_eq!(w.start_time, ms(start));
        assert_eq!(w.end_time, ms(end));
        assert!(w.is_next_day);
        assert!(!w.is_later_today);
    }

    #[test]
    fn rollover_boundary() {
        let calc = TimeWindowCalculator::default();
        assert!(calc.is_early_morning_hours_at(&at(3, 59)));
        assert!(!calc.is_early_morning_hours_at(&at(4, 0)));
        assert!(calc.is_early_morning_hours_at(&at(0, 0)));
        assert!(!calc.is_early_morning_hours_at(&at(23, 59)));

        let w = calc.calculate_at(&at(4, 0), true);
        assert!(!w.is_later_today);
    }

    #[test]
    fn uses_local_hour_of_the_given_zone() {
        let calc = TimeWindowCalculator::default();
        // 06:00 UTC is 02:00 at UTC-4.
        let tz = FixedOffset::west_opt(4 * 3600).unwrap();
        let now = at(6, 0).with_timezone(&tz);
        assert!(calc.is_early_morning_hours_at(&now));

        let w = calc.calculate_at(&now, true);
        let end = tz.with_ymd_and_hms(2024, 3, 16, 4, 0, 0).unwrap();
        assert_eq!(w.end_time, end.timestamp_millis());
        assert!(w.is_later_today);
    }

    #[test]
    fn configured_rollover_and_lookahead() {
        let calc = TimeWindowCalculator::new(WindowConfig {
            lookahead_mins: 60,
            service_day_start_hour: 3,
        });
        let w = calc.calculate_at(&at(10, 0), false);
        assert_eq!(w.end_time - w.start_time, 3_600_000);

        assert!(!calc.is_early_morning_hours_at(&at(3, 30)));
        let w = calc.calculate_at(&at(10, 0), true);
        let start = Utc.with_ymd_and_hms(2024, 3, 16, 3, 0, 0).unwrap();
        assert_eq!(w.start_time, ms(start));
    }

    #[test]
    fn windows_are_valid() {
        let calc = TimeWindowCalculator::default();
        for hour in 0..24 {
            for next in [false, true] {
                assert!(calc.calculate_at(&at(hour, 30), next).validate().is_ok());
            }
        }
    }
}
