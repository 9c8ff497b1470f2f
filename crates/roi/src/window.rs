use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use core_types::PeriodKey;

/// Period-start instants derived from a single timezone-aware moment.
///
/// A pure function of `(now, tz)`: no side effects, stable under repeated
/// calls within the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindows {
    day: DateTime<Utc>,
    week: DateTime<Utc>,
    month: DateTime<Utc>,
}

impl PeriodWindows {
    /// Computes the window starts for `now` in the reporting timezone.
    pub fn compute(now: DateTime<Utc>, tz: Tz) -> Self {
        let today = now.with_timezone(&tz).date_naive();
        // ISO week: Monday is the first day.
        let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        let first_of_month = today.with_day(1).unwrap_or(today);

        Self {
            day: local_midnight(today, tz),
            week: local_midnight(monday, tz),
            month: local_midnight(first_of_month, tz),
        }
    }

    /// Start instant for one period. The all-time window opens at today's
    /// midnight; the baseline store pins it to the first run and never moves
    /// it afterwards.
    pub fn start(&self, key: PeriodKey) -> DateTime<Utc> {
        match key {
            PeriodKey::Day | PeriodKey::All => self.day,
            PeriodKey::Week => self.week,
            PeriodKey::Month => self.month,
        }
    }
}

/// Midnight of `date` in `tz`, as a UTC instant.
///
/// DST transitions can duplicate or skip local midnight; an ambiguous
/// midnight resolves to the earlier instant, a skipped one to the first
/// valid instant of the day.
fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    let local = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => match tz.from_local_datetime(&(naive + Duration::hours(1))) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
            LocalResult::None => tz.from_utc_datetime(&naive),
        },
    };
    local.with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TZ: Tz = chrono_tz::Asia::Ho_Chi_Minh;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        TZ.with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn day_starts_at_local_midnight() {
        // 2026-03-04 is a Wednesday.
        let windows = PeriodWindows::compute(at(2026, 3, 4, 9), TZ);
        assert_eq!(windows.start(PeriodKey::Day), at(2026, 3, 4, 0));
    }

    #[test]
    fn week_starts_on_the_iso_monday() {
        let windows = PeriodWindows::compute(at(2026, 3, 4, 9), TZ);
        assert_eq!(windows.start(PeriodKey::Week), at(2026, 3, 2, 0));

        // A Monday is its own week start.
        let monday = PeriodWindows::compute(at(2026, 3, 2, 23), TZ);
        assert_eq!(monday.start(PeriodKey::Week), at(2026, 3, 2, 0));
    }

    #[test]
    fn month_starts_on_the_first() {
        let windows = PeriodWindows::compute(at(2026, 3, 31, 12), TZ);
        assert_eq!(windows.start(PeriodKey::Month), at(2026, 3, 1, 0));
    }

    #[test]
    fn all_time_window_degenerates_to_day() {
        let windows = PeriodWindows::compute(at(2026, 3, 4, 9), TZ);
        assert_eq!(windows.start(PeriodKey::All), windows.start(PeriodKey::Day));
    }

    #[test]
    fn windows_are_stable_within_the_same_instant() {
        let now = at(2026, 3, 4, 9);
        assert_eq!(PeriodWindows::compute(now, TZ), PeriodWindows::compute(now, TZ));
    }

    #[test]
    fn boundaries_follow_the_reporting_timezone_not_utc() {
        // 2026-03-04 01:00 in UTC+7 is still 2026-03-03 in UTC.
        let windows = PeriodWindows::compute(at(2026, 3, 4, 1), TZ);
        assert_eq!(windows.start(PeriodKey::Day), at(2026, 3, 4, 0));
    }
}
