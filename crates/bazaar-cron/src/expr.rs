//! Parsed cron expressions and next-occurrence computation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc};

use crate::error::{CronError, CronResult};
use crate::field::FieldSet;

/// Upper bound on the day-by-day search. Four years covers every leap-year
/// interaction; anything still unmatched (e.g. `0 0 30 2 *`) never fires.
const MAX_SEARCH_DAYS: u32 = 1466;

/// A parsed cron expression.
///
/// Accepts the standard five fields (minute, hour, day-of-month, month,
/// day-of-week) or six with a leading seconds field. Day-of-week admits both
/// `0` and `7` for Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpr {
    source: String,
    seconds: FieldSet,
    minutes: FieldSet,
    hours: FieldSet,
    days_of_month: FieldSet,
    months: FieldSet,
    days_of_week: FieldSet,
}

impl CronExpr {
    /// Parse an expression.
    ///
    /// # Errors
    ///
    /// Returns [`CronError::FieldCount`] for anything but 5 or 6 fields, and
    /// [`CronError::Field`] when a field does not parse.
    pub fn parse(expr: &str) -> CronResult<Self> {
        let fields: Vec<&str> = expr.split_whitespace().collect();

        let (seconds, rest): (FieldSet, &[&str]) = match fields.len() {
            5 => (FieldSet::exactly(0), &fields[..]),
            6 => (FieldSet::parse(fields[0], "second", 0, 59)?, &fields[1..]),
            found => {
                return Err(CronError::FieldCount {
                    expr: expr.to_string(),
                    found,
                });
            },
        };

        let mut days_of_week = FieldSet::parse(rest[4], "day-of-week", 0, 7)?;
        days_of_week.remap(7, 0);

        Ok(Self {
            source: expr.to_string(),
            seconds,
            minutes: FieldSet::parse(rest[0], "minute", 0, 59)?,
            hours: FieldSet::parse(rest[1], "hour", 0, 23)?,
            days_of_month: FieldSet::parse(rest[2], "day-of-month", 1, 31)?,
            months: FieldSet::parse(rest[3], "month", 1, 12)?,
            days_of_week,
        })
    }

    /// The expression as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The next occurrence strictly after `after`.
    ///
    /// Never returns a time equal to `after`, so repeated application cannot
    /// re-fire the same instant. Returns `None` when no occurrence exists
    /// within the bounded search window (impossible dates such as Feb 30).
    #[must_use]
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        // Round up to the expression's granularity so the candidate is
        // strictly later even when `after` sits exactly on a boundary.
        let naive = after.naive_utc().with_nanosecond(0)?;
        let start = if self.has_seconds() {
            naive.checked_add_signed(Duration::seconds(1))?
        } else {
            naive
                .with_second(0)?
                .checked_add_signed(Duration::minutes(1))?
        };

        let mut date = start.date();
        for _ in 0..MAX_SEARCH_DAYS {
            if self.date_matches(date) {
                let time = if date == start.date() {
                    self.time_at_or_after(start.time())
                } else {
                    self.first_time()
                };
                if let Some(time) = time {
                    return Some(date.and_time(time).and_utc());
                }
            }
            date = date.succ_opt()?;
        }
        None
    }

    fn has_seconds(&self) -> bool {
        self.seconds != FieldSet::exactly(0)
    }

    fn date_matches(&self, date: NaiveDate) -> bool {
        if !self.months.contains(date.month()) {
            return false;
        }
        let dom_ok = self.days_of_month.contains(date.day());
        let dow_ok = self
            .days_of_week
            .contains(date.weekday().num_days_from_sunday());
        // Standard union rule: a bare `*` defers to the other field; two
        // restricted fields fire on either.
        match (
            self.days_of_month.is_wildcard(),
            self.days_of_week.is_wildcard(),
        ) {
            (true, true) => true,
            (true, false) => dow_ok,
            (false, true) => dom_ok,
            (false, false) => dom_ok || dow_ok,
        }
    }

    fn first_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(
            self.hours.first(),
            self.minutes.first(),
            self.seconds.first(),
        )
    }

    fn time_at_or_after(&self, from: NaiveTime) -> Option<NaiveTime> {
        for hour in self.hours.iter_from(from.hour()) {
            let minute_from = if hour == from.hour() { from.minute() } else { 0 };
            for minute in self.minutes.iter_from(minute_from) {
                let second_from = if hour == from.hour() && minute == from.minute() {
                    from.second()
                } else {
                    0
                };
                if let Some(second) = self.seconds.at_or_after(second_from) {
                    return NaiveTime::from_hms_opt(hour, minute, second);
                }
            }
        }
        None
    }
}

impl FromStr for CronExpr {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CronExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_daily_nine_am_after_ten_am() {
        let expr = CronExpr::parse("0 9 * * *").unwrap();
        let next = expr.next_after(utc(2024, 1, 1, 10, 0, 0)).unwrap();
        assert_eq!(next, utc(2024, 1, 2, 9, 0, 0));
    }

    #[test]
    fn test_daily_nine_am_before_nine_am() {
        let expr = CronExpr::parse("0 9 * * *").unwrap();
        let next = expr.next_after(utc(2024, 1, 1, 8, 30, 0)).unwrap();
        assert_eq!(next, utc(2024, 1, 1, 9, 0, 0));
    }

    #[test]
    fn test_strictly_after_on_exact_boundary() {
        let expr = CronExpr::parse("0 9 * * *").unwrap();
        let at_fire = utc(2024, 1, 1, 9, 0, 0);
        let next = expr.next_after(at_fire).unwrap();
        assert_eq!(next, utc(2024, 1, 2, 9, 0, 0));
        assert!(next > at_fire);
    }

    #[test]
    fn test_sub_minute_reference_rounds_up() {
        let expr = CronExpr::parse("* * * * *").unwrap();
        let next = expr.next_after(utc(2024, 1, 1, 9, 0, 30)).unwrap();
        assert_eq!(next, utc(2024, 1, 1, 9, 1, 0));
    }

    #[test]
    fn test_every_fifteen_minutes() {
        let expr = CronExpr::parse("*/15 * * * *").unwrap();
        let next = expr.next_after(utc(2024, 1, 1, 9, 16, 0)).unwrap();
        assert_eq!(next, utc(2024, 1, 1, 9, 30, 0));
    }

    #[test]
    fn test_six_field_seconds() {
        let expr = CronExpr::parse("30 0 9 * * *").unwrap();
        let next = expr.next_after(utc(2024, 1, 1, 9, 0, 29)).unwrap();
        assert_eq!(next, utc(2024, 1, 1, 9, 0, 30));
        let next = expr.next_after(next).unwrap();
        assert_eq!(next, utc(2024, 1, 2, 9, 0, 30));
    }

    #[test]
    fn test_month_rollover() {
        let expr = CronExpr::parse("0 0 1 * *").unwrap();
        let next = expr.next_after(utc(2024, 1, 31, 23, 59, 0)).unwrap();
        assert_eq!(next, utc(2024, 2, 1, 0, 0, 0));
    }

    #[test]
    fn test_leap_day() {
        let expr = CronExpr::parse("0 12 29 2 *").unwrap();
        let next = expr.next_after(utc(2023, 3, 1, 0, 0, 0)).unwrap();
        assert_eq!(next, utc(2024, 2, 29, 12, 0, 0));
    }

    #[test]
    fn test_impossible_date_returns_none() {
        let expr = CronExpr::parse("0 0 30 2 *").unwrap();
        assert_eq!(expr.next_after(utc(2024, 1, 1, 0, 0, 0)), None);
    }

    #[test]
    fn test_dow_seven_is_sunday() {
        let with_seven = CronExpr::parse("0 9 * * 7").unwrap();
        let with_zero = CronExpr::parse("0 9 * * 0").unwrap();
        let after = utc(2024, 1, 1, 0, 0, 0);
        // 2024-01-07 is a Sunday.
        assert_eq!(with_seven.next_after(after), with_zero.next_after(after));
        assert_eq!(
            with_zero.next_after(after).unwrap(),
            utc(2024, 1, 7, 9, 0, 0)
        );
    }

    #[test]
    fn test_dom_dow_union_when_both_restricted() {
        // Fires on the 15th AND on every Monday.
        let expr = CronExpr::parse("0 0 15 * 1").unwrap();
        let next = expr.next_after(utc(2024, 1, 13, 0, 0, 0)).unwrap();
        // 2024-01-15 is a Monday, but 2024-01-14 is neither; the next
        // Monday after the 13th IS the 15th, so check a clearer window.
        assert_eq!(next, utc(2024, 1, 15, 0, 0, 0));

        let next = expr.next_after(utc(2024, 1, 15, 0, 0, 0)).unwrap();
        // Next Monday (Jan 22) comes before the next 15th (Feb 15).
        assert_eq!(next, utc(2024, 1, 22, 0, 0, 0));
    }

    #[test]
    fn test_dom_restricted_dow_wildcard() {
        let expr = CronExpr::parse("0 0 15 * *").unwrap();
        let next = expr.next_after(utc(2024, 1, 16, 0, 0, 0)).unwrap();
        assert_eq!(next, utc(2024, 2, 15, 0, 0, 0));
    }

    #[test]
    fn test_iteration_is_strictly_monotonic() {
        let expr = CronExpr::parse("*/20 * * * *").unwrap();
        let mut t = utc(2024, 1, 1, 0, 0, 0);
        for _ in 0..200 {
            let next = expr.next_after(t).unwrap();
            assert!(next > t);
            t = next;
        }
        assert_eq!(t, utc(2024, 1, 3, 18, 40, 0));
    }

    #[test]
    fn test_rejects_wrong_field_count() {
        assert!(matches!(
            CronExpr::parse("* * * *"),
            Err(CronError::FieldCount { found: 4, .. })
        ));
        assert!(matches!(
            CronExpr::parse("* * * * * * *"),
            Err(CronError::FieldCount { found: 7, .. })
        ));
    }

    #[test]
    fn test_from_str_round_trip() {
        let expr: CronExpr = "0 9 * * 1-5".parse().unwrap();
        assert_eq!(expr.to_string(), "0 9 * * 1-5");
        assert_eq!(expr.source(), "0 9 * * 1-5");
    }
}
