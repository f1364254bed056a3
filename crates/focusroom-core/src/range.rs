//! Day and week windows for aggregation.
//!
//! Boundaries are computed in the calendar of the supplied instant's offset.
//! Weeks start on Monday. Bounds are inclusive: a window ends one millisecond
//! before the next one starts.

use chrono::{DateTime, Datelike, Days, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive `[start, end]` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    /// Shift both bounds by the same delta.
    pub fn shifted(&self, by: Duration) -> Self {
        Self {
            start: self.start + by,
            end: self.end + by,
        }
    }
}

/// A historical week with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledRange {
    pub label: String,
    #[serde(flatten)]
    pub range: DateRange,
}

/// Midnight of `date` at `offset`.
///
/// Every bound uses the offset in force at the instant of the query. Across a
/// DST change (the change day itself, or a past week on the other side of
/// one) a bound lands an hour off the true local midnight.
fn midnight(offset: FixedOffset, date: NaiveDate) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    (local - Duration::seconds(offset.local_minus_utc() as i64)).and_utc()
}

fn end_before(next_start: DateTime<Utc>) -> DateTime<Utc> {
    next_start - Duration::milliseconds(1)
}

fn week_start_date(now: DateTime<FixedOffset>) -> NaiveDate {
    let date = now.date_naive();
    let back = now.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

fn week_of(offset: FixedOffset, monday: NaiveDate) -> DateRange {
    let next = monday.checked_add_days(Days::new(7)).unwrap_or(monday);
    DateRange {
        start: midnight(offset, monday),
        end: end_before(midnight(offset, next)),
    }
}

/// `[startOfDay(now), endOfDay(now)]`.
pub fn today_range(now: DateTime<FixedOffset>) -> DateRange {
    let offset = *now.offset();
    let date = now.date_naive();
    let next = date.succ_opt().unwrap_or(date);
    DateRange {
        start: midnight(offset, date),
        end: end_before(midnight(offset, next)),
    }
}

/// Today's window moved back exactly 24 hours.
pub fn yesterday_range(now: DateTime<FixedOffset>) -> DateRange {
    today_range(now).shifted(-Duration::days(1))
}

/// Monday 00:00 through Sunday 23:59:59.999 of the current week.
pub fn this_week_range(now: DateTime<FixedOffset>) -> DateRange {
    week_of(*now.offset(), week_start_date(now))
}

/// The four completed weeks before this one, most recent first.
pub fn last_4_weeks_ranges(now: DateTime<FixedOffset>) -> Vec<LabeledRange> {
    let offset = *now.offset();
    let this_monday = week_start_date(now);

    (1..=4u64)
        .filter_map(|i| {
            let monday = this_monday.checked_sub_days(Days::new(7 * i))?;
            let sunday = monday.checked_add_days(Days::new(6))?;
            Some(LabeledRange {
                label: format!(
                    "Week of {}-{}",
                    monday.format("%b %-d"),
                    sunday.format("%b %-d")
                ),
                range: week_of(offset, monday),
            })
        })
        .collect()
}

/// Days of the current ISO week elapsed so far, counting today: 1 on Monday, 7 on Sunday.
pub fn elapsed_week_days(now: DateTime<FixedOffset>) -> u32 {
    now.weekday().number_from_monday().clamp(1, 7)
}
