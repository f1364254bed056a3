//! Today, yesterday, this week and the four weeks before it.
//!
//! A failing store never reaches the caller here: the period reads as empty
//! and a warning is logged.

use serde::{Deserialize, Serialize};

use super::summary::{summarize, StatsSummary};
use crate::checkin::compute_allowance;
use crate::range::{
    elapsed_week_days, last_4_weeks_ranges, this_week_range, today_range, yesterday_range,
    DateRange,
};
use crate::session::{Session, UserId};
use crate::sessions::query_sessions_in_range;
use crate::settings::get_settings_or_default;
use crate::storage::Database;

/// Summary for one of the historical weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekStats {
    pub label: String,
    #[serde(flatten)]
    pub range: DateRange,
    pub summary: StatsSummary,
}

fn fetch(db: &Database, user: &UserId, range: DateRange, period: &str) -> Option<Vec<Session>> {
    match query_sessions_in_range(db, user, range) {
        Ok(sessions) => Some(sessions),
        Err(e) => {
            tracing::warn!(user = %user, period, "stats query failed, showing empty totals: {e}");
            None
        }
    }
}

fn period_stats(db: &Database, user: &UserId, range: DateRange, days: u32, period: &str) -> StatsSummary {
    fetch(db, user, range, period)
        .map(|sessions| summarize(&sessions, days))
        .unwrap_or_else(|| StatsSummary::empty(days))
}

/// Today's totals, including how many check-ins the day allows.
pub fn today_stats(db: &Database, user: &UserId) -> StatsSummary {
    let range = today_range(db.clock().now());
    let Some(sessions) = fetch(db, user, range, "today") else {
        return StatsSummary::empty(1);
    };
    let settings = get_settings_or_default(db, user);
    let allowance = compute_allowance(&sessions, settings.checkin_bonus_interval);
    StatsSummary {
        checkins_allowed: Some(allowance.limit),
        ..summarize(&sessions, 1)
    }
}

pub fn yesterday_stats(db: &Database, user: &UserId) -> StatsSummary {
    period_stats(db, user, yesterday_range(db.clock().now()), 1, "yesterday")
}

/// Monday through today; `days_in_period` counts only the days elapsed.
pub fn this_week_stats(db: &Database, user: &UserId) -> StatsSummary {
    let now = db.clock().now();
    period_stats(db, user, this_week_range(now), elapsed_week_days(now), "this_week")
}

/// The four completed weeks before this one, most recent first.
pub fn last_4_weeks_stats(db: &Database, user: &UserId) -> Vec<WeekStats> {
    last_4_weeks_ranges(db.clock().now())
        .into_iter()
        .map(|week| WeekStats {
            summary: period_stats(db, user, week.range, 7, "history"),
            label: week.label,
            range: week.range,
        })
        .collect()
}
