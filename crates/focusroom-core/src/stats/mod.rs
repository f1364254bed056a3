//! Statistics over completed sessions.
//!
//! `summary` is the pure reduction; `periods` reads the store for the
//! standard windows and degrades to empty totals on failure.

mod periods;
mod summary;

pub use periods::{
    last_4_weeks_stats, this_week_stats, today_stats, yesterday_stats, WeekStats,
};
pub use summary::{summarize, StatsSummary};
