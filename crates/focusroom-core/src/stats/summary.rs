//! Reduce a list of sessions into per-period totals.

use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionType};

/// Totals for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Focus sessions that ran to their planned end.
    pub sessions_completed: u32,
    pub focus_seconds: u64,
    pub break_seconds: u64,
    pub cooloff_seconds: u64,
    pub checkins_used: u32,
    /// Only filled in for today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkins_allowed: Option<u32>,
    pub days_in_period: u32,
}

impl StatsSummary {
    /// All-zero totals for a period of `days_in_period` days.
    pub fn empty(days_in_period: u32) -> Self {
        Self {
            days_in_period,
            ..Self::default()
        }
    }

    /// Focus seconds per day, rounded down.
    pub fn daily_average_focus_seconds(&self) -> u64 {
        self.focus_seconds / u64::from(self.days_in_period.max(1))
    }
}

/// Sum `sessions` into a [`StatsSummary`].
///
/// Interrupted sessions count toward time totals but not toward
/// `sessions_completed`.
pub fn summarize(sessions: &[Session], days_in_period: u32) -> StatsSummary {
    sessions
        .iter()
        .fold(StatsSummary::empty(days_in_period), |mut acc, s| {
            match s.session_type {
                SessionType::Focus => {
                    acc.focus_seconds += s.duration;
                    if !s.interrupted {
                        acc.sessions_completed += 1;
                    }
                }
                SessionType::Break => acc.break_seconds += s.duration,
                SessionType::Cooloff => acc.cooloff_seconds += s.duration,
                SessionType::Checkin => acc.checkins_used += 1,
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionId;
    use chrono::{DateTime, Utc};

    fn session(session_type: SessionType, duration: u64, interrupted: bool) -> Session {
        let at: DateTime<Utc> = DateTime::from_timestamp(1_773_223_200, 0).unwrap();
        Session {
            id: SessionId::from(format!("{session_type}-{duration}")),
            start_time: at,
            duration,
            session_type,
            completed: true,
            interrupted,
            dismissed: false,
            completed_at: Some(at),
            created_at: at,
        }
    }

    #[test]
    fn interrupted_focus_counts_time_only() {
        let sessions = [
            session(SessionType::Focus, 120, true),
            session(SessionType::Focus, 1500, false),
        ];
        let summary = summarize(&sessions, 1);
        assert_eq!(summary.focus_seconds, 1620);
        assert_eq!(summary.sessions_completed, 1);
    }

    #[test]
    fn totals_per_type() {
        let sessions = [
            session(SessionType::Break, 300, false),
            session(SessionType::Break, 120, true),
            session(SessionType::Cooloff, 600, false),
            session(SessionType::Checkin, 0, false),
            session(SessionType::Checkin, 0, false),
        ];
        let summary = summarize(&sessions, 7);
        assert_eq!(summary.break_seconds, 420);
        assert_eq!(summary.cooloff_seconds, 600);
        assert_eq!(summary.checkins_used, 2);
        assert_eq!(summary.sessions_completed, 0);
        assert_eq!(summary.checkins_allowed, None);
        assert_eq!(summary.days_in_period, 7);
    }

    #[test]
    fn daily_average_divides_by_days() {
        let summary = summarize(&[session(SessionType::Focus, 3000, false)], 3);
        assert_eq!(summary.daily_average_focus_seconds(), 1000);
        assert_eq!(StatsSummary::empty(0).daily_average_focus_seconds(), 0);
    }

    #[test]
    fn serializes_camel_case_without_allowance() {
        let json = serde_json::to_value(summarize(&[], 1)).unwrap();
        assert_eq!(json["sessionsCompleted"], 0);
        assert!(json.get("checkinsAllowed").is_none());
    }
}
