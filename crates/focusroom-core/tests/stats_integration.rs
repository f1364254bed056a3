//! Integration tests for stats and the check-in allowance.

use std::sync::Arc;

use chrono::{DateTime, Duration};
use focusroom_core::storage::PresetsConfig;
use focusroom_core::{
    CoreError, Database, ManualClock, SessionType, SettingsPatch, StopOutcome, Tracker, UserId,
};

fn tracker() -> (Tracker, Arc<ManualClock>) {
    // Thursday.
    let start = DateTime::parse_from_rfc3339("2026-03-12T08:00:00-05:00").unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let db = Database::open_memory().unwrap().with_clock(clock.clone());
    let tracker = Tracker::new(Arc::new(db), PresetsConfig::default(), Some(UserId::new("u1")));
    (tracker, clock)
}

#[test]
fn test_interrupted_focus_counts_time_but_not_completion() {
    let (t, clock) = tracker();

    let partial = t.start_session(SessionType::Focus, 1500).unwrap();
    clock.advance(Duration::seconds(120));
    assert_eq!(
        t.stop_session(&partial.id, 120).unwrap(),
        StopOutcome::SavedPartial { elapsed_seconds: 120 }
    );

    let full = t.start_session(SessionType::Focus, 1500).unwrap();
    clock.advance(Duration::seconds(1500));
    t.complete_session(&full.id).unwrap();

    let today = t.today_stats().unwrap();
    assert_eq!(today.focus_seconds, 1620);
    assert_eq!(today.sessions_completed, 1);
    assert_eq!(today.days_in_period, 1);
}

#[test]
fn test_manual_time_shows_up_today() {
    let (t, _) = tracker();
    assert!(matches!(
        t.add_manual_time(SessionType::Focus, 0),
        Err(CoreError::InvalidArgument { .. })
    ));
    t.add_manual_time(SessionType::Focus, 300).unwrap();
    assert_eq!(t.today_stats().unwrap().focus_seconds, 300);
}

#[test]
fn test_allowance_grows_with_focus_time() {
    let (t, _) = tracker();
    let fresh = t.can_check_in().unwrap();
    assert_eq!(
        (fresh.used, fresh.limit, fresh.allowed, fresh.minutes_to_next_bonus),
        (0, 3, true, 30)
    );

    t.add_manual_time(SessionType::Focus, 30 * 60).unwrap();
    let earned = t.can_check_in().unwrap();
    assert_eq!(earned.limit, 4);
    assert_eq!(earned.minutes_to_next_bonus, 30);
    assert_eq!(t.today_stats().unwrap().checkins_allowed, Some(4));
}

#[test]
fn test_bonus_interval_change_requires_unlock() {
    let (t, _) = tracker();
    t.add_manual_time(SessionType::Focus, 45 * 60).unwrap();
    let patch = SettingsPatch {
        checkin_bonus_interval: Some(15),
        ..SettingsPatch::default()
    };
    assert!(t.update_settings(patch).is_err());

    t.unlock_settings().unwrap();
    t.update_settings(patch).unwrap();
    t.lock_settings().unwrap();
    assert_eq!(t.can_check_in().unwrap().limit, 6);
}

#[test]
fn test_week_and_history_windows() {
    let (t, clock) = tracker();
    t.add_manual_time(SessionType::Break, 600).unwrap();
    t.create_checkin().unwrap();
    clock.advance(Duration::days(7));

    let week = t.this_week_stats().unwrap();
    assert_eq!(week.break_seconds, 0);
    assert_eq!(week.days_in_period, 4);

    let history = t.last_4_weeks_stats().unwrap();
    assert_eq!(history[0].summary.break_seconds, 600);
    assert_eq!(history[0].summary.checkins_used, 1);
    assert_eq!(history[0].summary.checkins_allowed, None);
    assert_eq!(history[0].label, "Week of Mar 9-Mar 15");
}
