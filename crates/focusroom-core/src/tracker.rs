//! Single entry point for the UI layer.
//!
//! [`Tracker`] binds a store, the quick-select presets and the signed-in user.
//! [`AsyncTracker`] exposes the same calls as futures, running each one on
//! tokio's blocking pool.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::checkin::{self, CheckinAllowance, CheckinCreated};
use crate::error::{CoreError, DatabaseError, Result};
use crate::range::DateRange;
use crate::recovery::{self, RecoveryStatus};
use crate::session::{Session, SessionId, SessionType, UserId};
use crate::sessions::{self, StartedSession, StopOutcome};
use crate::settings::{self, SettingsPatch, UserSettings};
use crate::stats::{self, StatsSummary, WeekStats};
use crate::storage::{Database, PresetsConfig};
use crate::templates;

/// Every stats window at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    pub today: StatsSummary,
    pub yesterday: StatsSummary,
    pub this_week: StatsSummary,
    pub history: Vec<WeekStats>,
}

pub struct Tracker {
    db: Arc<Database>,
    presets: PresetsConfig,
    user: Option<UserId>,
}

impl Tracker {
    pub fn new(db: Arc<Database>, presets: PresetsConfig, user: Option<UserId>) -> Self {
        Self { db, presets, user }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    pub fn presets(&self) -> &PresetsConfig {
        &self.presets
    }

    fn user(&self) -> Result<&UserId> {
        self.user.as_ref().ok_or(CoreError::Unauthenticated)
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Start a timed session, remembering a custom duration for quick-select.
    pub fn start_session(&self, session_type: SessionType, duration: u64) -> Result<StartedSession> {
        let user = self.user()?;
        if !session_type.is_timed() {
            return Err(CoreError::invalid("type", "check-ins are recorded with create_checkin"));
        }
        if duration == 0 {
            return Err(CoreError::invalid("duration", "must be at least one second"));
        }
        let started = sessions::create_session(&self.db, user, duration, session_type)?;
        if templates::is_recordable(&self.presets, session_type, duration) {
            if let Err(e) =
                templates::add_recent_duration(&self.db, user, duration, self.presets.max_recent)
            {
                tracing::warn!(user = %user, "failed to remember recent duration: {e}");
            }
        }
        Ok(started)
    }

    pub fn complete_session(&self, id: &SessionId) -> Result<()> {
        sessions::complete_session(&self.db, self.user()?, id)
    }

    pub fn cancel_session(&self, id: &SessionId) -> Result<()> {
        sessions::cancel_session(&self.db, self.user()?, id)
    }

    pub fn save_partial_session(&self, id: &SessionId, elapsed_seconds: u64) -> Result<()> {
        sessions::save_partial_session(&self.db, self.user()?, id, elapsed_seconds)
    }

    pub fn stop_session(&self, id: &SessionId, elapsed_seconds: u64) -> Result<StopOutcome> {
        sessions::stop_session(&self.db, self.user()?, id, elapsed_seconds)
    }

    pub fn dismiss_session(&self, id: &SessionId) -> Result<()> {
        sessions::dismiss_session(&self.db, self.user()?, id)
    }

    pub fn add_manual_time(&self, session_type: SessionType, seconds: i64) -> Result<Session> {
        sessions::add_manual_time(&self.db, self.user()?, session_type, seconds)
    }

    pub fn sessions_in_range(&self, range: DateRange) -> Result<Vec<Session>> {
        sessions::query_sessions_in_range(&self.db, self.user()?, range)
    }

    pub fn check_recovery(&self) -> Result<RecoveryStatus> {
        recovery::check_recovery(&self.db, self.user()?)
    }

    // ── Check-ins ────────────────────────────────────────────────────

    pub fn can_check_in(&self) -> Result<CheckinAllowance> {
        checkin::can_check_in(&self.db, self.user()?)
    }

    pub fn create_checkin(&self) -> Result<CheckinCreated> {
        checkin::create_checkin(&self.db, self.user()?)
    }

    // ── Stats ────────────────────────────────────────────────────────

    pub fn today_stats(&self) -> Result<StatsSummary> {
        Ok(stats::today_stats(&self.db, self.user()?))
    }

    pub fn yesterday_stats(&self) -> Result<StatsSummary> {
        Ok(stats::yesterday_stats(&self.db, self.user()?))
    }

    pub fn this_week_stats(&self) -> Result<StatsSummary> {
        Ok(stats::this_week_stats(&self.db, self.user()?))
    }

    pub fn last_4_weeks_stats(&self) -> Result<Vec<WeekStats>> {
        Ok(stats::last_4_weeks_stats(&self.db, self.user()?))
    }

    pub fn stats_overview(&self) -> Result<StatsOverview> {
        let user = self.user()?;
        Ok(StatsOverview {
            today: stats::today_stats(&self.db, user),
            yesterday: stats::yesterday_stats(&self.db, user),
            this_week: stats::this_week_stats(&self.db, user),
            history: stats::last_4_weeks_stats(&self.db, user),
        })
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Stored settings, or defaults when they cannot be read.
    pub fn settings(&self) -> Result<UserSettings> {
        Ok(settings::get_settings_or_default(&self.db, self.user()?))
    }

    pub fn update_settings(&self, patch: SettingsPatch) -> Result<UserSettings> {
        settings::update_settings(&self.db, self.user()?, patch)
    }

    pub fn unlock_settings(&self) -> Result<UserSettings> {
        settings::unlock_settings(&self.db, self.user()?)
    }

    pub fn lock_settings(&self) -> Result<UserSettings> {
        settings::lock_settings(&self.db, self.user()?)
    }

    // ── Durations ────────────────────────────────────────────────────

    pub fn recent_durations(&self) -> Result<Vec<u64>> {
        templates::recent_durations(&self.db, self.user()?)
    }

    pub fn quick_select(&self, session_type: SessionType) -> Result<Vec<u64>> {
        let recent = self.recent_durations()?;
        Ok(templates::quick_select(&self.presets, &recent, session_type))
    }
}

/// [`Tracker`] behind futures.
#[derive(Clone)]
pub struct AsyncTracker {
    inner: Arc<Tracker>,
}

impl AsyncTracker {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            inner: Arc::new(tracker),
        }
    }

    pub fn tracker(&self) -> &Arc<Tracker> {
        &self.inner
    }

    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Tracker) -> Result<T> + Send + 'static,
    {
        let tracker = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&tracker))
            .await
            .map_err(|e| CoreError::Transient(DatabaseError::WorkerFailed(e.to_string())))?
    }

    pub async fn start_session(&self, session_type: SessionType, duration: u64) -> Result<StartedSession> {
        self.run(move |t| t.start_session(session_type, duration)).await
    }

    pub async fn complete_session(&self, id: SessionId) -> Result<()> {
        self.run(move |t| t.complete_session(&id)).await
    }

    pub async fn cancel_session(&self, id: SessionId) -> Result<()> {
        self.run(move |t| t.cancel_session(&id)).await
    }

    pub async fn save_partial_session(&self, id: SessionId, elapsed_seconds: u64) -> Result<()> {
        self.run(move |t| t.save_partial_session(&id, elapsed_seconds)).await
    }

    pub async fn stop_session(&self, id: SessionId, elapsed_seconds: u64) -> Result<StopOutcome> {
        self.run(move |t| t.stop_session(&id, elapsed_seconds)).await
    }

    pub async fn dismiss_session(&self, id: SessionId) -> Result<()> {
        self.run(move |t| t.dismiss_session(&id)).await
    }

    pub async fn add_manual_time(&self, session_type: SessionType, seconds: i64) -> Result<Session> {
        self.run(move |t| t.add_manual_time(session_type, seconds)).await
    }

    pub async fn sessions_in_range(&self, range: DateRange) -> Result<Vec<Session>> {
        self.run(move |t| t.sessions_in_range(range)).await
    }

    pub async fn check_recovery(&self) -> Result<RecoveryStatus> {
        self.run(|t| t.check_recovery()).await
    }

    pub async fn can_check_in(&self) -> Result<CheckinAllowance> {
        self.run(|t| t.can_check_in()).await
    }

    pub async fn create_checkin(&self) -> Result<CheckinCreated> {
        self.run(|t| t.create_checkin()).await
    }

    pub async fn today_stats(&self) -> Result<StatsSummary> {
        self.run(|t| t.today_stats()).await
    }

    pub async fn yesterday_stats(&self) -> Result<StatsSummary> {
        self.run(|t| t.yesterday_stats()).await
    }

    pub async fn this_week_stats(&self) -> Result<StatsSummary> {
        self.run(|t| t.this_week_stats()).await
    }

    pub async fn last_4_weeks_stats(&self) -> Result<Vec<WeekStats>> {
        self.run(|t| t.last_4_weeks_stats()).await
    }

    pub async fn stats_overview(&self) -> Result<StatsOverview> {
        self.run(|t| t.stats_overview()).await
    }

    pub async fn settings(&self) -> Result<UserSettings> {
        self.run(|t| t.settings()).await
    }

    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<UserSettings> {
        self.run(move |t| t.update_settings(patch)).await
    }

    pub async fn unlock_settings(&self) -> Result<UserSettings> {
        self.run(|t| t.unlock_settings()).await
    }

    pub async fn lock_settings(&self) -> Result<UserSettings> {
        self.run(|t| t.lock_settings()).await
    }

    pub async fn recent_durations(&self) -> Result<Vec<u64>> {
        self.run(|t| t.recent_durations()).await
    }

    pub async fn quick_select(&self, session_type: SessionType) -> Result<Vec<u64>> {
        self.run(move |t| t.quick_select(session_type)).await
    }
}
