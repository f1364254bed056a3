//! Daily check-in quota.
//!
//! Every user gets [`CHECKIN_BASE_LIMIT`] check-ins per local day, plus one more
//! for each full bonus interval of focus time logged that day.
//!
//! Creation runs its lock check, quota check and insert inside a single
//! `BEGIN IMMEDIATE` transaction, so concurrent callers on separate
//! connections are serialised by SQLite and cannot both take the last slot.
//! The per-day lock row is still written inside that transaction and cleared
//! afterwards; a caller that finds a lock younger than [`LOCK_TTL_SECS`] backs
//! off with `Busy`.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::range::today_range;
use crate::session::{NewSession, Session, SessionId, SessionType, UserId};
use crate::settings::get_settings_or_default;
use crate::storage::{Database, LockRecord, SessionQuery};

pub const CHECKIN_BASE_LIMIT: u32 = 3;

/// Lock rows older than this are considered abandoned.
pub const LOCK_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinAllowance {
    pub allowed: bool,
    pub used: u32,
    pub limit: u32,
    pub minutes_to_next_bonus: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinCreated {
    pub session_id: SessionId,
}

/// Quota for one day's sessions, without touching the store.
pub fn compute_allowance(today: &[Session], bonus_interval_minutes: u32) -> CheckinAllowance {
    let interval = bonus_interval_minutes.max(1) as u64;
    let mut focus_seconds = 0u64;
    let mut used = 0u32;
    for session in today {
        match session.session_type {
            SessionType::Focus => focus_seconds += session.duration,
            SessionType::Checkin => used += 1,
            SessionType::Break | SessionType::Cooloff => {}
        }
    }

    let bonus = focus_seconds / (interval * 60);
    let limit = CHECKIN_BASE_LIMIT.saturating_add(u32::try_from(bonus).unwrap_or(u32::MAX));
    let into_interval = (focus_seconds / 60) % interval;

    CheckinAllowance {
        allowed: used < limit,
        used,
        limit,
        minutes_to_next_bonus: (interval - into_interval) as u32,
    }
}

/// Per-user, per-local-day lock key.
pub fn lock_key(user: &UserId, day: NaiveDate) -> String {
    format!("lock:{user}:{}", day.format("%Y-%m-%d"))
}

pub fn can_check_in(db: &Database, user: &UserId) -> Result<CheckinAllowance> {
    let settings = get_settings_or_default(db, user);
    let today = today_range(db.clock().now());
    let sessions = db.query_sessions(user, &SessionQuery::completed_in(today))?;
    Ok(compute_allowance(&sessions, settings.checkin_bonus_interval))
}

/// Record a check-in if today's quota allows it.
///
/// # Errors
/// - `Busy` if another check-in for this user and day holds a fresh lock.
/// - `LimitExceeded` if the quota is used up; nothing is written.
/// - `Transient` if the store fails or stays locked past the busy timeout.
pub fn create_checkin(db: &Database, user: &UserId) -> Result<CheckinCreated> {
    let settings = get_settings_or_default(db, user);
    let now = db.clock().now();
    let now_utc = now.with_timezone(&Utc);
    let key = lock_key(user, now.date_naive());
    let owner = uuid::Uuid::new_v4().to_string();
    let today = today_range(now);

    let session = db.immediate_transaction(|tx| {
        if let Some(existing) = tx.read_lock(&key)? {
            if now_utc - existing.acquired_at < Duration::seconds(LOCK_TTL_SECS) {
                tracing::debug!(key = %key, holder = %existing.owner, "check-in lock held");
                return Err(CoreError::Busy);
            }
            tracing::debug!(key = %key, "taking over stale check-in lock");
        }
        tx.write_lock(&LockRecord {
            key: key.clone(),
            acquired_at: now_utc,
            owner: owner.clone(),
        })?;

        let sessions = tx.query_sessions(user, &SessionQuery::completed_in(today))?;
        let allowance = compute_allowance(&sessions, settings.checkin_bonus_interval);
        if !allowance.allowed {
            return Err(CoreError::LimitExceeded {
                used: allowance.used,
                limit: allowance.limit,
            });
        }
        tx.insert_session(user, &NewSession::checkin(now_utc))
    })?;

    if let Err(e) = db.release_lock(&key, &owner) {
        tracing::warn!(key = %key, "failed to release check-in lock: {e}");
    }
    tracing::info!(session = %session.id, user = %user, "check-in recorded");

    Ok(CheckinCreated {
        session_id: session.id,
    })
}
