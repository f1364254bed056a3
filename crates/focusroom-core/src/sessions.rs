//! Session lifecycle: start, finish, stop early, acknowledge, adjust.
//!
//! "Now" comes from the database clock so `completed_at` and `created_at`
//! share one time source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::range::DateRange;
use crate::session::{NewSession, Session, SessionId, SessionPatch, SessionType, UserId};
use crate::storage::{Database, SessionQuery};

/// Returned by [`create_session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedSession {
    pub id: SessionId,
    pub start_time: DateTime<Utc>,
}

/// What [`stop_session`] did with the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopOutcome {
    SavedPartial { elapsed_seconds: u64 },
    Cancelled,
}

pub fn create_session(
    db: &Database,
    user: &UserId,
    duration: u64,
    session_type: SessionType,
) -> Result<StartedSession> {
    let now = db.clock().now_utc();
    let session = db.insert_session(user, &NewSession::active(session_type, duration, now))?;
    tracing::info!(session = %session.id, kind = %session_type, duration, "session started");
    Ok(StartedSession {
        id: session.id,
        start_time: session.start_time,
    })
}

/// Mark a timer that reached zero as finished.
pub fn complete_session(db: &Database, user: &UserId, id: &SessionId) -> Result<()> {
    let patch = SessionPatch {
        completed: Some(true),
        completed_at: Some(db.clock().now_utc()),
        ..SessionPatch::default()
    };
    db.update_session(user, id, &patch)?;
    tracing::info!(session = %id, "session completed");
    Ok(())
}

/// Delete a session stopped before anything was worth recording.
pub fn cancel_session(db: &Database, user: &UserId, id: &SessionId) -> Result<()> {
    db.delete_session(user, id)?;
    tracing::info!(session = %id, "session cancelled");
    Ok(())
}

/// Record a session stopped early, keeping only the time actually spent.
pub fn save_partial_session(
    db: &Database,
    user: &UserId,
    id: &SessionId,
    elapsed_seconds: u64,
) -> Result<()> {
    let patch = SessionPatch {
        duration: Some(elapsed_seconds),
        completed: Some(true),
        interrupted: Some(true),
        completed_at: Some(db.clock().now_utc()),
        ..SessionPatch::default()
    };
    db.update_session(user, id, &patch)?;
    tracing::info!(session = %id, elapsed_seconds, "partial session saved");
    Ok(())
}

/// User pressed stop: keep what was spent, or drop the record if nothing was.
pub fn stop_session(
    db: &Database,
    user: &UserId,
    id: &SessionId,
    elapsed_seconds: u64,
) -> Result<StopOutcome> {
    if elapsed_seconds >= 1 {
        save_partial_session(db, user, id, elapsed_seconds)?;
        Ok(StopOutcome::SavedPartial { elapsed_seconds })
    } else {
        cancel_session(db, user, id)?;
        Ok(StopOutcome::Cancelled)
    }
}

/// Acknowledge an exceeded notice. `completed` is left as is.
pub fn dismiss_session(db: &Database, user: &UserId, id: &SessionId) -> Result<()> {
    let patch = SessionPatch {
        dismissed: Some(true),
        ..SessionPatch::default()
    };
    db.update_session(user, id, &patch)
}

/// Insert finished time directly, outside the timer flow.
///
/// # Errors
/// `InvalidArgument` when `seconds <= 0` or `session_type` is a check-in.
pub fn add_manual_time(
    db: &Database,
    user: &UserId,
    session_type: SessionType,
    seconds: i64,
) -> Result<Session> {
    if !session_type.is_timed() {
        return Err(CoreError::invalid("type", "check-ins are recorded with create_checkin"));
    }
    let duration = match u64::try_from(seconds) {
        Ok(d) if d > 0 => d,
        _ => return Err(CoreError::invalid("seconds", "manual time must be positive")),
    };
    let now = db.clock().now_utc();
    let session = db.insert_session(user, &NewSession::manual(session_type, duration, now))?;
    tracing::info!(session = %session.id, kind = %session_type, duration, "manual time added");
    Ok(session)
}

/// Completed sessions whose `created_at` falls inside `range`, oldest first.
pub fn query_sessions_in_range(db: &Database, user: &UserId, range: DateRange) -> Result<Vec<Session>> {
    db.query_sessions(user, &SessionQuery::completed_in(range))
}
