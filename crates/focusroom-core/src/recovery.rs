//! Reconcile timer state on app entry.
//!
//! Nothing keeps counting while the app is closed; the running or overrun
//! state is rebuilt from `start_time` and `completed_at` each time.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::session::{Session, SessionType, UserId};
use crate::sessions::complete_session;
use crate::storage::{Database, SessionOrder, SessionQuery};

/// How far back an unacknowledged finished session still counts as exceeded.
pub const EXCEEDED_WINDOW_SECS: i64 = 2 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecoveryStatus {
    None,
    /// The active session ran out while nobody was watching and is now completed.
    Completed { session: Session },
    /// The active session is still running.
    Resume { remaining: u64, session: Session },
    /// A finished session still waits for acknowledgement.
    Exceeded { session: Session, exceeded_seconds: u64 },
}

/// Classify the user's timer state, completing an expired active session.
///
/// Calling it again without other changes gives the same answer, except that
/// a session completed by the first call is then reported as exceeded.
pub fn check_recovery(db: &Database, user: &UserId) -> Result<RecoveryStatus> {
    if let Some(status) = recover_active(db, user)? {
        return Ok(status);
    }
    if let Some(status) = find_exceeded(db, user)? {
        return Ok(status);
    }
    Ok(RecoveryStatus::None)
}

fn recover_active(db: &Database, user: &UserId) -> Result<Option<RecoveryStatus>> {
    let query = SessionQuery {
        completed: Some(false),
        order: Some(SessionOrder::StartTimeDesc),
        limit: Some(1),
        ..SessionQuery::default()
    };
    let Some(active) = db.query_sessions(user, &query)?.into_iter().next() else {
        return Ok(None);
    };

    let elapsed = active.elapsed_seconds(db.clock().now_utc());
    let duration = active.duration as f64;
    if elapsed >= duration {
        complete_session(db, user, &active.id)?;
        let session = db
            .get_session(user, &active.id)?
            .ok_or_else(|| CoreError::NotFound { id: active.id.clone() })?;
        tracing::info!(session = %session.id, "expired session completed during recovery");
        return Ok(Some(RecoveryStatus::Completed { session }));
    }

    let remaining = (duration - elapsed).ceil() as u64;
    tracing::debug!(session = %active.id, remaining, "resuming active session");
    Ok(Some(RecoveryStatus::Resume {
        remaining,
        session: active,
    }))
}

fn find_exceeded(db: &Database, user: &UserId) -> Result<Option<RecoveryStatus>> {
    let now = db.clock().now_utc();
    let query = SessionQuery {
        completed: Some(true),
        types: Some(vec![SessionType::Focus, SessionType::Break, SessionType::Cooloff]),
        interrupted: Some(false),
        dismissed: Some(false),
        completed_since: Some(now - Duration::seconds(EXCEEDED_WINDOW_SECS)),
        order: Some(SessionOrder::CompletedAtDesc),
        limit: Some(1),
        ..SessionQuery::default()
    };
    let Some(session) = db.query_sessions(user, &query)?.into_iter().next() else {
        return Ok(None);
    };
    let Some(completed_at) = session.completed_at else {
        return Ok(None);
    };

    // Clamped: a completed_at slightly ahead of this clock reads as zero.
    let exceeded_seconds = (now - completed_at).num_seconds().max(0) as u64;
    Ok(Some(RecoveryStatus::Exceeded {
        session,
        exceeded_seconds,
    }))
}
