//! Session records and identity types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque, stable user identifier handed out by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub(crate) fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Focus,
    Break,
    Checkin,
    Cooloff,
}

impl SessionType {
    pub const ALL: [SessionType; 4] = [
        SessionType::Focus,
        SessionType::Break,
        SessionType::Checkin,
        SessionType::Cooloff,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SessionType::Focus => "focus",
            SessionType::Break => "break",
            SessionType::Checkin => "checkin",
            SessionType::Cooloff => "cooloff",
        }
    }

    /// Timed intervals that can run past their planned end.
    pub fn is_timed(self) -> bool {
        match self {
            SessionType::Focus | SessionType::Break | SessionType::Cooloff => true,
            SessionType::Checkin => false,
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(SessionType::Focus),
            "break" => Ok(SessionType::Break),
            "checkin" => Ok(SessionType::Checkin),
            "cooloff" => Ok(SessionType::Cooloff),
            other => Err(format!("unknown session type: {other}")),
        }
    }
}

/// One timed interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub start_time: DateTime<Utc>,
    /// Planned length in seconds, or actual elapsed seconds after a partial save.
    pub duration: u64,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub completed: bool,
    pub interrupted: bool,
    pub dismissed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Seconds elapsed since `start_time`, fractional.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> f64 {
        (now - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

/// Fields the caller chooses when inserting; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub start_time: DateTime<Utc>,
    pub duration: u64,
    pub session_type: SessionType,
    pub completed: bool,
    pub interrupted: bool,
    pub dismissed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl NewSession {
    /// A running timer starting at `now`.
    pub fn active(session_type: SessionType, duration: u64, now: DateTime<Utc>) -> Self {
        Self {
            start_time: now,
            duration,
            session_type,
            completed: false,
            interrupted: false,
            dismissed: false,
            completed_at: None,
        }
    }

    /// An instant check-in: zero duration, completed on creation.
    pub fn checkin(now: DateTime<Utc>) -> Self {
        Self {
            start_time: now,
            duration: 0,
            session_type: SessionType::Checkin,
            completed: true,
            interrupted: false,
            dismissed: false,
            completed_at: Some(now),
        }
    }

    /// A statistics adjustment that never shows up as pending or exceeded.
    pub fn manual(session_type: SessionType, duration: u64, now: DateTime<Utc>) -> Self {
        Self {
            start_time: now,
            duration,
            session_type,
            completed: true,
            interrupted: false,
            dismissed: true,
            completed_at: Some(now),
        }
    }
}

/// Partial-merge update; `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPatch {
    pub duration: Option<u64>,
    pub completed: Option<bool>,
    pub interrupted: Option<bool>,
    pub dismissed: Option<bool>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SessionPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
