//! Countdown state machine.
//!
//! Remaining and overrun time are recomputed on every tick from the stored
//! `start_time` and `completed_at`, never decremented, so a late or skipped
//! tick corrects itself on the next one. Like the rest of the core it does
//! not run on its own: call `tick()` periodically (see [`super::Ticker`]).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Exceeded -> Idle
//!           \-----> Idle (stop/reset)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{SessionId, SessionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    /// Planned time is up; counting how far past it we are.
    Exceeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    Started {
        session_id: SessionId,
        mode: SessionType,
        total_seconds: u64,
        remaining_seconds: u64,
    },
    /// Reached zero. Emitted once per run.
    Completed {
        session_id: SessionId,
        mode: SessionType,
        at: DateTime<Utc>,
    },
    /// Stopped while running; the caller decides between partial save and cancel.
    Stopped {
        session_id: SessionId,
        elapsed_seconds: u64,
    },
    /// Stopped while exceeded; the session is already complete and only needs dismissing.
    Dismissed { session_id: SessionId },
    Reset,
}

/// Countdown over one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    state: TimerState,
    mode: SessionType,
    total_seconds: u64,
    remaining_seconds: u64,
    exceeded_seconds: u64,
    session_id: Option<SessionId>,
    start_time: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            mode: SessionType::Focus,
            total_seconds: 0,
            remaining_seconds: 0,
            exceeded_seconds: 0,
            session_id: None,
            start_time: None,
            completed_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> SessionType {
        self.mode
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn exceeded_seconds(&self) -> u64 {
        self.exceeded_seconds
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.total_seconds.saturating_sub(self.remaining_seconds)
    }

    /// 0.0 .. 1.0 through the planned duration.
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        (self.elapsed_seconds() as f64 / self.total_seconds as f64).clamp(0.0, 1.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down a freshly created session.
    ///
    /// Ignored while another session is running or exceeded.
    pub fn start(
        &mut self,
        mode: SessionType,
        total_seconds: u64,
        session_id: SessionId,
        start_time: DateTime<Utc>,
    ) -> Option<TimerEvent> {
        self.resume(mode, total_seconds, total_seconds, session_id, start_time)
    }

    /// Pick up a session that was already running, e.g. after recovery.
    pub fn resume(
        &mut self,
        mode: SessionType,
        remaining_seconds: u64,
        total_seconds: u64,
        session_id: SessionId,
        start_time: DateTime<Utc>,
    ) -> Option<TimerEvent> {
        if self.state != TimerState::Idle {
            return None;
        }
        self.state = TimerState::Running;
        self.mode = mode;
        self.total_seconds = total_seconds;
        self.remaining_seconds = remaining_seconds.min(total_seconds);
        self.exceeded_seconds = 0;
        self.session_id = Some(session_id.clone());
        self.start_time = Some(start_time);
        self.completed_at = None;
        Some(TimerEvent::Started {
            session_id,
            mode,
            total_seconds,
            remaining_seconds: self.remaining_seconds,
        })
    }

    /// Show an overrun reported by recovery.
    pub fn enter_exceeded(
        &mut self,
        mode: SessionType,
        total_seconds: u64,
        session_id: SessionId,
        completed_at: DateTime<Utc>,
        exceeded_seconds: u64,
    ) {
        self.state = TimerState::Exceeded;
        self.mode = mode;
        self.total_seconds = total_seconds;
        self.remaining_seconds = 0;
        self.exceeded_seconds = exceeded_seconds;
        self.session_id = Some(session_id);
        self.start_time = None;
        self.completed_at = Some(completed_at);
    }

    /// Call periodically. Returns `Some(TimerEvent::Completed)` when the countdown hits zero.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<TimerEvent> {
        match self.state {
            TimerState::Running => {
                let start = self.start_time?;
                let elapsed = (now - start).num_milliseconds().max(0) as f64 / 1000.0;
                let remaining = (self.total_seconds as f64 - elapsed).ceil().max(0.0);
                self.remaining_seconds = remaining as u64;
                if self.remaining_seconds > 0 {
                    return None;
                }
                self.state = TimerState::Exceeded;
                self.completed_at = Some(now);
                self.exceeded_seconds = 0;
                Some(TimerEvent::Completed {
                    session_id: self.session_id.clone()?,
                    mode: self.mode,
                    at: now,
                })
            }
            TimerState::Exceeded => {
                if let Some(done) = self.completed_at {
                    self.exceeded_seconds = (now - done).num_seconds().max(0) as u64;
                }
                None
            }
            TimerState::Idle => None,
        }
    }

    /// Stop whatever is showing and return to idle.
    pub fn stop(&mut self) -> Option<TimerEvent> {
        let event = match self.state {
            TimerState::Idle => return None,
            TimerState::Running => TimerEvent::Stopped {
                session_id: self.session_id.clone()?,
                elapsed_seconds: self.elapsed_seconds(),
            },
            TimerState::Exceeded => TimerEvent::Dismissed {
                session_id: self.session_id.clone()?,
            },
        };
        self.clear();
        Some(event)
    }

    pub fn reset(&mut self) -> Option<TimerEvent> {
        self.clear();
        Some(TimerEvent::Reset)
    }

    fn clear(&mut self) {
        let mode = self.mode;
        *self = Self::new();
        self.mode = mode;
    }
}
