//! # Focusroom Core Library
//!
//! Session accounting for the Focusroom productivity timer: focus, break and
//! cool-off intervals, rate-limited daily check-ins, and period statistics.
//! Frontends (the `focusroom` CLI, a desktop shell) are thin layers over this
//! crate and talk to it through [`Tracker`] or [`AsyncTracker`].
//!
//! ## Architecture
//!
//! - **Storage**: SQLite session store and TOML configuration
//! - **Sessions**: create, complete, stop early, dismiss, manual adjustments
//! - **Recovery**: decides on app entry whether to resume, finish or report an overrun
//! - **Check-ins**: daily quota grown by focus time, enforced in one transaction
//! - **Stats**: today, yesterday, this week and the four weeks before
//! - **Timer**: a wall-clock countdown that the caller ticks
//!
//! ## Key Components
//!
//! - [`Tracker`]: entry point bound to one user
//! - [`Database`]: session, settings and lock persistence
//! - [`CountdownTimer`]: countdown state machine
//! - [`Config`]: application configuration management

pub mod checkin;
pub mod clock;
pub mod duration;
pub mod error;
pub mod range;
pub mod recovery;
pub mod session;
pub mod sessions;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod templates;
pub mod timer;
pub mod tracker;

pub use checkin::{CheckinAllowance, CheckinCreated, CHECKIN_BASE_LIMIT};
pub use clock::{Clock, ManualClock, SystemClock};
pub use duration::{format_countdown, format_duration_label, format_hours_minutes, parse_duration};
pub use error::{ConfigError, CoreError, DatabaseError, ErrorKind};
pub use range::{DateRange, LabeledRange};
pub use recovery::RecoveryStatus;
pub use session::{Session, SessionId, SessionType, UserId};
pub use sessions::{StartedSession, StopOutcome};
pub use settings::{SettingsPatch, UserSettings, CHECKIN_INTERVAL_OPTIONS};
pub use stats::{StatsSummary, WeekStats};
pub use storage::{Config, Database};
pub use timer::{CountdownTimer, Ticker, TimerEvent, TimerState};
pub use tracker::{AsyncTracker, StatsOverview, Tracker};
