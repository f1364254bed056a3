pub mod checkin;
pub mod config;
pub mod durations;
pub mod session;
pub mod settings;
pub mod stats;

use std::sync::Arc;

use focusroom_core::{Config, CoreError, Database, SessionType, Tracker, UserId};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Loaded configuration plus the `--user` flag, shared by all subcommands.
pub struct Context {
    config: Config,
    user_flag: Option<String>,
}

impl Context {
    pub fn new(config: Config, user_flag: Option<String>) -> Self {
        Self { config, user_flag }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn user(&self) -> Option<UserId> {
        self.user_flag
            .clone()
            .or_else(|| std::env::var("FOCUSROOM_USER").ok())
            .or_else(|| self.config.user_id.clone())
            .filter(|id| !id.trim().is_empty())
            .map(UserId::new)
    }

    /// Open the database and bind it to the resolved user.
    pub fn tracker(&self) -> Result<Tracker, CoreError> {
        let path = self.config.database_path()?;
        tracing::debug!(path = %path.display(), "opening database");
        let db = Database::open_path(&path)?;
        Ok(Tracker::new(
            Arc::new(db),
            self.config.presets.clone(),
            self.user(),
        ))
    }
}

pub fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `--type` values.
pub fn parse_session_type(s: &str) -> Result<SessionType, String> {
    s.parse()
}

/// `[[h:]m:]s` durations for `--duration`.
pub fn parse_duration_arg(s: &str) -> Result<u64, String> {
    focusroom_core::parse_duration(s).ok_or_else(|| format!("invalid duration '{s}', expected [[h:]m:]s"))
}
