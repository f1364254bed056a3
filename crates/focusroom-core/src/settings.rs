//! Per-user settings.
//!
//! Settings are created with defaults on first read. The lock flag is a
//! confirmation step in front of changing the bonus interval; it is not an
//! access-control boundary.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::session::UserId;
use crate::storage::{Database, SettingsRow};

/// Bonus intervals, in minutes, a user may pick.
pub const CHECKIN_INTERVAL_OPTIONS: [u32; 6] = [10, 15, 20, 25, 30, 45];

pub const DEFAULT_CHECKIN_BONUS_INTERVAL: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub checkin_bonus_interval: u32,
    pub settings_locked: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            checkin_bonus_interval: DEFAULT_CHECKIN_BONUS_INTERVAL,
            settings_locked: true,
        }
    }
}

impl UserSettings {
    fn from_row(row: SettingsRow) -> Self {
        Self {
            checkin_bonus_interval: normalize_interval(row.checkin_bonus_interval),
            settings_locked: row.settings_locked,
        }
    }

    fn to_row(self) -> SettingsRow {
        SettingsRow {
            checkin_bonus_interval: self.checkin_bonus_interval as i64,
            settings_locked: self.settings_locked,
        }
    }
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub checkin_bonus_interval: Option<u32>,
    pub settings_locked: Option<bool>,
}

pub fn is_valid_interval(minutes: u32) -> bool {
    CHECKIN_INTERVAL_OPTIONS.contains(&minutes)
}

/// Stale or out-of-range stored values fall back to the default.
fn normalize_interval(stored: i64) -> u32 {
    match u32::try_from(stored) {
        Ok(minutes) if is_valid_interval(minutes) => minutes,
        _ => {
            tracing::debug!(stored, "normalizing invalid bonus interval");
            DEFAULT_CHECKIN_BONUS_INTERVAL
        }
    }
}

/// Read settings, inserting defaults for a user seen for the first time.
pub fn get_settings(db: &Database, user: &UserId) -> Result<UserSettings> {
    match db.load_settings_row(user)? {
        Some(row) => Ok(UserSettings::from_row(row)),
        None => {
            let defaults = UserSettings::default();
            db.save_settings_row(user, defaults.to_row())?;
            tracing::info!(user = %user, "created default settings");
            Ok(defaults)
        }
    }
}

/// Like [`get_settings`], but a failing store yields defaults.
pub fn get_settings_or_default(db: &Database, user: &UserId) -> UserSettings {
    get_settings(db, user).unwrap_or_else(|e| {
        tracing::warn!(user = %user, "failed to load settings, using defaults: {e}");
        UserSettings::default()
    })
}

/// Merge `patch` into the stored settings.
///
/// Changing the interval needs the settings to be unlocked, either already or
/// by the same patch.
///
/// # Errors
/// `InvalidArgument` for an interval outside [`CHECKIN_INTERVAL_OPTIONS`] or a
/// change attempted while locked.
pub fn update_settings(db: &Database, user: &UserId, patch: SettingsPatch) -> Result<UserSettings> {
    let current = get_settings(db, user)?;
    let mut next = current;

    if let Some(locked) = patch.settings_locked {
        next.settings_locked = locked;
    }

    if let Some(minutes) = patch.checkin_bonus_interval {
        if !is_valid_interval(minutes) {
            return Err(CoreError::invalid(
                "checkin_bonus_interval",
                format!("must be one of {CHECKIN_INTERVAL_OPTIONS:?}"),
            ));
        }
        if minutes != current.checkin_bonus_interval && current.settings_locked && next.settings_locked {
            return Err(CoreError::invalid(
                "checkin_bonus_interval",
                "settings are locked; unlock them first",
            ));
        }
        next.checkin_bonus_interval = minutes;
    }

    if next != current {
        db.save_settings_row(user, next.to_row())?;
        tracing::info!(user = %user, ?next, "settings updated");
    }
    Ok(next)
}

pub fn unlock_settings(db: &Database, user: &UserId) -> Result<UserSettings> {
    update_settings(
        db,
        user,
        SettingsPatch {
            settings_locked: Some(false),
            ..SettingsPatch::default()
        },
    )
}

pub fn lock_settings(db: &Database, user: &UserId) -> Result<UserSettings> {
    update_settings(
        db,
        user,
        SettingsPatch {
            settings_locked: Some(true),
            ..SettingsPatch::default()
        },
    )
}
