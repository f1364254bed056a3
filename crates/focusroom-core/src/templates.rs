//! Quick-select durations: configured presets plus recently used custom values.

use crate::error::Result;
use crate::session::{SessionType, UserId};
use crate::storage::{Database, PresetsConfig};

fn recent_key(user: &UserId) -> String {
    format!("recent_durations:{user}")
}

/// Recently used custom durations, most recent first.
///
/// An unreadable stored list is treated as empty.
pub fn recent_durations(db: &Database, user: &UserId) -> Result<Vec<u64>> {
    let Some(raw) = db.kv_get(&recent_key(user))? else {
        return Ok(Vec::new());
    };
    Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(user = %user, "discarding unreadable recent durations: {e}");
        Vec::new()
    }))
}

/// Move `seconds` to the front of the recent list, keeping at most `max` entries.
pub fn add_recent_duration(db: &Database, user: &UserId, seconds: u64, max: usize) -> Result<Vec<u64>> {
    let mut recent = recent_durations(db, user)?;
    recent.retain(|&d| d != seconds);
    recent.insert(0, seconds);
    recent.truncate(max);
    db.kv_set(&recent_key(user), &serde_json::to_string(&recent)?)?;
    Ok(recent)
}

/// Only custom durations are remembered; presets are always on offer anyway.
pub fn is_recordable(presets: &PresetsConfig, session_type: SessionType, seconds: u64) -> bool {
    match session_type {
        SessionType::Checkin => false,
        SessionType::Focus | SessionType::Break | SessionType::Cooloff => {
            seconds > 0 && !presets.for_type(session_type).contains(&seconds)
        }
    }
}

/// Presets for the type followed by recent durations not already listed.
pub fn quick_select(presets: &PresetsConfig, recent: &[u64], session_type: SessionType) -> Vec<u64> {
    if session_type == SessionType::Checkin {
        return Vec::new();
    }
    let mut options = presets.for_type(session_type).to_vec();
    for &d in recent {
        if !options.contains(&d) {
            options.push(d);
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_list_is_deduplicated_and_bounded() {
        let db = Database::open_memory().unwrap();
        let user = UserId::new("u1");
        assert!(recent_durations(&db, &user).unwrap().is_empty());

        for d in [600, 1200, 600, 900, 1800, 2400, 3000] {
            add_recent_duration(&db, &user, d, 5).unwrap();
        }
        assert_eq!(
            recent_durations(&db, &user).unwrap(),
            vec![3000, 2400, 1800, 900, 600]
        );
        assert!(recent_durations(&db, &UserId::new("u2")).unwrap().is_empty());
    }

    #[test]
    fn corrupt_list_reads_as_empty() {
        let db = Database::open_memory().unwrap();
        let user = UserId::new("u1");
        db.kv_set(&recent_key(&user), "not json").unwrap();
        assert!(recent_durations(&db, &user).unwrap().is_empty());
        assert_eq!(add_recent_duration(&db, &user, 420, 5).unwrap(), vec![420]);
    }

    #[test]
    fn presets_are_not_recorded() {
        let presets = PresetsConfig::default();
        assert!(!is_recordable(&presets, SessionType::Focus, 1500));
        assert!(is_recordable(&presets, SessionType::Focus, 1200));
        assert!(!is_recordable(&presets, SessionType::Cooloff, 600));
        assert!(!is_recordable(&presets, SessionType::Checkin, 1200));
    }

    #[test]
    fn quick_select_appends_recent() {
        let presets = PresetsConfig::default();
        let recent = [1200, 300, 2700];
        assert_eq!(
            quick_select(&presets, &recent, SessionType::Focus),
            vec![1500, 2700, 3600, 1200, 300]
        );
        assert_eq!(
            quick_select(&presets, &recent, SessionType::Break),
            vec![300, 600, 900, 1200, 2700]
        );
        assert!(quick_select(&presets, &recent, SessionType::Checkin).is_empty());
    }
}
