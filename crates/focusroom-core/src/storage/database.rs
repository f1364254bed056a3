//! SQLite-based session storage.
//!
//! Provides persistent storage for:
//! - Session records, scoped per user
//! - Per-user settings rows
//! - Check-in lock records
//! - Key-value store for small per-user lists

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration as StdDuration;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use super::{data_dir, migrations};
use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, DatabaseError, Result};
use crate::range::DateRange;
use crate::session::{NewSession, Session, SessionId, SessionPatch, SessionType, UserId};

const BUSY_TIMEOUT: StdDuration = StdDuration::from_secs(5);

const SESSION_COLUMNS: &str = "id, session_type, duration, start_time, completed, interrupted,
     dismissed, completed_at, created_at";

/// Sort order for [`SessionQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrder {
    StartTimeDesc,
    CompletedAtDesc,
    CreatedAtAsc,
}

impl SessionOrder {
    fn sql(self) -> &'static str {
        match self {
            SessionOrder::StartTimeDesc => "start_time DESC",
            SessionOrder::CompletedAtDesc => "completed_at DESC",
            SessionOrder::CreatedAtAsc => "created_at ASC",
        }
    }
}

/// Field filters, ordering and limit over one user's sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionQuery {
    pub completed: Option<bool>,
    pub types: Option<Vec<SessionType>>,
    pub interrupted: Option<bool>,
    pub dismissed: Option<bool>,
    /// Inclusive bounds on `created_at`.
    pub created_between: Option<DateRange>,
    pub completed_since: Option<DateTime<Utc>>,
    pub order: Option<SessionOrder>,
    pub limit: Option<usize>,
}

impl SessionQuery {
    /// Completed sessions created within `range`.
    pub fn completed_in(range: DateRange) -> Self {
        Self {
            completed: Some(true),
            created_between: Some(range),
            order: Some(SessionOrder::CreatedAtAsc),
            ..Self::default()
        }
    }

    fn to_sql(&self) -> (String, Vec<Value>) {
        let mut sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = ?");
        let mut values = Vec::new();

        if let Some(completed) = self.completed {
            sql.push_str(" AND completed = ?");
            values.push(Value::Integer(completed as i64));
        }
        if let Some(types) = &self.types {
            let marks = vec!["?"; types.len()].join(", ");
            sql.push_str(&format!(" AND session_type IN ({marks})"));
            values.extend(types.iter().map(|t| Value::Text(t.as_str().to_string())));
        }
        if let Some(interrupted) = self.interrupted {
            sql.push_str(" AND interrupted = ?");
            values.push(Value::Integer(interrupted as i64));
        }
        if let Some(dismissed) = self.dismissed {
            sql.push_str(" AND dismissed = ?");
            values.push(Value::Integer(dismissed as i64));
        }
        if let Some(range) = &self.created_between {
            sql.push_str(" AND created_at >= ? AND created_at <= ?");
            values.push(Value::Text(ts(&range.start)));
            values.push(Value::Text(ts(&range.end)));
        }
        if let Some(since) = &self.completed_since {
            sql.push_str(" AND completed_at IS NOT NULL AND completed_at >= ?");
            values.push(Value::Text(ts(since)));
        }
        if let Some(order) = self.order {
            sql.push_str(" ORDER BY ");
            sql.push_str(order.sql());
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        (sql, values)
    }
}

/// A check-in lock row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockRecord {
    pub key: String,
    pub acquired_at: DateTime<Utc>,
    pub owner: String,
}

/// Stored settings columns before normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsRow {
    pub checkin_bonus_interval: i64,
    pub settings_locked: bool,
}

/// SQLite database for session storage.
///
/// The connection sits behind a mutex so one `Database` can be shared across
/// threads; separate `Database` values opened on the same file serialise their
/// writes through SQLite's own locking.
pub struct Database {
    conn: Mutex<Connection>,
    clock: Arc<dyn Clock>,
    last_created_at: Mutex<Option<DateTime<Utc>>>,
}

impl Database {
    /// Open the database at `<data_dir>/focusroom.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("focusroom.db");
        Self::open_path(&path)
    }

    /// Open (or create) a database file at `path`.
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT).map_err(DatabaseError::from)?;
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
            clock: Arc::new(SystemClock),
            last_created_at: Mutex::new(None),
        })
    }

    /// Replace the clock used to stamp `created_at`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DatabaseError::QueryFailed("connection mutex poisoned".into()).into())
    }

    /// Store-assigned creation instant, never earlier than the previous one.
    fn next_created_at(&self) -> DateTime<Utc> {
        let now = self.clock.now_utc();
        let mut last = self
            .last_created_at
            .lock()
            .unwrap_or_else(|p| p.into_inner());
        let assigned = match *last {
            Some(prev) if prev > now => prev,
            _ => now,
        };
        *last = Some(assigned);
        assigned
    }

    // ── Sessions ─────────────────────────────────────────────────────

    /// Insert a session; the store assigns `id` and `created_at`.
    pub fn insert_session(&self, user: &UserId, new: &NewSession) -> Result<Session> {
        let conn = self.conn()?;
        insert_session_row(&conn, user, new, self.next_created_at())
    }

    pub fn get_session(&self, user: &UserId, id: &SessionId) -> Result<Option<Session>> {
        let conn = self.conn()?;
        let raw = conn
            .query_row(
                &format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = ?1 AND id = ?2"),
                params![user.as_str(), id.as_str()],
                RawSession::from_row,
            )
            .optional()?;
        raw.map(RawSession::into_session).transpose()
    }

    /// Partial-merge update.
    ///
    /// # Errors
    /// `NotFound` if the session does not exist for this user.
    pub fn update_session(&self, user: &UserId, id: &SessionId, patch: &SessionPatch) -> Result<()> {
        if patch.is_empty() {
            let conn = self.conn()?;
            let exists = conn
                .query_row(
                    "SELECT 1 FROM sessions WHERE user_id = ?1 AND id = ?2",
                    params![user.as_str(), id.as_str()],
                    |_| Ok(()),
                )
                .optional()?;
            return exists.ok_or_else(|| CoreError::NotFound { id: id.clone() });
        }

        let mut sets = Vec::new();
        let mut values = Vec::new();
        if let Some(duration) = patch.duration {
            sets.push("duration = ?");
            values.push(Value::Integer(duration as i64));
        }
        if let Some(completed) = patch.completed {
            sets.push("completed = ?");
            values.push(Value::Integer(completed as i64));
        }
        if let Some(interrupted) = patch.interrupted {
            sets.push("interrupted = ?");
            values.push(Value::Integer(interrupted as i64));
        }
        if let Some(dismissed) = patch.dismissed {
            sets.push("dismissed = ?");
            values.push(Value::Integer(dismissed as i64));
        }
        if let Some(completed_at) = &patch.completed_at {
            sets.push("completed_at = ?");
            values.push(Value::Text(ts(completed_at)));
        }

        let sql = format!(
            "UPDATE sessions SET {} WHERE user_id = ? AND id = ?",
            sets.join(", ")
        );
        values.push(Value::Text(user.as_str().to_string()));
        values.push(Value::Text(id.as_str().to_string()));

        let changed = self.conn()?.execute(&sql, params_from_iter(values))?;
        tracing::debug!(session = %id, changed, "session updated");
        if changed == 0 {
            return Err(CoreError::NotFound { id: id.clone() });
        }
        Ok(())
    }

    /// # Errors
    /// `NotFound` if the session does not exist for this user.
    pub fn delete_session(&self, user: &UserId, id: &SessionId) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM sessions WHERE user_id = ?1 AND id = ?2",
            params![user.as_str(), id.as_str()],
        )?;
        if changed == 0 {
            return Err(CoreError::NotFound { id: id.clone() });
        }
        Ok(())
    }

    pub fn query_sessions(&self, user: &UserId, query: &SessionQuery) -> Result<Vec<Session>> {
        let conn = self.conn()?;
        select_sessions(&conn, user, query)
    }

    // ── Transactions ─────────────────────────────────────────────────

    /// Run `f` inside `BEGIN IMMEDIATE`, committing on `Ok` and rolling back on `Err`.
    ///
    /// The write lock is taken before `f` reads anything, so two callers on
    /// different connections cannot interleave their read-check-write steps.
    pub fn immediate_transaction<T>(&self, f: impl FnOnce(&TxContext<'_>) -> Result<T>) -> Result<T> {
        let conn = self.conn()?;
        conn.execute_batch("BEGIN IMMEDIATE TRANSACTION;")?;
        let ctx = TxContext { conn: &*conn, db: self };
        match f(&ctx) {
            Ok(value) => {
                if let Err(err) = conn.execute_batch("COMMIT;") {
                    let _ = conn.execute_batch("ROLLBACK;");
                    return Err(err.into());
                }
                Ok(value)
            }
            Err(err) => {
                let _ = conn.execute_batch("ROLLBACK;");
                Err(err)
            }
        }
    }

    /// Remove a lock row, but only if `owner` still holds it.
    pub fn release_lock(&self, key: &str, owner: &str) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM checkin_locks WHERE key = ?1 AND owner = ?2",
            params![key, owner],
        )?;
        Ok(changed > 0)
    }

    pub fn get_lock(&self, key: &str) -> Result<Option<LockRecord>> {
        let conn = self.conn()?;
        read_lock(&conn, key)
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn load_settings_row(&self, user: &UserId) -> Result<Option<SettingsRow>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT checkin_bonus_interval, settings_locked FROM user_settings WHERE user_id = ?1",
                params![user.as_str()],
                |row| {
                    Ok(SettingsRow {
                        checkin_bonus_interval: row.get(0)?,
                        settings_locked: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    pub fn save_settings_row(&self, user: &UserId, row: SettingsRow) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO user_settings (user_id, checkin_bonus_interval, settings_locked, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id) DO UPDATE SET
                checkin_bonus_interval = excluded.checkin_bonus_interval,
                settings_locked = excluded.settings_locked,
                updated_at = excluded.updated_at",
            params![
                user.as_str(),
                row.checkin_bonus_interval,
                row.settings_locked,
                ts(&self.clock.now_utc()),
            ],
        )?;
        Ok(())
    }

    // ── Key-value ────────────────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Raw SQL against the connection, for tests that damage the schema.
    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn()?.execute_batch(sql)?;
        Ok(())
    }
}

/// Operations available inside [`Database::immediate_transaction`].
pub struct TxContext<'a> {
    conn: &'a Connection,
    db: &'a Database,
}

impl TxContext<'_> {
    pub fn query_sessions(&self, user: &UserId, query: &SessionQuery) -> Result<Vec<Session>> {
        select_sessions(self.conn, user, query)
    }

    pub fn insert_session(&self, user: &UserId, new: &NewSession) -> Result<Session> {
        insert_session_row(self.conn, user, new, self.db.next_created_at())
    }

    pub fn read_lock(&self, key: &str) -> Result<Option<LockRecord>> {
        read_lock(self.conn, key)
    }

    pub fn write_lock(&self, lock: &LockRecord) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO checkin_locks (key, acquired_at, owner) VALUES (?1, ?2, ?3)",
            params![lock.key, ts(&lock.acquired_at), lock.owner],
        )?;
        Ok(())
    }
}

fn insert_session_row(
    conn: &Connection,
    user: &UserId,
    new: &NewSession,
    created_at: DateTime<Utc>,
) -> Result<Session> {
    let id = SessionId::generate();
    conn.execute(
        "INSERT INTO sessions (id, user_id, session_type, duration, start_time, completed,
                               interrupted, dismissed, completed_at, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id.as_str(),
            user.as_str(),
            new.session_type.as_str(),
            new.duration as i64,
            ts(&new.start_time),
            new.completed,
            new.interrupted,
            new.dismissed,
            new.completed_at.as_ref().map(ts),
            ts(&created_at),
        ],
    )?;
    tracing::debug!(session = %id, user = %user, kind = %new.session_type, "session inserted");

    Ok(Session {
        id,
        start_time: truncate(new.start_time),
        duration: new.duration,
        session_type: new.session_type,
        completed: new.completed,
        interrupted: new.interrupted,
        dismissed: new.dismissed,
        completed_at: new.completed_at.map(truncate),
        created_at: truncate(created_at),
    })
}

fn select_sessions(conn: &Connection, user: &UserId, query: &SessionQuery) -> Result<Vec<Session>> {
    let (sql, mut values) = query.to_sql();
    values.insert(0, Value::Text(user.as_str().to_string()));

    let mut stmt = conn.prepare(&sql)?;
    let raws = stmt
        .query_map(params_from_iter(values), RawSession::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    raws.into_iter().map(RawSession::into_session).collect()
}

fn read_lock(conn: &Connection, key: &str) -> Result<Option<LockRecord>> {
    let raw = conn
        .query_row(
            "SELECT key, acquired_at, owner FROM checkin_locks WHERE key = ?1",
            params![key],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;
    raw.map(|(key, acquired_at, owner)| {
        Ok(LockRecord {
            key,
            acquired_at: parse_ts("checkin_locks", &acquired_at)?,
            owner,
        })
    })
    .transpose()
}

/// Column values as stored, before timestamp and enum decoding.
struct RawSession {
    id: String,
    session_type: String,
    duration: i64,
    start_time: String,
    completed: bool,
    interrupted: bool,
    dismissed: bool,
    completed_at: Option<String>,
    created_at: String,
}

impl RawSession {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            session_type: row.get(1)?,
            duration: row.get(2)?,
            start_time: row.get(3)?,
            completed: row.get(4)?,
            interrupted: row.get(5)?,
            dismissed: row.get(6)?,
            completed_at: row.get(7)?,
            created_at: row.get(8)?,
        })
    }

    fn into_session(self) -> Result<Session> {
        let session_type = self
            .session_type
            .parse::<SessionType>()
            .map_err(|message| corrupt("sessions", message))?;
        Ok(Session {
            id: SessionId::from(self.id),
            start_time: parse_ts("sessions", &self.start_time)?,
            duration: u64::try_from(self.duration)
                .map_err(|_| corrupt("sessions", format!("negative duration {}", self.duration)))?,
            session_type,
            completed: self.completed,
            interrupted: self.interrupted,
            dismissed: self.dismissed,
            completed_at: self
                .completed_at
                .as_deref()
                .map(|s| parse_ts("sessions", s))
                .transpose()?,
            created_at: parse_ts("sessions", &self.created_at)?,
        })
    }
}

fn corrupt(table: &str, message: impl Into<String>) -> CoreError {
    DatabaseError::CorruptRow {
        table: table.to_string(),
        message: message.into(),
    }
    .into()
}

/// Fixed-width UTC text so string comparison follows time order.
fn ts(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_ts(table: &str, text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| corrupt(table, format!("bad timestamp '{text}': {e}")))
}

/// Drop sub-millisecond precision, matching what a read returns.
fn truncate(at: DateTime<Utc>) -> DateTime<Utc> {
    let millis = at.timestamp_millis();
    DateTime::from_timestamp_millis(millis).unwrap_or(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::Duration;

    fn test_db() -> (Database, Arc<ManualClock>) {
        let start = DateTime::parse_from_rfc3339("2026-03-11T12:00:00+00:00").unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let db = Database::open_memory().unwrap().with_clock(clock.clone());
        (db, clock)
    }

    fn user() -> UserId {
        UserId::new("u1")
    }

    #[test]
    fn insert_and_get_round_trip() {
        let (db, clock) = test_db();
        let new = NewSession::active(SessionType::Focus, 1500, clock.now_utc());
        let created = db.insert_session(&user(), &new).unwrap();
        let fetched = db.get_session(&user(), &created.id).unwrap().unwrap();
        assert_eq!(created, fetched);
        assert!(!fetched.completed);
        assert_eq!(fetched.created_at, clock.now_utc());
    }

    #[test]
    fn sessions_are_scoped_per_user() {
        let (db, clock) = test_db();
        let new = NewSession::active(SessionType::Break, 300, clock.now_utc());
        let created = db.insert_session(&user(), &new).unwrap();
        assert!(db.get_session(&UserId::new("u2"), &created.id).unwrap().is_none());
    }

    #[test]
    fn patch_merges_only_given_fields() {
        let (db, clock) = test_db();
        let created = db
            .insert_session(&user(), &NewSession::active(SessionType::Focus, 1500, clock.now_utc()))
            .unwrap();
        db.update_session(
            &user(),
            &created.id,
            &SessionPatch {
                dismissed: Some(true),
                ..SessionPatch::default()
            },
        )
        .unwrap();
        let fetched = db.get_session(&user(), &created.id).unwrap().unwrap();
        assert!(fetched.dismissed);
        assert!(!fetched.completed);
        assert_eq!(fetched.duration, 1500);
    }

    #[test]
    fn empty_patch_only_checks_existence() {
        let (db, clock) = test_db();
        let new = NewSession::active(SessionType::Focus, 1500, clock.now_utc());
        let inserted = db.insert_session(&user(), &new).unwrap();
        assert!(SessionPatch::default().is_empty());
        db.update_session(&user(), &inserted.id, &SessionPatch::default())
            .unwrap();
        assert_eq!(db.get_session(&user(), &inserted.id).unwrap(), Some(inserted));
    }

    #[test]
    fn update_and_delete_report_missing_ids() {
        let (db, _) = test_db();
        let missing = SessionId::from("nope");
        let patch = SessionPatch {
            completed: Some(true),
            ..SessionPatch::default()
        };
        assert!(matches!(
            db.update_session(&user(), &missing, &patch),
            Err(CoreError::NotFound { .. })
        ));
        assert!(matches!(
            db.update_session(&user(), &missing, &SessionPatch::default()),
            Err(CoreError::NotFound { .. })
        ));
        assert!(matches!(
            db.delete_session(&user(), &missing),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn query_filters_and_orders() {
        let (db, clock) = test_db();
        let now = clock.now_utc();
        db.insert_session(&user(), &NewSession::manual(SessionType::Focus, 600, now))
            .unwrap();
        clock.advance(Duration::minutes(1));
        db.insert_session(&user(), &NewSession::checkin(clock.now_utc()))
            .unwrap();
        clock.advance(Duration::minutes(1));
        db.insert_session(&user(), &NewSession::active(SessionType::Break, 300, clock.now_utc()))
            .unwrap();

        let range = DateRange {
            start: now - Duration::hours(1),
            end: now + Duration::hours(1),
        };
        let completed = db.query_sessions(&user(), &SessionQuery::completed_in(range)).unwrap();
        assert_eq!(completed.len(), 2);
        assert_eq!(completed[0].session_type, SessionType::Focus);
        assert_eq!(completed[1].session_type, SessionType::Checkin);

        let latest_active = db
            .query_sessions(
                &user(),
                &SessionQuery {
                    completed: Some(false),
                    order: Some(SessionOrder::StartTimeDesc),
                    limit: Some(1),
                    ..SessionQuery::default()
                },
            )
            .unwrap();
        assert_eq!(latest_active.len(), 1);
        assert_eq!(latest_active[0].session_type, SessionType::Break);

        let timed = db
            .query_sessions(
                &user(),
                &SessionQuery {
                    types: Some(vec![SessionType::Focus, SessionType::Cooloff]),
                    ..SessionQuery::default()
                },
            )
            .unwrap();
        assert_eq!(timed.len(), 1);
    }

    #[test]
    fn created_at_never_goes_backwards() {
        let (db, clock) = test_db();
        let first = db
            .insert_session(&user(), &NewSession::checkin(clock.now_utc()))
            .unwrap();
        clock.advance(-Duration::minutes(5));
        let second = db
            .insert_session(&user(), &NewSession::checkin(clock.now_utc()))
            .unwrap();
        assert!(second.created_at >= first.created_at);
    }

    #[test]
    fn transaction_rolls_back_on_error() {
        let (db, clock) = test_db();
        let result: Result<()> = db.immediate_transaction(|tx| {
            tx.insert_session(&user(), &NewSession::checkin(clock.now_utc()))?;
            Err(CoreError::Busy)
        });
        assert!(matches!(result, Err(CoreError::Busy)));
        let all = db.query_sessions(&user(), &SessionQuery::default()).unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn lock_release_requires_owner() {
        let (db, clock) = test_db();
        let lock = LockRecord {
            key: "lock:u1:2026-03-11".into(),
            acquired_at: clock.now_utc(),
            owner: "a".into(),
        };
        db.immediate_transaction(|tx| tx.write_lock(&lock)).unwrap();
        assert!(!db.release_lock(&lock.key, "b").unwrap());
        assert!(db.get_lock(&lock.key).unwrap().is_some());
        assert!(db.release_lock(&lock.key, "a").unwrap());
        assert!(db.get_lock(&lock.key).unwrap().is_none());
    }

    #[test]
    fn kv_store() {
        let (db, _) = test_db();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }
}
