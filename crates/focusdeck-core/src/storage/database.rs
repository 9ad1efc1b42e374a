//! SQLite-based session storage.
//!
//! Provides persistent storage for:
//! - Completed timer phases and their statistics (daily and all-time)
//! - A key-value store used by callers to keep state between invocations,
//!   e.g. persisted timer snapshots and the countdown's chosen duration

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::StorageError;
use crate::timer::TimerPhase;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub phase: String,
    pub duration_secs: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Stats {
    pub total_sessions: u64,
    pub total_work_secs: u64,
    pub total_break_secs: u64,
    pub completed_work_sessions: u64,
    pub today_sessions: u64,
    pub today_work_secs: u64,
}

fn phase_str(phase: TimerPhase) -> &'static str {
    match phase {
        TimerPhase::Work => "work",
        TimerPhase::ShortBreak => "short_break",
        TimerPhase::LongBreak => "long_break",
    }
}

/// SQLite database for completed sessions and the kv store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/focusdeck/focusdeck.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?
            .join("focusdeck.db");
        let conn = Connection::open(&path)
            .map_err(|source| StorageError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl Into<std::path::PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let conn = Connection::open(&path)
            .map_err(|source| StorageError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database, used by tests.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS sessions (
                    id            INTEGER PRIMARY KEY AUTOINCREMENT,
                    phase         TEXT NOT NULL,
                    duration_secs INTEGER NOT NULL,
                    started_at    TEXT NOT NULL,
                    completed_at  TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at);
                CREATE INDEX IF NOT EXISTS idx_sessions_phase ON sessions(phase);",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))
    }

    /// Record a completed phase.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_session(
        &self,
        phase: TimerPhase,
        duration_secs: u64,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, StorageError> {
        self.conn.execute(
            "INSERT INTO sessions (phase, duration_secs, started_at, completed_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                phase_str(phase),
                duration_secs,
                started_at.to_rfc3339(),
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn stats_today(&self) -> Result<Stats, StorageError> {
        let mut stats = self.aggregate(Some(today_floor()))?;
        stats.today_sessions = stats.total_sessions;
        stats.today_work_secs = stats.total_work_secs;
        Ok(stats)
    }

    pub fn stats_all(&self) -> Result<Stats, StorageError> {
        let mut stats = self.aggregate(None)?;
        let today = self.aggregate(Some(today_floor()))?;
        stats.today_sessions = today.total_sessions;
        stats.today_work_secs = today.total_work_secs;
        Ok(stats)
    }

    fn aggregate(&self, since: Option<String>) -> Result<Stats, StorageError> {
        let mut stats = Stats::default();
        let mut stmt = self.conn.prepare(
            "SELECT phase, COUNT(*), COALESCE(SUM(duration_secs), 0)
             FROM sessions
             WHERE completed_at >= ?1
             GROUP BY phase",
        )?;
        // An empty floor sorts before any RFC 3339 timestamp, so it
        // matches every row.
        let floor = since.unwrap_or_default();
        let rows = stmt.query_map(params![floor], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
            ))
        })?;

        for row in rows {
            let (phase, count, secs) = row.map_err(StorageError::from)?;
            stats.total_sessions += count;
            match phase.as_str() {
                "work" => {
                    stats.completed_work_sessions += count;
                    stats.total_work_secs += secs;
                }
                "short_break" | "long_break" => {
                    stats.total_break_secs += secs;
                }
                _ => {}
            }
        }
        Ok(stats)
    }

    /// Most recently completed sessions, newest first.
    pub fn recent_sessions(&self, limit: u64) -> Result<Vec<SessionRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, phase, duration_secs, started_at, completed_at
             FROM sessions
             ORDER BY completed_at DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut sessions = Vec::new();
        for row in rows {
            let (id, phase, duration_secs, started_at, completed_at) =
                row.map_err(StorageError::from)?;
            sessions.push(SessionRecord {
                id,
                phase,
                duration_secs,
                started_at: parse_timestamp(&started_at)?,
                completed_at: parse_timestamp(&completed_at)?,
            });
        }
        Ok(sessions)
    }

    /// Delete session records completed before `cutoff`, returning how many
    /// were removed. Invoked only by an explicit caller-driven sweep, never
    /// from lifecycle hooks.
    pub fn prune_completed_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<usize, StorageError> {
        let n = self.conn.execute(
            "DELETE FROM sessions WHERE completed_at < ?1",
            params![cutoff.to_rfc3339()],
        )?;
        Ok(n)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::QueryFailed(format!("bad timestamp '{raw}': {e}")))
}

fn today_floor() -> String {
    format!("{}T00:00:00+00:00", Utc::now().format("%Y-%m-%d"))
}
