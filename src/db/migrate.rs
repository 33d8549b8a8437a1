use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};

/// Current schema version, stored in `meta` under `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Ensure the `meta` key/value table exists.
fn ensure_meta_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS meta (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );
        INSERT OR IGNORE INTO meta (key, value) VALUES ('data_version', '0');
        "#,
    )
}

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

/// Raw record tables. Dates are `YYYY-MM-DD`, timestamps
/// `YYYY-MM-DD HH:MM[:SS]`; both stay TEXT so that a malformed value
/// survives storage and is handled by the reader.
fn create_record_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS submissions (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id    TEXT NOT NULL,
            worker_name  TEXT NOT NULL DEFAULT '',
            company      TEXT NOT NULL DEFAULT '',
            project      TEXT NOT NULL DEFAULT '',
            date         TEXT NOT NULL,
            hours        REAL NOT NULL DEFAULT 0,
            status       TEXT NOT NULL DEFAULT 'pending'
                         CHECK(status IN ('pending','approved','rejected')),
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_submissions_date ON submissions(date);
        CREATE INDEX IF NOT EXISTS idx_submissions_company_date ON submissions(company, date);

        CREATE TABLE IF NOT EXISTS clock_events (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id    TEXT NOT NULL,
            date         TEXT NOT NULL,
            kind         TEXT NOT NULL CHECK(kind IN ('start','end')),
            timestamp    TEXT NOT NULL DEFAULT '',
            reporter     TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_clock_events_date ON clock_events(date);
        CREATE INDEX IF NOT EXISTS idx_clock_events_worker_date ON clock_events(worker_id, date);

        CREATE TABLE IF NOT EXISTS rates (
            worker_id    TEXT PRIMARY KEY,
            hourly_rate  REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS budgets (
            company      TEXT PRIMARY KEY,
            total_amount REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS profiles (
            worker_id    TEXT PRIMARY KEY,
            display_name TEXT NOT NULL,
            company      TEXT
        );
        "#,
    )
}

fn stored_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM meta WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(v.and_then(|s| s.parse().ok()).unwrap_or(0))
}

/// Bring the schema up to [`SCHEMA_VERSION`]. Idempotent.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_meta_table(conn)?;
    ensure_log_table(conn)?;

    let current = stored_schema_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(AppError::Migration(format!(
            "database schema version {current} is newer than supported version {SCHEMA_VERSION}"
        )));
    }

    if current < 1 {
        create_record_tables(conn)?;
    }

    conn.execute(
        "INSERT INTO meta (key, value) VALUES ('schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}
