use crate::db::log::read_data_version;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

/// Row counts and date coverage of the raw record tables.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DbStats {
    pub submissions: i64,
    pub clock_events: i64,
    pub rates: i64,
    pub budgets: i64,
    pub profiles: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub data_version: u64,
}

fn count(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
}

pub fn collect_stats(conn: &Connection) -> AppResult<DbStats> {
    let first_date: Option<String> = conn
        .query_row(
            "SELECT MIN(d) FROM (SELECT date AS d FROM submissions
                                 UNION ALL SELECT date FROM clock_events)",
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    let last_date: Option<String> = conn
        .query_row(
            "SELECT MAX(d) FROM (SELECT date AS d FROM submissions
                                 UNION ALL SELECT date FROM clock_events)",
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    Ok(DbStats {
        submissions: count(conn, "submissions")?,
        clock_events: count(conn, "clock_events")?,
        rates: count(conn, "rates")?,
        budgets: count(conn, "budgets")?,
        profiles: count(conn, "profiles")?,
        first_date,
        last_date,
        data_version: read_data_version(conn)?,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let stats = collect_stats(&pool.conn)?;

    for (label, n) in [
        ("Submissions", stats.submissions),
        ("Clock events", stats.clock_events),
        ("Rates", stats.rates),
        ("Budgets", stats.budgets),
        ("Profiles", stats.profiles),
    ] {
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    let fmt_first = stats
        .first_date
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = stats
        .last_date
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);
    println!("{}• Data version:{} {}", CYAN, RESET, stats.data_version);

    println!();
    Ok(())
}
