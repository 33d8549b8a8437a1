use crate::errors::AppResult;
use crate::models::{
    ApprovalStatus, ClockEvent, ClockKind, ContractBudget, LaborSubmission, RateEntry,
    WorkerProfile,
};
use crate::ui::messages::warning;
use crate::utils::date::{format_date, parse_date};
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashMap;

// ---------------------------
// Reads
// ---------------------------

/// Submissions dated in `[from, to]`, in insertion order.
pub fn load_submissions(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
    company: Option<&str>,
) -> AppResult<Vec<LaborSubmission>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, worker_id, worker_name, company, project, date, hours, status
         FROM submissions
         WHERE date BETWEEN ?1 AND ?2
           AND (?3 IS NULL OR company = ?3)
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(
        params![format_date(from), format_date(to), company],
        map_submission,
    )?;

    let mut out = Vec::new();
    for r in rows {
        if let Some(sub) = r? {
            out.push(sub);
        }
    }
    Ok(out)
}

/// Rows with an unreadable date or status are skipped with a warning.
fn map_submission(row: &Row) -> rusqlite::Result<Option<LaborSubmission>> {
    let id: i64 = row.get("id")?;
    let date_str: String = row.get("date")?;
    let status_str: String = row.get("status")?;

    let Some(date) = parse_date(&date_str) else {
        warning(format!("Skipping submission #{id}: invalid date '{date_str}'"));
        return Ok(None);
    };
    let Some(approval_status) = ApprovalStatus::from_db_str(&status_str) else {
        warning(format!("Skipping submission #{id}: invalid status '{status_str}'"));
        return Ok(None);
    };

    Ok(Some(LaborSubmission {
        worker_id: row.get("worker_id")?,
        worker_display_name: row.get("worker_name")?,
        company_name: row.get("company")?,
        project_name: row.get("project")?,
        date,
        hours_claimed: row.get("hours")?,
        approval_status,
    }))
}

/// Clock events dated in `[from, to]`, in insertion order (the order the
/// duplicate policy reduces over).
///
/// The company filter keeps workers whose profile belongs to `company` or
/// who submitted hours for it.
pub fn load_clock_events(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
    company: Option<&str>,
) -> AppResult<Vec<ClockEvent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, worker_id, date, kind, timestamp, reporter
         FROM clock_events
         WHERE date BETWEEN ?1 AND ?2
           AND (?3 IS NULL OR worker_id IN (
                SELECT worker_id FROM profiles WHERE company = ?3
                UNION
                SELECT worker_id FROM submissions WHERE company = ?3))
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(
        params![format_date(from), format_date(to), company],
        map_clock_event,
    )?;

    let mut out = Vec::new();
    for r in rows {
        if let Some(ev) = r? {
            out.push(ev);
        }
    }
    Ok(out)
}

/// An unparseable timestamp is kept as `None`; the matcher turns it
/// into an incomplete worker-day.
fn map_clock_event(row: &Row) -> rusqlite::Result<Option<ClockEvent>> {
    let id: i64 = row.get("id")?;
    let date_str: String = row.get("date")?;
    let kind_str: String = row.get("kind")?;
    let ts_str: String = row.get("timestamp")?;

    let Some(date) = parse_date(&date_str) else {
        warning(format!("Skipping clock event #{id}: invalid date '{date_str}'"));
        return Ok(None);
    };
    let Some(kind) = ClockKind::from_db_str(&kind_str) else {
        warning(format!("Skipping clock event #{id}: invalid kind '{kind_str}'"));
        return Ok(None);
    };

    Ok(Some(ClockEvent {
        worker_id: row.get("worker_id")?,
        date,
        kind,
        timestamp: parse_timestamp(&ts_str, date),
        reporter_display_name: row.get("reporter")?,
    }))
}

pub fn load_rates(conn: &Connection) -> AppResult<HashMap<String, RateEntry>> {
    let mut stmt = conn.prepare_cached("SELECT worker_id, hourly_rate FROM rates")?;
    let rows = stmt.query_map([], |row| {
        Ok(RateEntry {
            worker_id: row.get(0)?,
            hourly_rate: row.get(1)?,
        })
    })?;

    let mut out = HashMap::new();
    for r in rows {
        let entry = r?;
        out.insert(entry.worker_id.clone(), entry);
    }
    Ok(out)
}

pub fn load_budget(conn: &Connection, company: &str) -> AppResult<Option<ContractBudget>> {
    let budget = conn
        .query_row(
            "SELECT company, total_amount FROM budgets WHERE company = ?1",
            [company],
            |row| {
                Ok(ContractBudget {
                    company_name: row.get(0)?,
                    total_amount: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(budget)
}

fn map_profile(row: &Row) -> rusqlite::Result<WorkerProfile> {
    Ok(WorkerProfile {
        worker_id: row.get(0)?,
        display_name: row.get(1)?,
        company_name: row.get(2)?,
    })
}

pub fn load_profile(conn: &Connection, worker_id: &str) -> AppResult<Option<WorkerProfile>> {
    let profile = conn
        .query_row(
            "SELECT worker_id, display_name, company FROM profiles WHERE worker_id = ?1",
            [worker_id],
            map_profile,
        )
        .optional()?;
    Ok(profile)
}

pub fn load_profiles(conn: &Connection) -> AppResult<HashMap<String, WorkerProfile>> {
    let mut stmt =
        conn.prepare_cached("SELECT worker_id, display_name, company FROM profiles")?;
    let rows = stmt.query_map([], map_profile)?;

    let mut out = HashMap::new();
    for r in rows {
        let p = r?;
        out.insert(p.worker_id.clone(), p);
    }
    Ok(out)
}

// ---------------------------
// Writes
// ---------------------------

pub fn insert_submission(conn: &Connection, sub: &LaborSubmission) -> AppResult<()> {
    conn.execute(
        "INSERT INTO submissions (worker_id, worker_name, company, project, date, hours, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            sub.worker_id,
            sub.worker_display_name,
            sub.company_name,
            sub.project_name,
            sub.date_str(),
            sub.hours_claimed,
            sub.approval_status.to_db_str(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn insert_clock_event(conn: &Connection, ev: &ClockEvent) -> AppResult<()> {
    insert_clock_event_raw(
        conn,
        &ev.worker_id,
        ev.date,
        ev.kind,
        &ev.timestamp.map(format_timestamp).unwrap_or_default(),
        &ev.reporter_display_name,
    )
}

/// Store a clock event with its timestamp text exactly as received.
pub fn insert_clock_event_raw(
    conn: &Connection,
    worker_id: &str,
    date: NaiveDate,
    kind: ClockKind,
    timestamp: &str,
    reporter: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO clock_events (worker_id, date, kind, timestamp, reporter, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            worker_id,
            format_date(date),
            kind.to_db_str(),
            timestamp,
            reporter,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn upsert_rate(conn: &Connection, rate: &RateEntry) -> AppResult<()> {
    conn.execute(
        "INSERT INTO rates (worker_id, hourly_rate) VALUES (?1, ?2)
         ON CONFLICT(worker_id) DO UPDATE SET hourly_rate = excluded.hourly_rate",
        params![rate.worker_id, rate.hourly_rate],
    )?;
    Ok(())
}

pub fn upsert_budget(conn: &Connection, budget: &ContractBudget) -> AppResult<()> {
    conn.execute(
        "INSERT INTO budgets (company, total_amount) VALUES (?1, ?2)
         ON CONFLICT(company) DO UPDATE SET total_amount = excluded.total_amount",
        params![budget.company_name, budget.total_amount],
    )?;
    Ok(())
}

pub fn upsert_profile(conn: &Connection, profile: &WorkerProfile) -> AppResult<()> {
    conn.execute(
        "INSERT INTO profiles (worker_id, display_name, company) VALUES (?1, ?2, ?3)
         ON CONFLICT(worker_id) DO UPDATE SET
            display_name = excluded.display_name,
            company = excluded.company",
        params![profile.worker_id, profile.display_name, profile.company_name],
    )?;
    Ok(())
}
