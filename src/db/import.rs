//! CSV ingestion of raw submissions and clock events.
//!
//! Rows are checked only for what storage needs (a worker id, a date, a
//! known status/kind). Everything else, including malformed clock
//! timestamps, is stored as received and judged later by the matcher.
//! Rows that fail any check are skipped with a warning; the rest is stored.

use crate::db::log::{bump_data_version, write_log};
use crate::db::name_match::{NameMatch, match_worker_id};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{ApprovalStatus, ClockKind, LaborSubmission, WorkerProfile};
use crate::ui::messages::warning;
use crate::utils::date::parse_date;
use clap::ValueEnum;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImportKind {
    Submissions,
    Clock,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Submissions => "submissions",
            ImportKind::Clock => "clock",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct SubmissionRow {
    #[serde(default)]
    worker_id: String,
    #[serde(default)]
    worker_name: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    project: String,
    date: String,
    #[serde(default)]
    hours: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct ClockRow {
    #[serde(default)]
    worker_id: String,
    date: String,
    kind: String,
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    reporter: String,
}

pub fn import_file(pool: &mut DbPool, kind: ImportKind, path: &Path) -> AppResult<ImportReport> {
    let file = File::open(path)?;
    let report = match kind {
        ImportKind::Submissions => import_submissions(pool, file)?,
        ImportKind::Clock => import_clock_events(pool, file)?,
    };

    write_log(
        &pool.conn,
        "import",
        kind.as_str(),
        &format!(
            "Imported {} rows ({} skipped) from {}",
            report.imported,
            report.skipped,
            path.display()
        ),
    )?;

    Ok(report)
}

/// Empty ids are resolved from `name` through the profile name matcher.
fn resolve_worker_id(
    profiles: &HashMap<String, WorkerProfile>,
    worker_id: &str,
    name: &str,
    line: usize,
) -> Option<String> {
    if !worker_id.is_empty() {
        return Some(worker_id.to_string());
    }

    match match_worker_id(profiles, name) {
        NameMatch::Found(id) => Some(id),
        NameMatch::Ambiguous(ids) => {
            warning(format!(
                "Row {line}: name '{name}' matches several workers ({}), skipped",
                ids.join(", ")
            ));
            None
        }
        NameMatch::NotFound => {
            warning(format!("Row {line}: no worker id and no profile named '{name}', skipped"));
            None
        }
    }
}

fn csv_reader<R: io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Short or otherwise unreadable rows are skipped; I/O failures abort.
fn readable_row<T>(row: Result<T, csv::Error>, line: usize) -> AppResult<Option<T>> {
    match row {
        Ok(row) => Ok(Some(row)),
        Err(e) if e.is_io_error() => Err(e.into()),
        Err(e) => {
            warning(format!("Row {line}: {e}, skipped"));
            Ok(None)
        }
    }
}

pub fn import_submissions<R: io::Read>(pool: &mut DbPool, reader: R) -> AppResult<ImportReport> {
    let profiles = queries::load_profiles(&pool.conn)?;
    let mut rdr = csv_reader(reader);

    pool.with_transaction(|tx| {
        let mut report = ImportReport::default();

        for (i, row) in rdr.deserialize::<SubmissionRow>().enumerate() {
            let line = i + 2;
            let Some(row) = readable_row(row, line)? else {
                report.skipped += 1;
                continue;
            };

            match parse_submission(&profiles, row, line) {
                Ok(Some(sub)) => {
                    queries::insert_submission(tx, &sub)?;
                    report.imported += 1;
                }
                Ok(None) => report.skipped += 1,
                Err(e) => {
                    warning(format!("Row {line}: {e}, skipped"));
                    report.skipped += 1;
                }
            }
        }

        if report.imported > 0 {
            bump_data_version(tx)?;
        }
        Ok(report)
    })
}

fn parse_submission(
    profiles: &HashMap<String, WorkerProfile>,
    row: SubmissionRow,
    line: usize,
) -> AppResult<Option<LaborSubmission>> {
    let date = parse_date(&row.date).ok_or_else(|| AppError::InvalidDate(row.date.clone()))?;

    let hours_claimed = if row.hours.is_empty() {
        0.0
    } else {
        row.hours
            .parse::<f64>()
            .map_err(|_| AppError::InvalidRecord(format!("invalid hours '{}'", row.hours)))?
    };

    let approval_status = ApprovalStatus::from_input(&row.status)
        .ok_or_else(|| AppError::InvalidStatus(row.status.clone()))?;

    let Some(worker_id) = resolve_worker_id(profiles, &row.worker_id, &row.worker_name, line)
    else {
        return Ok(None);
    };

    let worker_display_name = if row.worker_name.is_empty() {
        profiles
            .get(&worker_id)
            .map(|p| p.display_name.clone())
            .unwrap_or_default()
    } else {
        row.worker_name
    };

    Ok(Some(LaborSubmission {
        worker_id,
        worker_display_name,
        company_name: row.company,
        project_name: row.project,
        date,
        hours_claimed,
        approval_status,
    }))
}

pub fn import_clock_events<R: io::Read>(pool: &mut DbPool, reader: R) -> AppResult<ImportReport> {
    let profiles = queries::load_profiles(&pool.conn)?;
    let mut rdr = csv_reader(reader);

    pool.with_transaction(|tx| {
        let mut report = ImportReport::default();

        for (i, row) in rdr.deserialize::<ClockRow>().enumerate() {
            let line = i + 2;
            let Some(row) = readable_row(row, line)? else {
                report.skipped += 1;
                continue;
            };

            let Some(date) = parse_date(&row.date) else {
                warning(format!("Row {line}: invalid date '{}', skipped", row.date));
                report.skipped += 1;
                continue;
            };
            let Some(kind) = ClockKind::from_input(&row.kind) else {
                warning(format!("Row {line}: invalid kind '{}', skipped", row.kind));
                report.skipped += 1;
                continue;
            };
            let Some(worker_id) =
                resolve_worker_id(&profiles, &row.worker_id, &row.reporter, line)
            else {
                report.skipped += 1;
                continue;
            };

            queries::insert_clock_event_raw(tx, &worker_id, date, kind, &row.timestamp, &row.reporter)?;
            report.imported += 1;
        }

        if report.imported > 0 {
            bump_data_version(tx)?;
        }
        Ok(report)
    })
}
