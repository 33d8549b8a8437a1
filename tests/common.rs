#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use rlaborlog::models::{
    ApprovalStatus, ClockEvent, ClockKind, LaborSubmission, WorkerProfile,
};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("rlaborlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rlaborlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run one CLI invocation against `db_path` in test mode and require success.
pub fn run_ok(db_path: &str, args: &[&str]) {
    rti()
        .args(["--db", db_path, "--test"])
        .args(args)
        .assert()
        .success();
}

/// Initialize DB and add a small dataset for September 2025:
///
/// - `w1` Alice (Acme, rate 50): 08:00→16:30, submits 8.5h approved → pass
/// - `w2` Bob (Acme, rate 40): 08:00→16:00, submits 10h approved → mismatch
/// - `w3` (Globex, no rate): only an end event, submits 6h pending → incomplete
/// - Acme budget 10000
pub fn init_db_with_data(db_path: &str) {
    run_ok(db_path, &["init"]);

    run_ok(db_path, &["add", "profile", "--worker", "w1", "--name", "Alice", "--company", "Acme"]);
    run_ok(db_path, &["add", "profile", "--worker", "w2", "--name", "Bob", "--company", "Acme"]);
    run_ok(db_path, &["add", "rate", "--worker", "w1", "--rate", "50"]);
    run_ok(db_path, &["add", "rate", "--worker", "w2", "--rate", "40"]);
    run_ok(db_path, &["add", "budget", "--company", "Acme", "--amount", "10000"]);

    for (worker, start, end, hours) in [("w1", "08:00", "16:30", "8.5"), ("w2", "08:00", "16:00", "10")] {
        run_ok(db_path, &["add", "clock", "--worker", worker, "--date", "2025-09-01", "--kind", "start", "--time", start]);
        run_ok(db_path, &["add", "clock", "--worker", worker, "--date", "2025-09-01", "--kind", "end", "--time", end]);
        run_ok(
            db_path,
            &[
                "add", "submission", "--worker", worker, "--company", "Acme", "--project", "Tower",
                "--date", "2025-09-01", "--hours", hours, "--status", "approved",
            ],
        );
    }

    run_ok(db_path, &["add", "clock", "--worker", "w3", "--date", "2025-09-02", "--kind", "end", "--time", "17:00", "--reporter", "Carol"]);
    run_ok(
        db_path,
        &[
            "add", "submission", "--worker", "w3", "--name", "Carol", "--company", "Globex",
            "--date", "2025-09-02", "--hours", "6",
        ],
    );
}

// ---------------------------
// Library fixtures
// ---------------------------

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn at(day: &str, hm: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{day} {hm}"), "%Y-%m-%d %H:%M").expect("valid test timestamp")
}

pub fn start(worker: &str, day: &str, hm: &str) -> ClockEvent {
    ClockEvent::new(worker, date(day), ClockKind::Start, Some(at(day, hm)), "")
}

pub fn end(worker: &str, day: &str, hm: &str) -> ClockEvent {
    ClockEvent::new(worker, date(day), ClockKind::End, Some(at(day, hm)), "")
}

pub fn submission(worker: &str, company: &str, day: &str, hours: f64) -> LaborSubmission {
    LaborSubmission {
        worker_id: worker.to_string(),
        worker_display_name: String::new(),
        company_name: company.to_string(),
        project_name: String::new(),
        date: date(day),
        hours_claimed: hours,
        approval_status: ApprovalStatus::Approved,
    }
}

pub fn profiles(entries: &[(&str, &str)]) -> HashMap<String, WorkerProfile> {
    entries
        .iter()
        .map(|(id, name)| {
            (
                id.to_string(),
                WorkerProfile {
                    worker_id: id.to_string(),
                    display_name: name.to_string(),
                    company_name: None,
                },
            )
        })
        .collect()
}
