use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_data, rti, run_ok, setup_test_db, temp_out};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_verify_classifies_worker_days() {
    let db_path = setup_test_db("cli_verify");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "--test", "verify", "--range", "2025-09"])
        .assert()
        .success()
        .stdout(contains("Alice"))
        .stdout(contains("Bob"))
        .stdout(contains("Carol"))
        .stdout(contains("mismatch"))
        .stdout(contains("incomplete"))
        .stdout(contains("3 worker-days: 1 pass, 1 mismatch, 1 incomplete"));
}

#[test]
fn test_verify_status_filter() {
    let db_path = setup_test_db("cli_verify_status");
    init_db_with_data(&db_path);

    rti()
        .args([
            "--db", &db_path, "--test", "verify", "--range", "2025-09", "--status", "mismatch",
        ])
        .assert()
        .success()
        .stdout(contains("Bob"))
        .stdout(contains("Alice").not())
        .stdout(contains("Carol").not());
}

#[test]
fn test_verify_rejects_unknown_status() {
    let db_path = setup_test_db("cli_verify_bad_status");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "--test", "verify", "--range", "2025-09", "--status", "late"])
        .assert()
        .failure()
        .stderr(contains("unknown verification status 'late'"));
}

#[test]
fn test_verify_company_filter() {
    let db_path = setup_test_db("cli_verify_company");
    init_db_with_data(&db_path);

    rti()
        .args([
            "--db", &db_path, "--test", "verify", "--range", "2025-09", "--company", "Globex",
        ])
        .assert()
        .success()
        .stdout(contains("Carol"))
        .stdout(contains("Alice").not());
}

#[test]
fn test_costs_rollups() {
    let db_path = setup_test_db("cli_costs");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "--test", "costs", "--range", "2025-09"])
        .assert()
        .success()
        .stdout(contains("By worker"))
        .stdout(contains("By company"))
        .stdout(contains("By project"))
        .stdout(contains("$425.00"))
        .stdout(contains("$400.00"))
        .stdout(contains("Total: $825.00 for 18.50h"))
        // pending submission is not costed
        .stdout(contains("Globex").not());
}

#[test]
fn test_costs_without_approved_work() {
    let db_path = setup_test_db("cli_costs_empty");
    init_db_with_data(&db_path);

    rti()
        .args([
            "--db", &db_path, "--test", "costs", "--range", "2025-09", "--company", "Globex",
        ])
        .assert()
        .success()
        .stdout(contains("No approved submissions"));
}

#[test]
fn test_costs_reports_missing_rate() {
    let db_path = setup_test_db("cli_costs_unpriced");
    init_db_with_data(&db_path);

    run_ok(
        &db_path,
        &[
            "add", "submission", "--worker", "w9", "--name", "Zoe", "--company", "Acme",
            "--date", "2025-09-03", "--hours", "5", "--status", "approved",
        ],
    );

    rti()
        .args(["--db", &db_path, "--test", "costs", "--range", "2025-09"])
        .assert()
        .success()
        .stdout(contains("Zoe"))
        .stdout(contains("$0.00"))
        .stderr(contains("No billing rate for: w9"));
}

#[test]
fn test_burndown_against_budget() {
    let db_path = setup_test_db("cli_burndown");
    init_db_with_data(&db_path);

    rti()
        .args([
            "--db", &db_path, "--test", "burndown", "--range", "2025-09", "--company", "Acme",
        ])
        .assert()
        .success()
        .stdout(contains("$10,000.00"))
        .stdout(contains("$825.00"))
        .stdout(contains("$9,175.00"))
        .stdout(contains("2025-09-30"));
}

#[test]
fn test_burndown_amount_override() {
    let db_path = setup_test_db("cli_burndown_override");
    init_db_with_data(&db_path);

    rti()
        .args([
            "--db", &db_path, "--test", "burndown", "--range", "2025-09", "--company", "Acme",
            "--amount", "2000",
        ])
        .assert()
        .success()
        .stdout(contains("$2,000.00 (override)"))
        .stdout(contains("$1,175.00"));
}

#[test]
fn test_burndown_without_budget_warns() {
    let db_path = setup_test_db("cli_burndown_nobudget");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "--test", "burndown", "--range", "2025-09"])
        .assert()
        .success()
        .stderr(contains("No contract budget"));
}

#[test]
fn test_burndown_range_too_large() {
    let db_path = setup_test_db("cli_burndown_large");
    init_db_with_data(&db_path);

    rti()
        .args([
            "--db", &db_path, "--test", "burndown", "--range", "2023:2025", "--company", "Acme",
        ])
        .assert()
        .success()
        .stderr(contains("more than 730 days"));
}

#[test]
fn test_add_rejects_invalid_input() {
    let db_path = setup_test_db("cli_add_invalid");
    run_ok(&db_path, &["init"]);

    rti()
        .args([
            "--db", &db_path, "--test", "add", "clock", "--worker", "w1", "--date", "2025-09-01",
            "--kind", "lunch", "--time", "12:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid clock event kind"));

    rti()
        .args([
            "--db", &db_path, "--test", "add", "submission", "--worker", "w1", "--company", "Acme",
            "--date", "2025-13-01", "--hours", "8",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    rti()
        .args(["--db", &db_path, "--test", "add", "rate", "--worker", "w1", "--rate=-5"])
        .assert()
        .failure()
        .stderr(contains("rate must be a non-negative number"));
}

#[test]
fn test_invalid_range_fails() {
    let db_path = setup_test_db("cli_bad_range");
    run_ok(&db_path, &["init"]);

    rti()
        .args(["--db", &db_path, "--test", "verify", "--range", "2025-10:2025-09"])
        .assert()
        .failure()
        .stderr(contains("Invalid range"));
}

#[test]
fn test_import_and_log() {
    let db_path = setup_test_db("cli_import");
    run_ok(&db_path, &["init"]);

    let csv_path = temp_out("cli_import_subs", "csv");
    fs::write(
        &csv_path,
        "worker_id,worker_name,company,project,date,hours,status\n\
         w1,Alice,Acme,Tower,2025-09-01,8,approved\n\
         w2,Bob,Acme,Tower,2025-09-01,bad,approved\n",
    )
    .unwrap();

    rti()
        .args(["--db", &db_path, "--test", "import", "--kind", "submissions", "--file", &csv_path])
        .assert()
        .success()
        .stdout(contains("Imported 1 submissions rows"))
        .stderr(contains("1 rows skipped"));

    rti()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("import"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("cli_db_info");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "--test", "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));

    rti()
        .args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Submissions"))
        .stdout(contains("Data version"));
}
