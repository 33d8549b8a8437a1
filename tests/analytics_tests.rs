mod common;
use common::{date, end, start, submission};

use rlaborlog::core::logic::{Analytics, ContractSource, ReportQuery};
use rlaborlog::core::memo::{SnapshotCache, SnapshotKey};
use rlaborlog::core::reconcile::DuplicatePolicy;
use rlaborlog::db::log::{bump_data_version, read_data_version};
use rlaborlog::db::pool::DbPool;
use rlaborlog::db::queries;
use rlaborlog::db::source::RecordSource;
use rlaborlog::models::{
    ContractBudget, LaborSubmission, RateEntry, RollupOrder, VerificationStatus, WorkerProfile,
};

fn profile(worker: &str, name: &str, company: &str) -> WorkerProfile {
    WorkerProfile {
        worker_id: worker.to_string(),
        display_name: name.to_string(),
        company_name: Some(company.to_string()),
    }
}

fn add_submission(pool: &DbPool, sub: &LaborSubmission) {
    queries::insert_submission(&pool.conn, sub).unwrap();
    bump_data_version(&pool.conn).unwrap();
}

/// Two Acme workers and one Globex worker on 2025-09-01.
fn seeded() -> DbPool {
    let pool = DbPool::in_memory().unwrap();
    let conn = &pool.conn;

    queries::upsert_profile(conn, &profile("w1", "Alice", "Acme")).unwrap();
    queries::upsert_profile(conn, &profile("w2", "Bob", "Acme")).unwrap();
    queries::upsert_profile(conn, &profile("w3", "Carol", "Globex")).unwrap();
    for (worker, rate) in [("w1", 50.0), ("w2", 40.0), ("w3", 30.0)] {
        queries::upsert_rate(
            conn,
            &RateEntry {
                worker_id: worker.to_string(),
                hourly_rate: rate,
            },
        )
        .unwrap();
    }
    queries::upsert_budget(
        conn,
        &ContractBudget {
            company_name: "Acme".to_string(),
            total_amount: 10_000.0,
        },
    )
    .unwrap();

    for ev in [
        start("w1", "2025-09-01", "08:00"),
        end("w1", "2025-09-01", "16:30"),
        start("w2", "2025-09-01", "08:00"),
        end("w2", "2025-09-01", "16:00"),
        start("w3", "2025-09-01", "09:00"),
        end("w3", "2025-09-01", "17:00"),
    ] {
        queries::insert_clock_event(conn, &ev).unwrap();
    }

    queries::insert_submission(conn, &submission("w1", "Acme", "2025-09-01", 8.5)).unwrap();
    queries::insert_submission(conn, &submission("w2", "Acme", "2025-09-01", 10.0)).unwrap();
    queries::insert_submission(conn, &submission("w3", "Globex", "2025-09-01", 8.0)).unwrap();
    bump_data_version(conn).unwrap();

    pool
}

fn september(company: Option<&str>) -> ReportQuery {
    ReportQuery::new(
        date("2025-09-01"),
        date("2025-09-30"),
        company.map(str::to_string),
    )
}

#[test]
fn test_verification_from_store() {
    let pool = seeded();
    let mut analytics = Analytics::default();

    let records = analytics.verification(&pool, &september(None)).unwrap();

    assert_eq!(records.len(), 3);
    let by_id = |id: &str| records.iter().find(|r| r.worker_id == id).unwrap();
    assert_eq!(by_id("w1").status, VerificationStatus::Pass);
    assert_eq!(by_id("w1").display_name, "Alice");
    assert_eq!(by_id("w2").status, VerificationStatus::Mismatch);
    assert_eq!(by_id("w3").status, VerificationStatus::Pass);
}

#[test]
fn test_company_filter_applies_to_clock_events() {
    let pool = seeded();
    let mut analytics = Analytics::default();

    let records = analytics.verification(&pool, &september(Some("Acme"))).unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.worker_id != "w3"));
}

#[test]
fn test_repeated_query_is_served_from_cache() {
    let pool = seeded();
    let mut analytics = Analytics::default();
    let query = september(None);

    let first = analytics.verification(&pool, &query).unwrap().to_vec();
    let second = analytics.verification(&pool, &query).unwrap().to_vec();

    assert_eq!(first, second);
    assert_eq!(analytics.cache_hits(), 1);
    assert_eq!(analytics.cached_results(), 1);
}

#[test]
fn test_write_invalidates_cached_results() {
    let pool = seeded();
    let mut analytics = Analytics::default();
    let query = september(Some("Acme"));

    let before = analytics.costs(&pool, &query).unwrap().total_cost;
    assert_eq!(before, 8.5 * 50.0 + 10.0 * 40.0);

    let version = read_data_version(&pool.conn).unwrap();
    add_submission(&pool, &submission("w1", "Acme", "2025-09-02", 2.0));
    assert_eq!(read_data_version(&pool.conn).unwrap(), version + 1);

    let after = analytics.costs(&pool, &query).unwrap().total_cost;
    assert_eq!(after, before + 100.0);
    assert_eq!(analytics.cache_hits(), 0);
    assert_eq!(analytics.cached_results(), 1);
}

#[test]
fn test_distinct_snapshots_cached_separately() {
    let pool = seeded();
    let mut analytics = Analytics::default();

    analytics.costs(&pool, &september(Some("Acme"))).unwrap();
    analytics.costs(&pool, &september(Some("Globex"))).unwrap();
    analytics.costs(&pool, &september(None)).unwrap();

    assert_eq!(analytics.cached_results(), 3);
    assert_eq!(analytics.cache_hits(), 0);

    let globex = analytics.costs(&pool, &september(Some("Globex"))).unwrap();
    assert_eq!(globex.total_cost, 240.0);
    assert_eq!(analytics.cache_hits(), 1);
}

#[test]
fn test_burndown_uses_company_budget() {
    let pool = seeded();
    let mut analytics = Analytics::default();

    let report = analytics
        .burndown(&pool, &september(Some("Acme")), None)
        .unwrap();

    assert_eq!(report.contract_source, ContractSource::Budget);
    assert_eq!(report.contract_amount, 10_000.0);
    assert_eq!(report.points.len(), 30);
    assert_eq!(report.points[0].accumulated_cost, 825.0);

    let summary = report.summary.unwrap();
    assert_eq!(summary.total_spent, 825.0);
    assert_eq!(summary.remaining, 9175.0);
}

#[test]
fn test_burndown_override_and_missing_budget() {
    let pool = seeded();
    let mut analytics = Analytics::default();

    let overridden = analytics
        .burndown(&pool, &september(Some("Globex")), Some(1000.0))
        .unwrap();
    assert_eq!(overridden.contract_source, ContractSource::Override);
    assert_eq!(overridden.points.last().unwrap().actual_remaining, 760.0);

    let no_budget = analytics
        .burndown(&pool, &september(Some("Globex")), None)
        .unwrap();
    assert_eq!(no_budget.contract_source, ContractSource::Missing);
    assert!(no_budget.points.is_empty());
    assert!(no_budget.summary.is_none());

    let no_company = analytics.burndown(&pool, &september(None), None).unwrap();
    assert_eq!(no_company.contract_source, ContractSource::Missing);
    assert!(no_company.points.is_empty());
}

#[test]
fn test_policy_from_analytics_settings() {
    let pool = seeded();
    queries::insert_clock_event(&pool.conn, &end("w2", "2025-09-01", "18:00")).unwrap();
    bump_data_version(&pool.conn).unwrap();

    let mut last = Analytics::new(DuplicatePolicy::LastWins, RollupOrder::default());
    let mut first = Analytics::new(DuplicatePolicy::FirstWins, RollupOrder::default());
    let query = september(Some("Acme"));

    let w2_last = analytics_status(&mut last, &pool, &query, "w2");
    let w2_first = analytics_status(&mut first, &pool, &query, "w2");

    assert_eq!(w2_last, VerificationStatus::Pass);
    assert_eq!(w2_first, VerificationStatus::Mismatch);
}

fn analytics_status(
    analytics: &mut Analytics,
    pool: &DbPool,
    query: &ReportQuery,
    worker: &str,
) -> VerificationStatus {
    analytics
        .verification(pool, query)
        .unwrap()
        .iter()
        .find(|r| r.worker_id == worker)
        .map(|r| r.status)
        .unwrap()
}

#[test]
fn test_record_source_fetches() {
    let pool = seeded();

    assert_eq!(pool.fetch_rates().unwrap().len(), 3);
    assert_eq!(
        pool.fetch_contract_budget("Acme").unwrap().unwrap().total_amount,
        10_000.0
    );
    assert!(pool.fetch_contract_budget("Globex").unwrap().is_none());
    assert_eq!(
        pool.fetch_worker_profile("w3").unwrap().unwrap().display_name,
        "Carol"
    );
    assert!(pool.fetch_worker_profile("nobody").unwrap().is_none());

    let subs = pool
        .fetch_labor_submissions(date("2025-09-01"), date("2025-09-01"), Some("Globex"))
        .unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].worker_id, "w3");

    let outside = pool
        .fetch_clock_events(date("2025-10-01"), date("2025-10-31"), None)
        .unwrap();
    assert!(outside.is_empty());
}

#[test]
fn test_unparseable_stored_timestamp_loads_as_none() {
    let pool = DbPool::in_memory().unwrap();
    queries::insert_clock_event_raw(
        &pool.conn,
        "w1",
        date("2025-09-01"),
        rlaborlog::models::ClockKind::Start,
        "not a time",
        "",
    )
    .unwrap();

    let events = pool
        .fetch_clock_events(date("2025-09-01"), date("2025-09-01"), None)
        .unwrap();

    assert_eq!(events.len(), 1);
    assert!(events[0].timestamp.is_none());
}

#[test]
fn test_snapshot_cache_basics() {
    let mut cache: SnapshotCache<u32> = SnapshotCache::new();
    let k1 = SnapshotKey::new(date("2025-09-01"), date("2025-09-30"), Some("Acme"), 1);
    let k2 = SnapshotKey::new(date("2025-09-01"), date("2025-09-30"), Some("Acme"), 2);

    let mut calls = 0;
    assert_eq!(*cache.get_or_insert_with(k1.clone(), || { calls += 1; 10 }), 10);
    assert_eq!(*cache.get_or_insert_with(k1.clone(), || { calls += 1; 20 }), 10);
    assert_eq!(calls, 1);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 1);

    cache.get_or_insert_with(k2.clone(), || 30);
    assert_eq!(cache.len(), 2);

    cache.retain_version(2);
    assert!(cache.get(&k1).is_none());
    assert_eq!(cache.get(&k2), Some(&30));

    let failed: Result<&u32, String> =
        cache.get_or_try_insert_with(k1.clone(), || Err("boom".to_string()));
    assert!(failed.is_err());
    assert!(cache.get(&k1).is_none());

    cache.clear();
    assert!(cache.is_empty());
}
