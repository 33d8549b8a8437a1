mod common;
use common::{date, end, profiles, start, submission};

use rlaborlog::core::reconcile::{DuplicatePolicy, classify, reconcile, reconcile_with_policy};
use rlaborlog::models::{ClockEvent, ClockKind, LaborSubmission, VerificationStatus};
use std::collections::HashMap;

fn named(worker: &str, name: &str, day: &str, hours: f64) -> LaborSubmission {
    LaborSubmission {
        worker_display_name: name.to_string(),
        ..submission(worker, "Acme", day, hours)
    }
}

#[test]
fn test_matching_hours_pass() {
    let events = vec![start("w1", "2025-09-01", "08:00"), end("w1", "2025-09-01", "16:30")];
    let subs = vec![submission("w1", "Acme", "2025-09-01", 8.5)];

    let records = reconcile(&subs, &events, &HashMap::new());

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, VerificationStatus::Pass);
    assert_eq!(records[0].calculated_hours, 8.5);
    assert_eq!(records[0].submitted_hours, 8.5);
}

#[test]
fn test_overclaimed_hours_mismatch() {
    let events = vec![start("w1", "2025-09-01", "08:00"), end("w1", "2025-09-01", "16:00")];
    let subs = vec![submission("w1", "Acme", "2025-09-01", 10.0)];

    let records = reconcile(&subs, &events, &HashMap::new());

    assert_eq!(records[0].status, VerificationStatus::Mismatch);
    assert_eq!(records[0].calculated_hours, 8.0);
    assert!((records[0].difference() - 2.0).abs() < 1e-9);
}

#[test]
fn test_missing_start_is_incomplete() {
    let events = vec![end("w1", "2025-09-01", "16:00")];
    let subs = vec![submission("w1", "Acme", "2025-09-01", 8.0)];

    let records = reconcile(&subs, &events, &HashMap::new());

    assert_eq!(records[0].calculated_hours, 0.0);
    assert_eq!(records[0].status, VerificationStatus::Incomplete);
    assert!(records[0].start_time.is_none());
    assert!(records[0].end_time.is_some());
}

#[test]
fn test_tolerance_boundary_is_inclusive() {
    let events = vec![start("w1", "2025-09-01", "08:00"), end("w1", "2025-09-01", "16:00")];

    let at_limit = reconcile(&[submission("w1", "Acme", "2025-09-01", 8.25)], &events, &HashMap::new());
    assert_eq!(at_limit[0].status, VerificationStatus::Pass);

    let over_limit = reconcile(&[submission("w1", "Acme", "2025-09-01", 8.2501)], &events, &HashMap::new());
    assert_eq!(over_limit[0].status, VerificationStatus::Mismatch);

    assert_eq!(classify(8.0, 7.75), VerificationStatus::Pass);
    assert_eq!(classify(8.0, 7.7499), VerificationStatus::Mismatch);
}

#[test]
fn test_zero_on_either_side_is_incomplete() {
    assert_eq!(classify(0.0, 8.0), VerificationStatus::Incomplete);
    assert_eq!(classify(8.0, 0.0), VerificationStatus::Incomplete);
    assert_eq!(classify(0.0, 0.0), VerificationStatus::Incomplete);
}

#[test]
fn test_outer_join_keeps_both_sides() {
    // w1 clocked but never submitted, w2 submitted but never clocked
    let events = vec![start("w1", "2025-09-01", "08:00"), end("w1", "2025-09-01", "16:00")];
    let subs = vec![submission("w2", "Acme", "2025-09-01", 7.0)];

    let records = reconcile(&subs, &events, &HashMap::new());

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.status == VerificationStatus::Incomplete));

    let w1 = records.iter().find(|r| r.worker_id == "w1").unwrap();
    assert_eq!(w1.calculated_hours, 8.0);
    assert_eq!(w1.submitted_hours, 0.0);

    let w2 = records.iter().find(|r| r.worker_id == "w2").unwrap();
    assert_eq!(w2.calculated_hours, 0.0);
    assert_eq!(w2.submitted_hours, 7.0);
}

#[test]
fn test_one_record_per_worker_day() {
    let events = vec![
        start("w1", "2025-09-01", "08:00"),
        end("w1", "2025-09-01", "16:00"),
        start("w1", "2025-09-02", "08:00"),
        end("w1", "2025-09-02", "12:00"),
    ];
    let subs = vec![
        submission("w1", "Acme", "2025-09-01", 8.0),
        submission("w1", "Acme", "2025-09-02", 4.0),
        submission("w2", "Acme", "2025-09-02", 4.0),
    ];

    let records = reconcile(&subs, &events, &HashMap::new());

    assert_eq!(records.len(), 3);
}

#[test]
fn test_first_submission_for_a_key_wins() {
    let events = vec![start("w1", "2025-09-01", "08:00"), end("w1", "2025-09-01", "16:00")];
    let subs = vec![
        submission("w1", "Acme", "2025-09-01", 8.0),
        submission("w1", "Acme", "2025-09-01", 3.0),
    ];

    let records = reconcile(&subs, &events, &HashMap::new());

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].submitted_hours, 8.0);
    assert_eq!(records[0].status, VerificationStatus::Pass);
}

#[test]
fn test_display_name_precedence() {
    let subs = vec![
        named("w1", "Alice S.", "2025-09-01", 8.0),
        named("w2", "Bob Submitted", "2025-09-01", 8.0),
    ];
    let events = vec![
        ClockEvent::new("w3", date("2025-09-01"), ClockKind::End, None, "Carol Clock"),
        ClockEvent::new("w4", date("2025-09-01"), ClockKind::End, None, "  "),
    ];
    let profiles = profiles(&[("w1", "Alice Smith")]);

    let records = reconcile(&subs, &events, &profiles);
    let name_of = |id: &str| {
        records
            .iter()
            .find(|r| r.worker_id == id)
            .map(|r| r.display_name.clone())
            .unwrap()
    };

    assert_eq!(name_of("w1"), "Alice Smith");
    assert_eq!(name_of("w2"), "Bob Submitted");
    assert_eq!(name_of("w3"), "Carol Clock");
    assert_eq!(name_of("w4"), "Unknown (w4)");
}

#[test]
fn test_reversed_timestamps_never_negative() {
    let events = vec![start("w1", "2025-09-01", "17:00"), end("w1", "2025-09-01", "08:00")];
    let subs = vec![submission("w1", "Acme", "2025-09-01", 8.0)];

    let records = reconcile(&subs, &events, &HashMap::new());

    assert_eq!(records[0].calculated_hours, 0.0);
    assert_eq!(records[0].status, VerificationStatus::Incomplete);
}

#[test]
fn test_unparseable_timestamp_is_incomplete() {
    let events = vec![
        ClockEvent::new("w1", date("2025-09-01"), ClockKind::Start, None, ""),
        end("w1", "2025-09-01", "16:00"),
    ];
    let subs = vec![submission("w1", "Acme", "2025-09-01", 8.0)];

    let records = reconcile(&subs, &events, &HashMap::new());

    assert_eq!(records[0].calculated_hours, 0.0);
    assert_eq!(records[0].status, VerificationStatus::Incomplete);
}

#[test]
fn test_non_finite_submitted_hours_treated_as_zero() {
    let events = vec![start("w1", "2025-09-01", "08:00"), end("w1", "2025-09-01", "16:00")];
    let subs = vec![submission("w1", "Acme", "2025-09-01", f64::NAN)];

    let records = reconcile(&subs, &events, &HashMap::new());

    assert_eq!(records[0].submitted_hours, 0.0);
    assert_eq!(records[0].status, VerificationStatus::Incomplete);
}

#[test]
fn test_duplicate_events_follow_policy() {
    let events = vec![
        start("w1", "2025-09-01", "08:00"),
        start("w1", "2025-09-01", "09:00"),
        end("w1", "2025-09-01", "16:00"),
        end("w1", "2025-09-01", "17:00"),
    ];
    let subs = vec![submission("w1", "Acme", "2025-09-01", 8.0)];

    let last = reconcile_with_policy(&subs, &events, &HashMap::new(), DuplicatePolicy::LastWins);
    assert_eq!(last[0].calculated_hours, 8.0);
    assert_eq!(last[0].start_time.unwrap().format("%H:%M").to_string(), "09:00");

    let first = reconcile_with_policy(&subs, &events, &HashMap::new(), DuplicatePolicy::FirstWins);
    assert_eq!(first[0].calculated_hours, 8.0);
    assert_eq!(first[0].start_time.unwrap().format("%H:%M").to_string(), "08:00");

    // Default is last-write-wins
    let default = reconcile(&subs, &events, &HashMap::new());
    assert_eq!(default, last);
}

#[test]
fn test_duplicate_policy_changes_classification() {
    let events = vec![
        start("w1", "2025-09-01", "08:00"),
        end("w1", "2025-09-01", "12:00"),
        end("w1", "2025-09-01", "16:00"),
    ];
    let subs = vec![submission("w1", "Acme", "2025-09-01", 8.0)];

    let last = reconcile_with_policy(&subs, &events, &HashMap::new(), DuplicatePolicy::LastWins);
    let first = reconcile_with_policy(&subs, &events, &HashMap::new(), DuplicatePolicy::FirstWins);

    assert_eq!(last[0].status, VerificationStatus::Pass);
    assert_eq!(first[0].status, VerificationStatus::Mismatch);
    assert_eq!(first[0].calculated_hours, 4.0);
}

#[test]
fn test_hours_rounded_to_two_decimals() {
    // 08:00 → 16:20 = 8.3333…h
    let events = vec![start("w1", "2025-09-01", "08:00"), end("w1", "2025-09-01", "16:20")];
    let subs = vec![submission("w1", "Acme", "2025-09-01", 8.33)];

    let records = reconcile(&subs, &events, &HashMap::new());

    assert_eq!(records[0].calculated_hours, 8.33);
    assert_eq!(records[0].status, VerificationStatus::Pass);
}

#[test]
fn test_sorted_by_date_desc_then_worker() {
    let subs = vec![
        submission("w2", "Acme", "2025-09-01", 1.0),
        submission("w1", "Acme", "2025-09-01", 1.0),
        submission("w3", "Acme", "2025-09-03", 1.0),
        submission("w1", "Acme", "2025-09-02", 1.0),
    ];

    let records = reconcile(&subs, &[], &HashMap::new());
    let keys: Vec<(String, String)> = records
        .iter()
        .map(|r| (r.date.to_string(), r.worker_id.clone()))
        .collect();

    assert_eq!(
        keys,
        vec![
            ("2025-09-03".to_string(), "w3".to_string()),
            ("2025-09-02".to_string(), "w1".to_string()),
            ("2025-09-01".to_string(), "w1".to_string()),
            ("2025-09-01".to_string(), "w2".to_string()),
        ]
    );
}

#[test]
fn test_empty_inputs_yield_no_records() {
    assert!(reconcile(&[], &[], &HashMap::new()).is_empty());
}

#[test]
fn test_parse_duplicate_policy() {
    assert_eq!(DuplicatePolicy::from_input("last"), Some(DuplicatePolicy::LastWins));
    assert_eq!(DuplicatePolicy::from_input(" First "), Some(DuplicatePolicy::FirstWins));
    assert_eq!(DuplicatePolicy::from_input("random"), None);
    assert_eq!(DuplicatePolicy::default().as_str(), "last");
}
