//! Worker-day reconciliation of submitted hours against clock events.
//!
//! Every `(worker_id, date)` key seen in *either* input yields a record:
//! a missing submission or a missing clock pair is reported as
//! `incomplete`, never dropped and never an error.

use crate::models::{
    ClockEvent, ClockKind, LaborSubmission, ReconciliationRecord, VerificationStatus,
    WorkerProfile,
};
use crate::utils::time::hours_between;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Maximum absolute difference (hours) still classified as `pass`. Inclusive.
pub const PASS_TOLERANCE_HOURS: f64 = 0.25;

/// Absorbs float noise from the 2-decimal rounding so that a difference of
/// exactly 0.25 compares as 0.25.
const TOLERANCE_EPSILON: f64 = 1e-9;

type WorkerDay = (String, NaiveDate);

/// Which event wins when a worker-day has several events of the same kind.
///
/// This is a policy choice, not a property of the data: the stored records
/// do not say which duplicate is authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    #[default]
    LastWins,
    FirstWins,
}

impl DuplicatePolicy {
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "last" | "last-wins" => Some(Self::LastWins),
            "first" | "first-wins" => Some(Self::FirstWins),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::LastWins => "last",
            DuplicatePolicy::FirstWins => "first",
        }
    }
}

/// The start/end events retained for one worker-day.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClockSession<'a> {
    pub start: Option<&'a ClockEvent>,
    pub end: Option<&'a ClockEvent>,
}

impl<'a> ClockSession<'a> {
    /// Ordered-overwrite reduction step: events must be fed in processing order.
    fn absorb(&mut self, event: &'a ClockEvent, policy: DuplicatePolicy) {
        let slot = match event.kind {
            ClockKind::Start => &mut self.start,
            ClockKind::End => &mut self.end,
        };

        match policy {
            DuplicatePolicy::LastWins => *slot = Some(event),
            DuplicatePolicy::FirstWins => {
                if slot.is_none() {
                    *slot = Some(event);
                }
            }
        }
    }

    /// Hours between start and end, rounded to 2 decimals.
    /// `0` unless both events exist with parseable timestamps in order.
    pub fn calculated_hours(&self) -> f64 {
        let start = self.start.and_then(|e| e.timestamp);
        let end = self.end.and_then(|e| e.timestamp);

        match (start, end) {
            (Some(s), Some(e)) => round2(hours_between(s, e)),
            _ => 0.0,
        }
    }

    fn reporter_name(&self) -> Option<&'a str> {
        [self.start, self.end]
            .into_iter()
            .flatten()
            .map(|e| e.reporter_display_name.trim())
            .find(|name| !name.is_empty())
    }
}

/// Group clock events by worker-day, reducing duplicates with `policy`.
pub fn group_clock_events(
    events: &[ClockEvent],
    policy: DuplicatePolicy,
) -> BTreeMap<WorkerDay, ClockSession<'_>> {
    let mut sessions: BTreeMap<WorkerDay, ClockSession<'_>> = BTreeMap::new();

    for ev in events {
        sessions
            .entry((ev.worker_id.clone(), ev.date))
            .or_default()
            .absorb(ev, policy);
    }

    sessions
}

/// Group submissions by worker-day; the first submission found for a key wins.
pub fn group_submissions(
    submissions: &[LaborSubmission],
) -> BTreeMap<WorkerDay, &LaborSubmission> {
    let mut grouped = BTreeMap::new();

    for sub in submissions {
        grouped.entry((sub.worker_id.clone(), sub.date)).or_insert(sub);
    }

    grouped
}

/// Classify one worker-day. Both sides must be positive to be comparable.
pub fn classify(calculated_hours: f64, submitted_hours: f64) -> VerificationStatus {
    if calculated_hours > 0.0 && submitted_hours > 0.0 {
        if (calculated_hours - submitted_hours).abs() <= PASS_TOLERANCE_HOURS + TOLERANCE_EPSILON
        {
            VerificationStatus::Pass
        } else {
            VerificationStatus::Mismatch
        }
    } else {
        VerificationStatus::Incomplete
    }
}

/// Profile name → submitted name → clock reporter name → placeholder.
pub fn resolve_display_name(
    worker_id: &str,
    profile: Option<&WorkerProfile>,
    submission: Option<&LaborSubmission>,
    session: Option<&ClockSession<'_>>,
) -> String {
    profile
        .map(|p| p.display_name.trim())
        .filter(|n| !n.is_empty())
        .or_else(|| {
            submission
                .map(|s| s.worker_display_name.trim())
                .filter(|n| !n.is_empty())
        })
        .or_else(|| session.and_then(|s| s.reporter_name()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Unknown ({worker_id})"))
}

/// Reconcile with the default duplicate policy (last-write-wins).
pub fn reconcile(
    submissions: &[LaborSubmission],
    clock_events: &[ClockEvent],
    profiles: &HashMap<String, WorkerProfile>,
) -> Vec<ReconciliationRecord> {
    reconcile_with_policy(
        submissions,
        clock_events,
        profiles,
        DuplicatePolicy::default(),
    )
}

pub fn reconcile_with_policy(
    submissions: &[LaborSubmission],
    clock_events: &[ClockEvent],
    profiles: &HashMap<String, WorkerProfile>,
    policy: DuplicatePolicy,
) -> Vec<ReconciliationRecord> {
    let sessions = group_clock_events(clock_events, policy);
    let subs = group_submissions(submissions);

    let keys: BTreeSet<&WorkerDay> = sessions.keys().chain(subs.keys()).collect();

    let mut records: Vec<ReconciliationRecord> = keys
        .into_iter()
        .map(|key| {
            let (worker_id, date) = key;
            let session = sessions.get(key);
            let submission = subs.get(key).copied();

            let calculated_hours = session.map(|s| s.calculated_hours()).unwrap_or(0.0);
            let submitted_hours = submission
                .map(|s| sanitize_hours(s.hours_claimed))
                .unwrap_or(0.0);

            ReconciliationRecord {
                worker_id: worker_id.clone(),
                date: *date,
                display_name: resolve_display_name(
                    worker_id,
                    profiles.get(worker_id),
                    submission,
                    session,
                ),
                start_time: session.and_then(|s| s.start).and_then(|e| e.timestamp),
                end_time: session.and_then(|s| s.end).and_then(|e| e.timestamp),
                calculated_hours,
                submitted_hours,
                status: classify(calculated_hours, submitted_hours),
            }
        })
        .collect();

    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| a.worker_id.cmp(&b.worker_id))
    });

    records
}

fn sanitize_hours(h: f64) -> f64 {
    if h.is_finite() && h > 0.0 { h } else { 0.0 }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
