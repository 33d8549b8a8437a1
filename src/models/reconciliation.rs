use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pass,
    Mismatch,
    Incomplete,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pass => "pass",
            VerificationStatus::Mismatch => "mismatch",
            VerificationStatus::Incomplete => "incomplete",
        }
    }

    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pass" => Some(Self::Pass),
            "mismatch" => Some(Self::Mismatch),
            "incomplete" => Some(Self::Incomplete),
            _ => None,
        }
    }
}

/// Outcome of comparing one worker-day of submitted hours with the
/// clock-derived hours. Rebuilt on every query, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReconciliationRecord {
    pub worker_id: String,
    pub date: NaiveDate,
    pub display_name: String,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub calculated_hours: f64,
    pub submitted_hours: f64,
    pub status: VerificationStatus,
}

impl ReconciliationRecord {
    pub fn difference(&self) -> f64 {
        self.submitted_hours - self.calculated_hours
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationStats {
    pub pass: usize,
    pub mismatch: usize,
    pub incomplete: usize,
}

impl ReconciliationStats {
    pub fn from_records(records: &[ReconciliationRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            match r.status {
                VerificationStatus::Pass => acc.pass += 1,
                VerificationStatus::Mismatch => acc.mismatch += 1,
                VerificationStatus::Incomplete => acc.incomplete += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.pass + self.mismatch + self.incomplete
    }
}
