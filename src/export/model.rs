// src/export/model.rs

use crate::models::{BurndownPoint, ReconciliationRecord, WorkerRollup};
use crate::utils::date::format_date;
use serde::Serialize;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Flat verification row.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationExport {
    pub status: String,
    pub worker: String,
    pub date: String,
    pub clock_in: String,
    pub clock_out: String,
    pub calculated_hours: f64,
    pub submitted_hours: f64,
}

impl From<&ReconciliationRecord> for VerificationExport {
    fn from(r: &ReconciliationRecord) -> Self {
        Self {
            status: r.status.as_str().to_string(),
            worker: r.display_name.clone(),
            date: format_date(r.date),
            clock_in: r
                .start_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            clock_out: r
                .end_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            calculated_hours: round2(r.calculated_hours),
            submitted_hours: round2(r.submitted_hours),
        }
    }
}

/// Flat burndown row.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BurndownExport {
    pub date: String,
    pub day: usize,
    pub ideal_remaining: f64,
    pub actual_remaining: f64,
    pub daily_cost: f64,
    pub accumulated_cost: f64,
    pub contract_amount: f64,
}

impl From<&BurndownPoint> for BurndownExport {
    fn from(p: &BurndownPoint) -> Self {
        Self {
            date: format_date(p.date),
            day: p.day_index,
            ideal_remaining: round2(p.ideal_remaining),
            actual_remaining: round2(p.actual_remaining),
            daily_cost: round2(p.daily_cost),
            accumulated_cost: round2(p.accumulated_cost),
            contract_amount: round2(p.contract_amount),
        }
    }
}

/// Flat per-worker cost row.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CostExport {
    pub worker: String,
    pub company: String,
    pub hours: f64,
    pub cost: f64,
}

impl From<&WorkerRollup> for CostExport {
    fn from(w: &WorkerRollup) -> Self {
        Self {
            worker: w.worker_display_name.clone(),
            company: w.company_name.clone(),
            hours: round2(w.hours),
            cost: round2(w.cost),
        }
    }
}
