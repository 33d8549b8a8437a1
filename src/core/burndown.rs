//! Budget burndown: ideal linear depletion vs. actual accumulated spend.
//!
//! Two phases:
//! 1. [`DailyLedger::build`] accumulates cost over *every* day of the range.
//! 2. [`select_points`] picks which days are emitted.
//!
//! `accumulated_cost` therefore never depends on the sampling interval.

use crate::core::costs::cost_entries;
use crate::core::rates::RateResolver;
use crate::models::{BurndownPoint, BurndownSummary, CostEntry, LaborSubmission};
use chrono::{Days, NaiveDate};

/// Ranges longer than this produce an empty series ("too large to chart").
pub const MAX_RANGE_DAYS: usize = 730;

/// Inclusive day count of `[from, to]`; `0` for an inverted range.
pub fn total_days(from: NaiveDate, to: NaiveDate) -> usize {
    let days = (to - from).num_days() + 1;
    usize::try_from(days).unwrap_or(0)
}

/// Days between emitted points.
pub fn sample_interval(total_days: usize) -> usize {
    match total_days {
        0..=90 => 1,
        91..=180 => 3,
        _ => 7,
    }
}

/// Full-resolution per-day cost and its prefix sum.
#[derive(Debug, Clone)]
pub struct DailyLedger {
    start: NaiveDate,
    daily: Vec<f64>,
    accumulated: Vec<f64>,
}

impl DailyLedger {
    /// Entries dated outside `[start, start + total_days)` are ignored.
    pub fn build(entries: &[CostEntry], start: NaiveDate, total_days: usize) -> Self {
        let mut daily = vec![0.0; total_days];

        for e in entries {
            let offset = (e.date - start).num_days();
            if let Ok(idx) = usize::try_from(offset)
                && idx < total_days
            {
                daily[idx] += e.cost;
            }
        }

        let accumulated = daily
            .iter()
            .scan(0.0, |acc, cost| {
                *acc += cost;
                Some(*acc)
            })
            .collect();

        Self {
            start,
            daily,
            accumulated,
        }
    }

    pub fn len(&self) -> usize {
        self.daily.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }

    pub fn daily_cost(&self, day_index: usize) -> f64 {
        self.daily.get(day_index).copied().unwrap_or(0.0)
    }

    pub fn accumulated_cost(&self, day_index: usize) -> f64 {
        self.accumulated.get(day_index).copied().unwrap_or(0.0)
    }

    pub fn date_at(&self, day_index: usize) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(day_index as u64))
            .unwrap_or(self.start)
    }
}

/// Point selection over a built ledger. The final day is always emitted,
/// with `ideal_remaining = 0`.
pub fn select_points(
    ledger: &DailyLedger,
    contract_amount: f64,
    interval: usize,
) -> Vec<BurndownPoint> {
    let n = ledger.len();
    if n == 0 {
        return Vec::new();
    }
    let last = n - 1;

    let point = |day_index: usize| {
        let ideal_remaining = if day_index == last {
            0.0
        } else {
            (contract_amount * (1.0 - day_index as f64 / last as f64)).max(0.0)
        };
        let accumulated_cost = ledger.accumulated_cost(day_index);

        BurndownPoint {
            date: ledger.date_at(day_index),
            day_index,
            ideal_remaining,
            actual_remaining: (contract_amount - accumulated_cost).max(0.0),
            daily_cost: ledger.daily_cost(day_index),
            accumulated_cost,
            contract_amount,
        }
    };

    let mut points: Vec<BurndownPoint> = (0..n).step_by(interval.max(1)).map(&point).collect();

    if points.last().map(|p| p.day_index) != Some(last) {
        points.push(point(last));
    }

    points
}

/// Burndown for approved submissions priced through `rates`.
pub fn compute_burndown(
    approved_submissions: &[LaborSubmission],
    contract_amount: f64,
    date_from: NaiveDate,
    date_to: NaiveDate,
    rates: &RateResolver,
) -> Vec<BurndownPoint> {
    let entries = cost_entries(approved_submissions, rates);
    burndown_from_entries(&entries, contract_amount, date_from, date_to)
}

/// Burndown over already-priced entries (e.g. from a cached cost summary).
pub fn burndown_from_entries(
    entries: &[CostEntry],
    contract_amount: f64,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Vec<BurndownPoint> {
    let days = total_days(date_from, date_to);
    if days == 0 || days > MAX_RANGE_DAYS {
        return Vec::new();
    }

    if !contract_amount.is_finite() || contract_amount <= 0.0 {
        return Vec::new();
    }

    let in_window = entries
        .iter()
        .any(|e| e.date >= date_from && e.date <= date_to);
    if !in_window {
        return Vec::new();
    }

    let ledger = DailyLedger::build(entries, date_from, days);
    select_points(&ledger, contract_amount, sample_interval(days))
}

impl BurndownSummary {
    /// Header figures for a series; `None` for an empty series.
    pub fn from_series(series: &[BurndownPoint]) -> Option<Self> {
        let last = series.last()?;
        let total_days = last.day_index + 1;
        let contract_amount = last.contract_amount;
        let total_spent = last.accumulated_cost;

        let percent_used = if contract_amount > 0.0 {
            total_spent / contract_amount * 100.0
        } else {
            0.0
        };

        Some(Self {
            contract_amount,
            total_days,
            sample_interval: sample_interval(total_days),
            total_spent,
            remaining: last.actual_remaining,
            percent_used,
            behind_schedule: series.iter().any(|p| p.is_behind_schedule()),
        })
    }
}
