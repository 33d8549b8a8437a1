//! Cost aggregation: approved submissions priced through the rate resolver
//! and rolled up per worker, company and project.

use crate::core::rates::RateResolver;
use crate::models::{
    CompanyRollup, CostEntry, CostSummary, LaborSubmission, ProjectRollup, RollupOrder,
    WorkerRollup,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Price every approved submission. Non-approved submissions are skipped so
/// that every rollup is built from the same entry set.
pub fn cost_entries(submissions: &[LaborSubmission], rates: &RateResolver) -> Vec<CostEntry> {
    submissions
        .iter()
        .filter(|s| s.is_approved())
        .map(|s| {
            let hours = if s.hours_claimed.is_finite() && s.hours_claimed > 0.0 {
                s.hours_claimed
            } else {
                0.0
            };
            let hourly_rate = rates.resolve(&s.worker_id);

            CostEntry {
                worker_id: s.worker_id.clone(),
                worker_display_name: s.worker_display_name.clone(),
                company_name: s.company_name.clone(),
                project_name: s.project_name.clone(),
                date: s.date,
                hours,
                hourly_rate,
                cost: hours * hourly_rate,
            }
        })
        .collect()
}

/// Aggregate with the default display order (descending cost).
pub fn aggregate_costs(submissions: &[LaborSubmission], rates: &RateResolver) -> CostSummary {
    aggregate_costs_ordered(submissions, rates, RollupOrder::default())
}

pub fn aggregate_costs_ordered(
    submissions: &[LaborSubmission],
    rates: &RateResolver,
    order: RollupOrder,
) -> CostSummary {
    summarize_entries(cost_entries(submissions, rates), order)
}

/// Roll already-priced entries up into the three dimensions.
pub fn summarize_entries(entries: Vec<CostEntry>, order: RollupOrder) -> CostSummary {
    let mut workers: BTreeMap<(String, String), (f64, f64)> = BTreeMap::new();
    let mut companies: BTreeMap<String, (f64, f64, BTreeSet<String>)> = BTreeMap::new();
    let mut projects: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    let mut total_hours = 0.0;
    let mut total_cost = 0.0;

    for e in &entries {
        let w = workers
            .entry((e.worker_display_name.clone(), e.company_name.clone()))
            .or_default();
        w.0 += e.hours;
        w.1 += e.cost;

        let c = companies.entry(e.company_name.clone()).or_default();
        c.0 += e.hours;
        c.1 += e.cost;
        c.2.insert(e.worker_display_name.clone());

        let p = projects.entry(e.project_name.clone()).or_default();
        p.0 += e.hours;
        p.1 += e.cost;

        total_hours += e.hours;
        total_cost += e.cost;
    }

    let mut summary = CostSummary {
        entries,
        by_worker: workers
            .into_iter()
            .map(|((worker_display_name, company_name), (hours, cost))| WorkerRollup {
                worker_display_name,
                company_name,
                hours,
                cost,
            })
            .collect(),
        by_company: companies
            .into_iter()
            .map(|(company_name, (hours, cost, workers))| CompanyRollup {
                company_name,
                hours,
                cost,
                workers,
            })
            .collect(),
        by_project: projects
            .into_iter()
            .map(|(project_name, (hours, cost))| ProjectRollup {
                project_name,
                hours,
                cost,
            })
            .collect(),
        total_hours,
        total_cost,
    };

    summary.sort_by(order);
    summary
}

impl CostSummary {
    /// Reorder worker and company rollups. Projects always stay by name.
    pub fn sort_by(&mut self, order: RollupOrder) {
        match order {
            RollupOrder::CostDesc => {
                self.by_worker
                    .sort_by(|a, b| desc(a.cost, b.cost).then_with(|| worker_name_cmp(a, b)));
                self.by_company.sort_by(|a, b| {
                    desc(a.cost, b.cost).then_with(|| a.company_name.cmp(&b.company_name))
                });
            }
            RollupOrder::HoursDesc => {
                self.by_worker
                    .sort_by(|a, b| desc(a.hours, b.hours).then_with(|| worker_name_cmp(a, b)));
                self.by_company.sort_by(|a, b| {
                    desc(a.hours, b.hours).then_with(|| a.company_name.cmp(&b.company_name))
                });
            }
            RollupOrder::NameAsc => {
                self.by_worker.sort_by(worker_name_cmp);
                self.by_company
                    .sort_by(|a, b| a.company_name.cmp(&b.company_name));
            }
        }
    }

    pub fn company(&self, name: &str) -> Option<&CompanyRollup> {
        self.by_company.iter().find(|c| c.company_name == name)
    }

    /// Entries with a zero rate, i.e. workers billed at `$0`.
    pub fn unpriced_entries(&self) -> impl Iterator<Item = &CostEntry> {
        self.entries.iter().filter(|e| e.hourly_rate == 0.0)
    }
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn worker_name_cmp(a: &WorkerRollup, b: &WorkerRollup) -> Ordering {
    a.worker_display_name
        .cmp(&b.worker_display_name)
        .then_with(|| a.company_name.cmp(&b.company_name))
}
