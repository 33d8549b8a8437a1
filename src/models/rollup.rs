use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// One approved submission priced at the worker's rate.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CostEntry {
    pub worker_id: String,
    pub worker_display_name: String,
    pub company_name: String,
    pub project_name: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub hourly_rate: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkerRollup {
    pub worker_display_name: String,
    pub company_name: String,
    pub hours: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompanyRollup {
    pub company_name: String,
    pub hours: f64,
    pub cost: f64,
    pub workers: BTreeSet<String>,
}

impl CompanyRollup {
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectRollup {
    pub project_name: String,
    pub hours: f64,
    pub cost: f64,
}

/// Display ordering for rollups. Has no effect on totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RollupOrder {
    #[default]
    CostDesc,
    HoursDesc,
    NameAsc,
}

impl RollupOrder {
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cost" => Some(Self::CostDesc),
            "hours" => Some(Self::HoursDesc),
            "name" => Some(Self::NameAsc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CostSummary {
    pub entries: Vec<CostEntry>,
    pub by_worker: Vec<WorkerRollup>,
    pub by_company: Vec<CompanyRollup>,
    pub by_project: Vec<ProjectRollup>,
    pub total_hours: f64,
    pub total_cost: f64,
}
