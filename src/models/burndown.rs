use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BurndownPoint {
    pub date: NaiveDate,
    pub day_index: usize,
    pub ideal_remaining: f64,
    pub actual_remaining: f64,
    pub daily_cost: f64,
    pub accumulated_cost: f64,
    pub contract_amount: f64,
}

impl BurndownPoint {
    /// Spend is running ahead of the linear budget line.
    pub fn is_behind_schedule(&self) -> bool {
        self.actual_remaining < self.ideal_remaining
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BurndownSummary {
    pub contract_amount: f64,
    pub total_days: usize,
    pub sample_interval: usize,
    pub total_spent: f64,
    pub remaining: f64,
    pub percent_used: f64,
    pub behind_schedule: bool,
}
