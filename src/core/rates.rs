//! Billing-rate lookup. Total by construction: anything unresolved is `0`.

use crate::models::RateEntry;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct RateResolver {
    rates: HashMap<String, f64>,
}

impl RateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = RateEntry>,
    {
        let rates = entries
            .into_iter()
            .map(|e| (e.worker_id, e.hourly_rate))
            .collect();
        Self { rates }
    }

    pub fn with_rate(mut self, worker_id: impl Into<String>, hourly_rate: f64) -> Self {
        self.rates.insert(worker_id.into(), hourly_rate);
        self
    }

    /// Hourly rate for `worker_id`; unknown workers and unusable stored
    /// values (negative, NaN, infinite) resolve to `0`.
    pub fn resolve(&self, worker_id: &str) -> f64 {
        match self.rates.get(worker_id) {
            Some(rate) if rate.is_finite() && *rate > 0.0 => *rate,
            _ => 0.0,
        }
    }

    pub fn is_known(&self, worker_id: &str) -> bool {
        self.rates.contains_key(worker_id)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl From<HashMap<String, RateEntry>> for RateResolver {
    fn from(map: HashMap<String, RateEntry>) -> Self {
        Self::from_entries(map.into_values())
    }
}
