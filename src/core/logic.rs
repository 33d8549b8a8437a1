//! Caller-side analytics service: pulls a snapshot from a [`RecordSource`],
//! runs the pure core functions and memoizes whole results per snapshot.

use crate::config::Config;
use crate::core::burndown::burndown_from_entries;
use crate::core::memo::{SnapshotCache, SnapshotKey};
use crate::core::rates::RateResolver;
use crate::core::reconcile::{DuplicatePolicy, reconcile_with_policy};
use crate::core::costs::aggregate_costs_ordered;
use crate::db::source::RecordSource;
use crate::errors::AppResult;
use crate::models::{
    BurndownPoint, BurndownSummary, CostSummary, ReconciliationRecord, RollupOrder,
};
use chrono::NaiveDate;

/// The snapshot a query runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub company: Option<String>,
}

impl ReportQuery {
    pub fn new(date_from: NaiveDate, date_to: NaiveDate, company: Option<String>) -> Self {
        Self {
            date_from,
            date_to,
            company,
        }
    }

    fn key(&self, data_version: u64) -> SnapshotKey {
        SnapshotKey::new(
            self.date_from,
            self.date_to,
            self.company.as_deref(),
            data_version,
        )
    }
}

/// Where the contract amount of a burndown came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractSource {
    Budget,
    Override,
    Missing,
}

#[derive(Debug, Clone)]
pub struct BurndownReport {
    pub contract_amount: f64,
    pub contract_source: ContractSource,
    pub points: Vec<BurndownPoint>,
    pub summary: Option<BurndownSummary>,
}

#[derive(Debug, Default)]
pub struct Analytics {
    policy: DuplicatePolicy,
    order: RollupOrder,
    verification: SnapshotCache<Vec<ReconciliationRecord>>,
    costs: SnapshotCache<CostSummary>,
}

impl Analytics {
    pub fn new(policy: DuplicatePolicy, order: RollupOrder) -> Self {
        Self {
            policy,
            order,
            ..Self::default()
        }
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Ok(Self::new(cfg.duplicate_policy()?, cfg.rollup_order()?))
    }

    /// Current source version; entries computed from older versions are dropped.
    fn current_version<S: RecordSource>(&mut self, source: &S) -> AppResult<u64> {
        let version = source.data_version()?;
        self.verification.retain_version(version);
        self.costs.retain_version(version);
        Ok(version)
    }

    pub fn verification<S: RecordSource>(
        &mut self,
        source: &S,
        query: &ReportQuery,
    ) -> AppResult<&[ReconciliationRecord]> {
        let key = query.key(self.current_version(source)?);
        let policy = self.policy;

        let records = self.verification.get_or_try_insert_with(key, || {
            let company = query.company.as_deref();
            let submissions =
                source.fetch_labor_submissions(query.date_from, query.date_to, company)?;
            let events = source.fetch_clock_events(query.date_from, query.date_to, company)?;
            let profiles = source.fetch_worker_profiles()?;

            AppResult::Ok(reconcile_with_policy(
                &submissions,
                &events,
                &profiles,
                policy,
            ))
        })?;

        Ok(records.as_slice())
    }

    pub fn costs<S: RecordSource>(
        &mut self,
        source: &S,
        query: &ReportQuery,
    ) -> AppResult<&CostSummary> {
        let key = query.key(self.current_version(source)?);
        let order = self.order;

        self.costs.get_or_try_insert_with(key, || {
            let submissions = source.fetch_labor_submissions(
                query.date_from,
                query.date_to,
                query.company.as_deref(),
            )?;
            let rates = RateResolver::from(source.fetch_rates()?);

            AppResult::Ok(aggregate_costs_ordered(&submissions, &rates, order))
        })
    }

    /// Burndown over the cached cost entries of `query`.
    ///
    /// The contract amount is `contract_override` when given, otherwise the
    /// company's stored budget. Without either the series is empty.
    pub fn burndown<S: RecordSource>(
        &mut self,
        source: &S,
        query: &ReportQuery,
        contract_override: Option<f64>,
    ) -> AppResult<BurndownReport> {
        let (contract_amount, contract_source) = match contract_override {
            Some(amount) => (amount, ContractSource::Override),
            None => match query.company.as_deref() {
                Some(company) => match source.fetch_contract_budget(company)? {
                    Some(budget) => (budget.total_amount, ContractSource::Budget),
                    None => (0.0, ContractSource::Missing),
                },
                None => (0.0, ContractSource::Missing),
            },
        };

        let costs = self.costs(source, query)?;
        let points = burndown_from_entries(
            &costs.entries,
            contract_amount,
            query.date_from,
            query.date_to,
        );
        let summary = BurndownSummary::from_series(&points);

        Ok(BurndownReport {
            contract_amount,
            contract_source,
            points,
            summary,
        })
    }

    pub fn cached_results(&self) -> usize {
        self.verification.len() + self.costs.len()
    }

    pub fn cache_hits(&self) -> usize {
        self.verification.hits() + self.costs.hits()
    }
}
