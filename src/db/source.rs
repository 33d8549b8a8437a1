//! The fetch interface the analytics layer consumes, and its SQLite
//! implementation. Fetch failures propagate; there are no retries and no
//! fallback source.

use crate::db::log::read_data_version;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{ClockEvent, ContractBudget, LaborSubmission, RateEntry, WorkerProfile};
use chrono::NaiveDate;
use std::collections::HashMap;

pub trait RecordSource {
    fn fetch_labor_submissions(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
        company: Option<&str>,
    ) -> AppResult<Vec<LaborSubmission>>;

    fn fetch_clock_events(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
        company: Option<&str>,
    ) -> AppResult<Vec<ClockEvent>>;

    fn fetch_rates(&self) -> AppResult<HashMap<String, RateEntry>>;

    fn fetch_contract_budget(&self, company: &str) -> AppResult<Option<ContractBudget>>;

    fn fetch_worker_profile(&self, worker_id: &str) -> AppResult<Option<WorkerProfile>>;

    fn fetch_worker_profiles(&self) -> AppResult<HashMap<String, WorkerProfile>>;

    /// Monotonic counter identifying the current state of the records.
    fn data_version(&self) -> AppResult<u64>;
}

impl RecordSource for DbPool {
    fn fetch_labor_submissions(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
        company: Option<&str>,
    ) -> AppResult<Vec<LaborSubmission>> {
        queries::load_submissions(&self.conn, date_from, date_to, company)
    }

    fn fetch_clock_events(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
        company: Option<&str>,
    ) -> AppResult<Vec<ClockEvent>> {
        queries::load_clock_events(&self.conn, date_from, date_to, company)
    }

    fn fetch_rates(&self) -> AppResult<HashMap<String, RateEntry>> {
        queries::load_rates(&self.conn)
    }

    fn fetch_contract_budget(&self, company: &str) -> AppResult<Option<ContractBudget>> {
        queries::load_budget(&self.conn, company)
    }

    fn fetch_worker_profile(&self, worker_id: &str) -> AppResult<Option<WorkerProfile>> {
        queries::load_profile(&self.conn, worker_id)
    }

    fn fetch_worker_profiles(&self) -> AppResult<HashMap<String, WorkerProfile>> {
        queries::load_profiles(&self.conn)
    }

    fn data_version(&self) -> AppResult<u64> {
        read_data_version(&self.conn)
    }
}
