use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RateEntry {
    pub worker_id: String,
    pub hourly_rate: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContractBudget {
    pub company_name: String,
    pub total_amount: f64,
}

/// Registered worker profile; its display name wins over any name found
/// in the raw records.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkerProfile {
    pub worker_id: String,
    pub display_name: String,
    pub company_name: Option<String>,
}
