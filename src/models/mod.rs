pub mod burndown;
pub mod clock_event;
pub mod rate;
pub mod reconciliation;
pub mod rollup;
pub mod submission;

pub use burndown::{BurndownPoint, BurndownSummary};
pub use clock_event::{ClockEvent, ClockKind};
pub use rate::{ContractBudget, RateEntry, WorkerProfile};
pub use reconciliation::{ReconciliationRecord, ReconciliationStats, VerificationStatus};
pub use rollup::{
    CompanyRollup, CostEntry, CostSummary, ProjectRollup, RollupOrder, WorkerRollup,
};
pub use submission::{ApprovalStatus, LaborSubmission};
