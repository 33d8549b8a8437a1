pub mod burndown;
pub mod costs;
pub mod log;
pub mod logic;
pub mod memo;
pub mod rates;
pub mod reconcile;

pub use burndown::compute_burndown;
pub use costs::aggregate_costs;
pub use rates::RateResolver;
pub use reconcile::reconcile;
