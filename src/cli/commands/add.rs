use crate::cli::parser::{AddRecord, Commands};
use crate::config::Config;
use crate::db::log::{bump_data_version, write_log};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{
    ApprovalStatus, ClockEvent, ClockKind, ContractBudget, LaborSubmission, RateEntry,
    WorkerProfile,
};
use crate::ui::messages::success;
use crate::utils::date::parse_date;
use crate::utils::time::parse_timestamp;

fn non_negative(value: f64, what: &str) -> AppResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AppError::InvalidRecord(format!(
            "{what} must be a non-negative number, got {value}"
        )))
    }
}

/// Add one raw record.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { record } = cmd {
        let mut pool = DbPool::open_initialized(&cfg.database)?;

        let (target, message) = pool.with_transaction(|tx| {
            let out = match record {
                AddRecord::Submission {
                    worker,
                    name,
                    company,
                    project,
                    date,
                    hours,
                    status,
                } => {
                    let date =
                        parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
                    let approval_status = ApprovalStatus::from_input(status)
                        .ok_or_else(|| AppError::InvalidStatus(status.clone()))?;

                    // Without --name the registered profile name is stored.
                    let worker_display_name = match name {
                        Some(n) => n.clone(),
                        None => queries::load_profile(tx, worker)?
                            .map(|p| p.display_name)
                            .unwrap_or_default(),
                    };

                    let sub = LaborSubmission {
                        worker_id: worker.clone(),
                        worker_display_name,
                        company_name: company.clone(),
                        project_name: project.clone(),
                        date,
                        hours_claimed: non_negative(*hours, "hours")?,
                        approval_status,
                    };
                    queries::insert_submission(tx, &sub)?;

                    (
                        "submission",
                        format!(
                            "{} {} {:.2}h ({})",
                            sub.worker_id,
                            sub.date_str(),
                            sub.hours_claimed,
                            approval_status.to_db_str()
                        ),
                    )
                }

                AddRecord::Clock {
                    worker,
                    date,
                    kind,
                    time,
                    reporter,
                } => {
                    let date =
                        parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
                    let kind = ClockKind::from_input(kind)
                        .ok_or_else(|| AppError::InvalidEventKind(kind.clone()))?;
                    let ts = parse_timestamp(time, date)
                        .ok_or_else(|| AppError::InvalidTime(time.clone()))?;

                    let ev = ClockEvent::new(worker.clone(), date, kind, Some(ts), reporter.clone());
                    queries::insert_clock_event(tx, &ev)?;

                    (
                        "clock",
                        format!("{} {} {} {}", ev.worker_id, ev.date_str(), kind.to_db_str(), ev.time_str()),
                    )
                }

                AddRecord::Rate { worker, rate } => {
                    let entry = RateEntry {
                        worker_id: worker.clone(),
                        hourly_rate: non_negative(*rate, "rate")?,
                    };
                    queries::upsert_rate(tx, &entry)?;

                    ("rate", format!("{} {:.2}/h", entry.worker_id, entry.hourly_rate))
                }

                AddRecord::Budget { company, amount } => {
                    let budget = ContractBudget {
                        company_name: company.clone(),
                        total_amount: non_negative(*amount, "amount")?,
                    };
                    queries::upsert_budget(tx, &budget)?;

                    ("budget", format!("{} {:.2}", budget.company_name, budget.total_amount))
                }

                AddRecord::Profile {
                    worker,
                    name,
                    company,
                } => {
                    let profile = WorkerProfile {
                        worker_id: worker.clone(),
                        display_name: name.clone(),
                        company_name: company.clone(),
                    };
                    queries::upsert_profile(tx, &profile)?;

                    ("profile", format!("{} → {}", profile.worker_id, profile.display_name))
                }
            };

            bump_data_version(tx)?;
            write_log(tx, "add", out.0, &out.1)?;
            Ok(out)
        })?;

        success(format!("Added {target}: {message}"));
    }

    Ok(())
}
