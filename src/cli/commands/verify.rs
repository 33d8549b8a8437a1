use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::{Analytics, ReportQuery};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{ReconciliationRecord, ReconciliationStats, VerificationStatus};
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_optional, colorize_status};
use crate::utils::date::format_date;
use crate::utils::formatting::hours;
use crate::utils::range::resolve_range;
use crate::utils::table::{Column, Table};
use chrono::NaiveDateTime;

fn clock(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

fn render(records: &[&ReconciliationRecord], separator: &str) -> String {
    let mut table = Table::new(vec![
        Column::left("Status"),
        Column::left("Date"),
        Column::left("Worker"),
        Column::right("In"),
        Column::right("Out"),
        Column::right("Clocked"),
        Column::right("Submitted"),
        Column::right("Diff"),
    ])
    .with_separator(separator);

    for r in records {
        table.add_row(vec![
            colorize_status(r.status),
            format_date(r.date),
            r.display_name.clone(),
            colorize_optional(&clock(r.start_time), r.start_time.is_none()),
            colorize_optional(&clock(r.end_time), r.end_time.is_none()),
            colorize_optional(
                &hours(r.calculated_hours),
                r.status == VerificationStatus::Incomplete,
            ),
            colorize_optional(&hours(r.submitted_hours), r.submitted_hours == 0.0),
            format!("{:+.2}", r.difference()),
        ]);
    }

    table.render()
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Verify {
        range,
        company,
        status,
    } = cmd
    {
        let wanted = status
            .as_deref()
            .map(|s| {
                VerificationStatus::from_input(s).ok_or_else(|| {
                    AppError::InvalidRecord(format!(
                        "unknown verification status '{s}' (pass, mismatch, incomplete)"
                    ))
                })
            })
            .transpose()?;

        let pool = DbPool::open_initialized(&cfg.database)?;
        let mut analytics = Analytics::from_config(cfg)?;

        let (from, to) = resolve_range(range.as_deref())?;
        let query = ReportQuery::new(from, to, company.clone());
        let records = analytics.verification(&pool, &query)?;

        header(format!(
            "Verification {} → {}{}",
            format_date(from),
            format_date(to),
            company
                .as_deref()
                .map(|c| format!(" ({c})"))
                .unwrap_or_default()
        ));

        let shown: Vec<&ReconciliationRecord> = records
            .iter()
            .filter(|r| wanted.is_none_or(|w| r.status == w))
            .collect();

        if shown.is_empty() {
            info("No worker-days to reconcile for the selected range.");
            return Ok(());
        }

        println!("{}", render(&shown, &cfg.separator_char));

        let stats = ReconciliationStats::from_records(records);
        println!(
            "\n{} worker-days: {} pass, {} mismatch, {} incomplete",
            stats.total(),
            stats.pass,
            stats.mismatch,
            stats.incomplete
        );
    }

    Ok(())
}
