use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::burndown::{MAX_RANGE_DAYS, total_days};
use crate::core::logic::{Analytics, ContractSource, ReportQuery};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::BurndownSummary;
use crate::ui::messages::{header, info, warning};
use crate::utils::colors::{RESET, color_for_remaining};
use crate::utils::date::format_date;
use crate::utils::formatting::{money, percent};
use crate::utils::range::resolve_range;
use crate::utils::table::{Column, Table};

fn print_summary(s: &BurndownSummary, source: ContractSource, sym: &str) {
    let origin = match source {
        ContractSource::Override => " (override)",
        _ => "",
    };
    println!("Contract   : {}{}", money(s.contract_amount, sym), origin);
    println!("Spent      : {} ({})", money(s.total_spent, sym), percent(s.percent_used));
    println!("Remaining  : {}", money(s.remaining, sym));
    println!(
        "Days       : {} (one point every {} day{})",
        s.total_days,
        s.sample_interval,
        if s.sample_interval == 1 { "" } else { "s" }
    );
    if s.behind_schedule {
        warning("Spend has run ahead of the ideal burndown line.");
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Burndown {
        range,
        company,
        amount,
    } = cmd
    {
        let pool = DbPool::open_initialized(&cfg.database)?;
        let mut analytics = Analytics::from_config(cfg)?;

        let (from, to) = resolve_range(range.as_deref())?;
        let query = ReportQuery::new(from, to, company.clone());

        header(format!(
            "Burndown {} → {}{}",
            format_date(from),
            format_date(to),
            company
                .as_deref()
                .map(|c| format!(" ({c})"))
                .unwrap_or_default()
        ));

        if total_days(from, to) > MAX_RANGE_DAYS {
            warning(format!(
                "Range spans more than {MAX_RANGE_DAYS} days; no burndown is produced."
            ));
            return Ok(());
        }

        let report = analytics.burndown(&pool, &query, *amount)?;

        if report.contract_source == ContractSource::Missing {
            warning("No contract budget: pass --company with a stored budget, or --amount.");
            return Ok(());
        }

        let Some(summary) = report.summary.as_ref() else {
            info("No approved spend in the selected range.");
            return Ok(());
        };

        let sym = cfg.currency_symbol.as_str();
        print_summary(summary, report.contract_source, sym);
        println!();

        let mut table = Table::new(vec![
            Column::left("Date"),
            Column::right("Day"),
            Column::right("Ideal"),
            Column::right("Actual"),
            Column::right("Daily"),
            Column::right("Accumulated"),
        ])
        .with_separator(&cfg.separator_char);

        for p in &report.points {
            let color = color_for_remaining(p.actual_remaining, p.ideal_remaining);
            table.add_row(vec![
                format_date(p.date),
                p.day_index.to_string(),
                money(p.ideal_remaining, sym),
                format!("{color}{}{RESET}", money(p.actual_remaining, sym)),
                money(p.daily_cost, sym),
                money(p.accumulated_cost, sym),
            ]);
        }

        println!("{}", table.render());
    }

    Ok(())
}
