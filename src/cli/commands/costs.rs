use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::{Analytics, ReportQuery};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{CostSummary, RollupOrder};
use crate::ui::messages::{header, info, warning};
use crate::utils::date::format_date;
use crate::utils::formatting::{hours, money};
use crate::utils::range::resolve_range;
use crate::utils::table::{Column, Table};

fn print_rollups(summary: &CostSummary, cfg: &Config) {
    let sym = cfg.currency_symbol.as_str();
    let sep = cfg.separator_char.as_str();

    header("By worker");
    let mut workers = Table::new(vec![
        Column::left("Worker"),
        Column::left("Company"),
        Column::right("Hours"),
        Column::right("Cost"),
    ])
    .with_separator(sep);
    for w in &summary.by_worker {
        workers.add_row(vec![
            w.worker_display_name.clone(),
            w.company_name.clone(),
            hours(w.hours),
            money(w.cost, sym),
        ]);
    }
    println!("{}", workers.render());

    header("By company");
    let mut companies = Table::new(vec![
        Column::left("Company"),
        Column::right("Workers"),
        Column::right("Hours"),
        Column::right("Cost"),
    ])
    .with_separator(sep);
    for c in &summary.by_company {
        companies.add_row(vec![
            c.company_name.clone(),
            c.worker_count().to_string(),
            hours(c.hours),
            money(c.cost, sym),
        ]);
    }
    println!("{}", companies.render());

    header("By project");
    let mut projects = Table::new(vec![
        Column::left("Project"),
        Column::right("Hours"),
        Column::right("Cost"),
    ])
    .with_separator(sep);
    for p in &summary.by_project {
        let name = if p.project_name.is_empty() {
            "(none)".to_string()
        } else {
            p.project_name.clone()
        };
        projects.add_row(vec![name, hours(p.hours), money(p.cost, sym)]);
    }
    println!("{}", projects.render());

    println!(
        "\nTotal: {} for {}",
        money(summary.total_cost, sym),
        hours(summary.total_hours)
    );
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Costs {
        range,
        company,
        sort,
    } = cmd
    {
        let order = sort
            .as_deref()
            .map(|s| {
                RollupOrder::from_input(s).ok_or_else(|| {
                    AppError::Config(format!("sort must be 'cost', 'hours' or 'name', got '{s}'"))
                })
            })
            .transpose()?;

        let pool = DbPool::open_initialized(&cfg.database)?;
        let mut analytics = Analytics::from_config(cfg)?;

        let (from, to) = resolve_range(range.as_deref())?;
        let query = ReportQuery::new(from, to, company.clone());

        let mut summary = analytics.costs(&pool, &query)?.clone();
        if let Some(order) = order {
            summary.sort_by(order);
        }

        header(format!(
            "Labor costs {} → {}{}",
            format_date(from),
            format_date(to),
            company
                .as_deref()
                .map(|c| format!(" ({c})"))
                .unwrap_or_default()
        ));

        if summary.entries.is_empty() {
            info("No approved submissions for the selected range.");
            return Ok(());
        }

        print_rollups(&summary, cfg);

        let mut unpriced: Vec<&str> = summary
            .unpriced_entries()
            .map(|e| e.worker_id.as_str())
            .collect();
        unpriced.sort_unstable();
        unpriced.dedup();
        if !unpriced.is_empty() {
            warning(format!(
                "No billing rate for: {} (priced at 0)",
                unpriced.join(", ")
            ));
        }
    }

    Ok(())
}
