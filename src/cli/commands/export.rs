use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::{Analytics, ReportQuery};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::logic::ExportLogic;
use crate::utils::path::expand_tilde;
use crate::utils::range::resolve_range;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        report,
        format,
        file,
        range,
        company,
        amount,
        force,
    } = cmd
    {
        let pool = DbPool::open_initialized(&cfg.database)?;
        let mut analytics = Analytics::from_config(cfg)?;

        let (from, to) = resolve_range(range.as_deref())?;
        let query = ReportQuery::new(from, to, company.clone());
        let path = expand_tilde(file);

        ExportLogic::export(
            &pool,
            &mut analytics,
            *report,
            *format,
            &path,
            &query,
            *amount,
            *force,
        )?;
    }
    Ok(())
}
