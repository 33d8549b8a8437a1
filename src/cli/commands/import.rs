use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::import::import_file;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { kind, file } = cmd {
        let mut pool = DbPool::open_initialized(&cfg.database)?;
        let path = expand_tilde(file);

        let report = import_file(&mut pool, *kind, &path)?;

        success(format!(
            "Imported {} {} rows from {}",
            report.imported,
            kind.as_str(),
            path.display()
        ));
        if report.skipped > 0 {
            warning(format!("{} rows skipped", report.skipped));
        }
    }
    Ok(())
}
