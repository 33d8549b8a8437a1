// src/export/logic.rs

use crate::core::logic::{Analytics, ReportQuery};
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{BurndownExport, CostExport, VerificationExport};
use crate::export::{ExportFormat, ExportTarget};
use crate::ui::messages::warning;
use serde::Serialize;
use std::path::Path;

/// High-level export of an analytic report.
pub struct ExportLogic;

impl ExportLogic {
    /// Export one report for `query` into `file` (absolute path).
    ///
    /// Returns the number of rows written; `0` means nothing was written.
    pub fn export(
        pool: &DbPool,
        analytics: &mut Analytics,
        target: ExportTarget,
        format: ExportFormat,
        file: &Path,
        query: &ReportQuery,
        contract_override: Option<f64>,
        force: bool,
    ) -> AppResult<usize> {
        if !file.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {}",
                file.display()
            )));
        }

        ensure_writable(file, force)?;

        let written = match target {
            ExportTarget::Verification => {
                let rows: Vec<VerificationExport> = analytics
                    .verification(pool, query)?
                    .iter()
                    .map(VerificationExport::from)
                    .collect();
                write_rows(&rows, format, file)?
            }
            ExportTarget::Costs => {
                let rows: Vec<CostExport> = analytics
                    .costs(pool, query)?
                    .by_worker
                    .iter()
                    .map(CostExport::from)
                    .collect();
                write_rows(&rows, format, file)?
            }
            ExportTarget::Burndown => {
                let report = analytics.burndown(pool, query, contract_override)?;
                let rows: Vec<BurndownExport> =
                    report.points.iter().map(BurndownExport::from).collect();
                write_rows(&rows, format, file)?
            }
        };

        if written > 0 {
            write_log(
                &pool.conn,
                "export",
                target.as_str(),
                &format!("{written} rows as {} → {}", format.as_str(), file.display()),
            )?;
        }

        Ok(written)
    }
}

fn write_rows<T: Serialize>(rows: &[T], format: ExportFormat, path: &Path) -> AppResult<usize> {
    if rows.is_empty() {
        warning("No rows to export for the selected range.");
        return Ok(0);
    }

    match format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
    }

    Ok(rows.len())
}
