//! `--range` parsing.
//!
//! Accepted forms:
//! - `YYYY`
//! - `YYYY-MM`
//! - `YYYY-MM-DD`
//! - `A:B` where both sides use one of the forms above, the same one

use crate::errors::{AppError, AppResult};
use crate::utils::date::today;
use chrono::{Datelike, NaiveDate};

fn invalid(msg: impl Into<String>) -> AppError {
    AppError::InvalidRange(msg.into())
}

/// First and last day covered by a single period token.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid(format!("invalid year '{p}'")))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("invalid start date"))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("invalid end date"))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid(format!("invalid month '{p}'")))?;
            Ok((first, last_day_of_month(first)))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d")
                .map_err(|_| invalid(format!("invalid date '{p}'")))?;
            Ok((d, d))
        }
        _ => Err(invalid(format!("unsupported range format '{p}'"))),
    }
}

pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let (start, end) = match r.split_once(':') {
        Some((start_raw, end_raw)) => {
            let start = start_raw.trim();
            let end = end_raw.trim();

            if start.len() != end.len() {
                return Err(invalid("start and end must have same format"));
            }

            (period_bounds(start)?.0, period_bounds(end)?.1)
        }
        None => period_bounds(r)?,
    };

    if end < start {
        return Err(invalid(format!("range end {end} is before start {start}")));
    }

    Ok((start, end))
}

/// `--range` if given, otherwise the current month.
pub fn resolve_range(range: Option<&str>) -> AppResult<(NaiveDate, NaiveDate)> {
    match range {
        Some(r) => parse_range(r),
        None => {
            let t = today();
            let first = NaiveDate::from_ymd_opt(t.year(), t.month(), 1)
                .ok_or_else(|| invalid("invalid current month"))?;
            Ok((first, last_day_of_month(first)))
        }
    }
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };

    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(first)
}
