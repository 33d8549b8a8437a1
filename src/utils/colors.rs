//! ANSI color helper utilities for terminal output.
use crate::models::VerificationStatus;
use regex::Regex;
use std::sync::OnceLock;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

fn ansi_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI pattern"))
}

pub fn strip_ansi(s: &str) -> String {
    ansi_regex().replace_all(s, "").into_owned()
}

pub fn color_for_status(status: VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Pass => GREEN,
        VerificationStatus::Mismatch => RED,
        VerificationStatus::Incomplete => YELLOW,
    }
}

pub fn colorize_status(status: VerificationStatus) -> String {
    format!("{}{}{}", color_for_status(status), status.as_str(), RESET)
}

/// Grey when the caller marks the value as missing, unchanged otherwise.
pub fn colorize_optional(value: &str, missing: bool) -> String {
    if missing {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Remaining-budget color: red when spend is ahead of the ideal line.
pub fn color_for_remaining(actual: f64, ideal: f64) -> &'static str {
    if actual < ideal { RED } else { GREEN }
}
