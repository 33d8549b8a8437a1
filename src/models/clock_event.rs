use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    Start,
    End,
}

impl ClockKind {
    /// Parse user input; accepts the legacy `in`/`out` spelling as well.
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "start" | "in" => Some(Self::Start),
            "end" | "out" => Some(Self::End),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ClockKind::Start => "start",
            ClockKind::End => "end",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "start" => Some(ClockKind::Start),
            "end" => Some(ClockKind::End),
            _ => None,
        }
    }
}

/// A physical clock-in / clock-out event, captured independently of the
/// hours a worker reports.
#[derive(Debug, Clone, Serialize)]
pub struct ClockEvent {
    pub worker_id: String,
    pub date: NaiveDate,
    pub kind: ClockKind,
    /// `None` when the stored value could not be parsed.
    pub timestamp: Option<NaiveDateTime>,
    pub reporter_display_name: String,
}

impl ClockEvent {
    pub fn new(
        worker_id: impl Into<String>,
        date: NaiveDate,
        kind: ClockKind,
        timestamp: Option<NaiveDateTime>,
        reporter_display_name: impl Into<String>,
    ) -> Self {
        Self {
            worker_id: worker_id.into(),
            date,
            kind,
            timestamp,
            reporter_display_name: reporter_display_name.into(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.timestamp
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }
}
