//! Dashboards built on top of the store's read queries.

use chrono::NaiveDate;

use crate::db::models::{Reminder, VaccineCoverage};
use crate::db::sqlite::Records;
use crate::error::VaxError;

pub const DEFAULT_WINDOW_DAYS: u64 = 14;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoseStats {
    pub total: i64,
    pub done: i64,
    pub upcoming: i64,
    /// `Upcoming` doses due strictly before today.
    pub overdue: i64,
}

impl DoseStats {
    /// Share of `Done` doses, e.g. `"27.3%"`; `"0.0%"` when there are none.
    pub fn completion_rate(&self) -> String {
        if self.total == 0 {
            return "0.0%".to_string();
        }
        format!("{:.1}%", self.done as f64 / self.total as f64 * 100.0)
    }
}

/// Reminder window from a raw `days` query value.
///
/// Non-negative integers are taken as-is (`0` means "due today");
/// anything else falls back to [`DEFAULT_WINDOW_DAYS`].
pub fn parse_window_days(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_WINDOW_DAYS)
}

#[derive(Debug, Clone)]
pub struct AdminOverview {
    pub children: i64,
    pub stats: DoseStats,
    pub overdue: Vec<Reminder>,
}

impl AdminOverview {
    pub async fn load(records: &mut Records, today: NaiveDate) -> Result<Self, VaxError> {
        Ok(Self {
            children: records.count_children().await?,
            stats: records.dose_stats(today).await?,
            overdue: records.overdue_doses(today).await?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub stats: DoseStats,
    pub coverage: Vec<VaccineCoverage>,
}

impl ReportSummary {
    pub async fn load(records: &mut Records, today: NaiveDate) -> Result<Self, VaxError> {
        Ok(Self {
            stats: records.dose_stats(today).await?,
            coverage: records.vaccine_coverage().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_rate_without_doses_is_zero() {
        assert_eq!(DoseStats::default().completion_rate(), "0.0%");
    }

    #[test]
    fn completion_rate_has_one_decimal() {
        let stats = DoseStats {
            total: 11,
            done: 3,
            upcoming: 8,
            overdue: 0,
        };
        assert_eq!(stats.completion_rate(), "27.3%");
        let all = DoseStats {
            total: 4,
            done: 4,
            ..DoseStats::default()
        };
        assert_eq!(all.completion_rate(), "100.0%");
    }

    #[test]
    fn window_days_fall_back_to_default() {
        assert_eq!(parse_window_days(None), 14);
        assert_eq!(parse_window_days(Some("")), 14);
        assert_eq!(parse_window_days(Some("abc")), 14);
        assert_eq!(parse_window_days(Some("-1")), 14);
        assert_eq!(parse_window_days(Some("2.5")), 14);
        assert_eq!(parse_window_days(Some("0")), 0);
        assert_eq!(parse_window_days(Some(" 30 ")), 30);
    }
}
