//! Vaccination schedule planning.
//!
//! A child's schedule is derived entirely from the date of birth and
//! [`VACCINE_SCHEDULE`]; the store persists the plan (see
//! `Records::regenerate_schedule`).

use chrono::{Days, NaiveDate};

use crate::db::models::DoseStatus;

/// `(vaccine name, days after birth)`, ordered by offset.
pub const VACCINE_SCHEDULE: [(&str, u64); 11] = [
    ("BCG", 0),
    ("OPV 0", 0),
    ("Hepatitis B 1", 0),
    ("DPT 1", 42),
    ("OPV 1", 42),
    ("DPT 2", 70),
    ("OPV 2", 70),
    ("DPT 3", 98),
    ("OPV 3", 98),
    ("Measles 1", 270),
    ("MMR", 450),
];

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Latest date that still sorts correctly as `YYYY-MM-DD` text.
pub fn last_storable_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Largest offset in [`VACCINE_SCHEDULE`].
const LAST_OFFSET_DAYS: u64 = VACCINE_SCHEDULE[VACCINE_SCHEDULE.len() - 1].1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDose {
    pub vaccine: &'static str,
    pub offset_days: u64,
    pub due_date: NaiveDate,
    pub status: DoseStatus,
}

/// How existing rows are treated when a schedule is rebuilt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegeneratePolicy {
    /// Delete everything and start from the planned statuses.
    #[default]
    Replace,
    /// Same as `Replace`, but vaccines already marked `Done` stay `Done`.
    PreserveDone,
}

impl RegeneratePolicy {
    pub fn from_preserve_flag(preserve_completed: bool) -> Self {
        if preserve_completed {
            RegeneratePolicy::PreserveDone
        } else {
            RegeneratePolicy::Replace
        }
    }
}

/// `YYYY-MM-DD` with exactly four unsigned year digits.
fn is_iso_shaped(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a user supplied date of birth.
///
/// Blank or malformed input yields `None`, as does a dob whose last dose
/// would fall after [`last_storable_date`].
pub fn parse_dob(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if !is_iso_shaped(raw) {
        return None;
    }
    let dob = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
    let last_due = dob.checked_add_days(Days::new(LAST_OFFSET_DAYS))?;
    (last_due <= last_storable_date()).then_some(dob)
}

/// Status a freshly generated dose starts with.
///
/// Birth doses always start `Upcoming`. Later doses whose due date is already
/// reached are recorded as `Done`.
pub fn initial_status(offset_days: u64, due_date: NaiveDate, today: NaiveDate) -> DoseStatus {
    if offset_days > 0 && today >= due_date {
        DoseStatus::Done
    } else {
        DoseStatus::Upcoming
    }
}

/// Plan every dose of [`VACCINE_SCHEDULE`] for a child born on `dob`.
pub fn plan(dob: NaiveDate, today: NaiveDate) -> Vec<PlannedDose> {
    VACCINE_SCHEDULE
        .iter()
        .filter_map(|&(vaccine, offset_days)| {
            let due_date = dob.checked_add_days(Days::new(offset_days))?;
            Some(PlannedDose {
                vaccine,
                offset_days,
                due_date,
                status: initial_status(offset_days, due_date, today),
            })
        })
        .collect()
}

/// Plan from raw dob text; empty when the dob is missing or unparseable.
pub fn plan_from_text(dob: Option<&str>, today: NaiveDate) -> Vec<PlannedDose> {
    dob.and_then(parse_dob)
        .map(|dob| plan(dob, today))
        .unwrap_or_default()
}
