use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VaxError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DoseStatus {
    Upcoming,
    Done,
}

impl DoseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoseStatus::Upcoming => "Upcoming",
            DoseStatus::Done => "Done",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DoseStatus::Upcoming => DoseStatus::Done,
            DoseStatus::Done => DoseStatus::Upcoming,
        }
    }
}

impl fmt::Display for DoseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DoseStatus {
    type Err = VaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Upcoming" => Ok(DoseStatus::Upcoming),
            "Done" => Ok(DoseStatus::Done),
            other => Err(VaxError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DbChild {
    pub id: i64,
    pub name: String,
    /// Raw text as entered; may be empty or not a valid date.
    pub dob: Option<String>,
    pub parent_name: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Field values for inserting or updating a child.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildFields {
    pub name: String,
    pub dob: Option<String>,
    pub parent_name: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DbDose {
    pub id: i64,
    pub child_id: i64,
    pub vaccine: String,
    pub due_date: NaiveDate,
    pub status: DoseStatus,
    pub updated_at: DateTime<Utc>,
}

/// An upcoming dose joined with the contact details of its child.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub dose_id: i64,
    pub child_id: i64,
    pub child_name: String,
    pub parent_name: Option<String>,
    pub phone: Option<String>,
    pub vaccine: String,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccineCoverage {
    pub vaccine: String,
    pub done: i64,
    pub total: i64,
}
