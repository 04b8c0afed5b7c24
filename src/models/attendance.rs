use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One attendance record per user per calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub clock_in_time: Option<DateTime<Utc>>,
    pub clock_out_time: Option<DateTime<Utc>>,
    pub total_hours: Option<f64>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    EarlyDeparture,
    OnLeave,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Absent => "ABSENT",
            AttendanceStatus::Late => "LATE",
            AttendanceStatus::EarlyDeparture => "EARLY_DEPARTURE",
            AttendanceStatus::OnLeave => "ON_LEAVE",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRESENT" => Ok(AttendanceStatus::Present),
            "ABSENT" => Ok(AttendanceStatus::Absent),
            "LATE" => Ok(AttendanceStatus::Late),
            "EARLY_DEPARTURE" => Ok(AttendanceStatus::EarlyDeparture),
            "ON_LEAVE" => Ok(AttendanceStatus::OnLeave),
            other => Err(format!("Unknown attendance status: {}", other)),
        }
    }
}
