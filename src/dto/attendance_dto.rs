use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::attendance::AttendanceStatus;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClockInPayload {
    pub user_id: Uuid,
    /// Defaults to the current time when omitted.
    pub timestamp: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct ClockOutPayload {
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateAttendancePayload {
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AttendanceListQuery {
    pub user_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
