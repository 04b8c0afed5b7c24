use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSchedulePayload {
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "day_of_week must not be empty"))]
    pub day_of_week: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSchedulePayload {
    #[validate(length(min = 1, message = "day_of_week must not be empty"))]
    pub day_of_week: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_active: Option<bool>,
}

/// One start/end template reused for all seven days of the week.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WeeklySchedulePayload {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
