use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNotificationPreferencePayload {
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "type must not be empty"))]
    pub notification_type: String,
    #[validate(length(min = 1, message = "channel must not be empty"))]
    pub channel: String,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateNotificationPreferencePayload {
    #[validate(length(min = 1, message = "channel must not be empty"))]
    pub channel: Option<String>,
    pub enabled: Option<bool>,
}
