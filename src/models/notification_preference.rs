use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const NOTIFICATION_TYPES: [&str; 3] = ["EMAIL", "SMS", "PUSH"];
pub const NOTIFICATION_CHANNELS: [&str; 3] = ["IMMEDIATE", "DAILY", "WEEKLY"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationPreference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: String,
    pub channel: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
