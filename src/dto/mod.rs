pub mod attendance_dto;
pub mod auth_dto;
pub mod category_dto;
pub mod customer_dto;
pub mod notification_dto;
pub mod payment_dto;
pub mod permission_dto;
pub mod product_dto;
pub mod role_dto;
pub mod sale_dto;
pub mod schedule_dto;
pub mod supplier_dto;
pub mod user_dto;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Body of every `delete-many` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IdListPayload {
    #[validate(length(min = 1, message = "at least one id is required"))]
    pub ids: Vec<Uuid>,
}
