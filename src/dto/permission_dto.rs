use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePermissionPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "resource must not be empty"))]
    pub resource: String,
    #[validate(length(min = 1, message = "action must not be empty"))]
    pub action: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePermissionPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "resource must not be empty"))]
    pub resource: Option<String>,
    #[validate(length(min = 1, message = "action must not be empty"))]
    pub action: Option<String>,
    pub description: Option<String>,
}
