use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::permission::Permission;
use crate::models::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRolePayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRolePayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleWithPermissionsResponse {
    #[serde(flatten)]
    pub role: Role,
    pub permissions: Vec<Permission>,
}
