use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSupplierPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub contact_person: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSupplierPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub contact_person: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
