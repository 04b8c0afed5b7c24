use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::sale::{Sale, SaleItem};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSaleItemPayload {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSalePayload {
    pub customer_id: Option<Uuid>,
    pub notes: Option<String>,
    #[validate(length(min = 1, message = "a sale requires at least one item"))]
    #[validate(nested)]
    pub items: Vec<CreateSaleItemPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleResponse {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}
