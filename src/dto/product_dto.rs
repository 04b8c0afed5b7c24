use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub cost_price: Decimal,
    pub sale_price: Decimal,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub cost_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProductListQuery {
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
}
