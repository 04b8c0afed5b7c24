use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePaymentPayload {
    pub purchase_order_id: Option<Uuid>,
    pub supplier_id: Uuid,
    pub amount: Decimal,
    pub payment_date: Option<DateTime<Utc>>,
    pub method: Option<String>,
    pub status: Option<String>,
    pub invoice_number: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePaymentPayload {
    pub purchase_order_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    pub payment_date: Option<DateTime<Utc>>,
    pub method: Option<String>,
    pub status: Option<String>,
    pub invoice_number: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}
