use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub purchase_order_id: Option<Uuid>,
    pub supplier_id: Uuid,
    pub amount: Decimal,
    pub payment_date: Option<DateTime<Utc>>,
    pub method: Option<String>,
    pub status: String,
    pub invoice_number: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
