use crate::dto::payment_dto::{CreatePaymentPayload, UpdatePaymentPayload};
use crate::error::{Error, Result};
use crate::models::payment::Payment;
use crate::services::audit_service::AuditService;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str = "id, purchase_order_id, supplier_id, amount, payment_date, method, status, \
                       invoice_number, due_date, transaction_id, notes, created_at, updated_at";

#[derive(Clone)]
pub struct PaymentService {
    pool: PgPool,
    audit: AuditService,
}

impl PaymentService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    pub async fn find_all(&self) -> Result<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {} FROM payments ORDER BY created_at DESC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(payments)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Payment> {
        sqlx::query_as::<_, Payment>(&format!("SELECT {} FROM payments WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Payment not found".to_string()))
    }

    pub async fn create(&self, payload: CreatePaymentPayload) -> Result<Payment> {
        let supplier: Option<Uuid> = sqlx::query_scalar("SELECT id FROM suppliers WHERE id = $1")
            .bind(payload.supplier_id)
            .fetch_optional(&self.pool)
            .await?;
        if supplier.is_none() {
            return Err(Error::NotFound("Supplier not found".to_string()));
        }

        let status = payload.status.unwrap_or_else(|| "PENDING".to_string());
        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments (
                id, purchase_order_id, supplier_id, amount, payment_date, method,
                status, invoice_number, due_date, transaction_id, notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(payload.purchase_order_id)
        .bind(payload.supplier_id)
        .bind(payload.amount)
        .bind(payload.payment_date)
        .bind(&payload.method)
        .bind(&status)
        .bind(&payload.invoice_number)
        .bind(payload.due_date)
        .bind(&payload.transaction_id)
        .bind(&payload.notes)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "create", "payment", Some(payment.id), None)
            .await;
        Ok(payment)
    }

    pub async fn update(&self, id: Uuid, payload: UpdatePaymentPayload) -> Result<Payment> {
        self.find_by_id(id).await?;

        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            UPDATE payments
            SET purchase_order_id = COALESCE($2, purchase_order_id),
                amount = COALESCE($3, amount),
                payment_date = COALESCE($4, payment_date),
                method = COALESCE($5, method),
                status = COALESCE($6, status),
                invoice_number = COALESCE($7, invoice_number),
                due_date = COALESCE($8, due_date),
                transaction_id = COALESCE($9, transaction_id),
                notes = COALESCE($10, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(payload.purchase_order_id)
        .bind(payload.amount)
        .bind(payload.payment_date)
        .bind(&payload.method)
        .bind(&payload.status)
        .bind(&payload.invoice_number)
        .bind(payload.due_date)
        .bind(&payload.transaction_id)
        .bind(&payload.notes)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "update", "payment", Some(id), None)
            .await;
        Ok(payment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Payment not found".to_string()));
        }
        self.audit
            .record(None, "delete", "payment", Some(id), None)
            .await;
        Ok(())
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<()> {
        // Duplicate ids in the request must not trip the existence check.
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut tx = self.pool.begin().await?;

        let found: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM payments WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(&mut *tx)
            .await?;
        if found.len() != ids.len() {
            let missing: Vec<String> = ids
                .iter()
                .filter(|id| !found.contains(id))
                .map(|id| id.to_string())
                .collect();
            return Err(Error::NotFound(format!(
                "Payments not found: {}",
                missing.join(", ")
            )));
        }

        sqlx::query("DELETE FROM payments WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.audit
            .record(
                None,
                "delete_many",
                "payment",
                None,
                Some(json!({ "ids": ids })),
            )
            .await;
        Ok(())
    }
}
