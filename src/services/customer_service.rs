use crate::dto::customer_dto::{CreateCustomerPayload, UpdateCustomerPayload};
use crate::error::{Error, Result};
use crate::models::customer::Customer;
use crate::services::audit_service::AuditService;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str = "id, name, email, phone, address, created_at, updated_at";

#[derive(Clone)]
pub struct CustomerService {
    pool: PgPool,
    audit: AuditService,
}

impl CustomerService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    pub async fn find_all(&self) -> Result<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers ORDER BY name",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Customer> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Customer not found".to_string()))
    }

    pub async fn create(&self, payload: CreateCustomerPayload) -> Result<Customer> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (id, name, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.address)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "create", "customer", Some(customer.id), None)
            .await;
        Ok(customer)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateCustomerPayload) -> Result<Customer> {
        self.find_by_id(id).await?;

        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.address)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "update", "customer", Some(id), None)
            .await;
        Ok(customer)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Customer not found".to_string()));
        }
        self.audit
            .record(None, "delete", "customer", Some(id), None)
            .await;
        Ok(())
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<()> {
        // Duplicate ids in the request must not trip the existence check.
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut tx = self.pool.begin().await?;

        let found: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM customers WHERE id = ANY($1)")
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
                "Customers not found: {}",
                missing.join(", ")
            )));
        }

        sqlx::query("DELETE FROM customers WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.audit
            .record(
                None,
                "delete_many",
                "customer",
                None,
                Some(json!({ "ids": ids })),
            )
            .await;
        Ok(())
    }
}
